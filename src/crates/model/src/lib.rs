pub mod entry;
pub mod page;
