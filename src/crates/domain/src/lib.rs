pub mod entry;
pub mod profile;
pub mod value;
