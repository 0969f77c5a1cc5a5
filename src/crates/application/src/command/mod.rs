pub mod entry;
pub mod shared;
pub mod view_counter;
