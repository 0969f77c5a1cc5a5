pub mod db_data;
pub mod entry;
pub mod profile;
