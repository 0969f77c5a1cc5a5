pub mod other;
pub mod profile;
