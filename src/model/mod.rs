pub mod summary;
pub mod time_entry;
