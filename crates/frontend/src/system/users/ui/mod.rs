pub mod browser;
pub mod details;
pub mod list;
