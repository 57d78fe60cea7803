pub mod user_status;
