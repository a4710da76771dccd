pub mod app_error;
pub mod error_messages;
pub mod ports;
pub mod use_cases;
pub mod validators;
pub mod views;
