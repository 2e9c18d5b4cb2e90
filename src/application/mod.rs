pub mod action_result;
pub mod app_error;
pub mod ports;
pub mod use_cases;
pub mod validators;
