pub mod api_error;
pub mod field_errors;
