pub mod api_utils;
pub mod clipboard;
pub mod components;
pub mod config;
pub mod date_utils;
pub mod deferred;
pub mod error_boundary;
pub mod infinite_scroll;
pub mod modal;
pub mod query;
pub mod storage;
pub mod theme;
pub mod toast;
