//! Публичная форма заявки
//!
//! - state.rs: submit phases and validation errors
//! - view_model.rs: field signals, draft persistence, submit command
//! - view.rs: page component

mod state;
mod view;
mod view_model;

pub use view::WbOrderFormPage;
