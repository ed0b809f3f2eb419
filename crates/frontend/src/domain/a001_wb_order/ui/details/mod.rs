//! Редактирование заявки
//!
//! - session.rs: pure state machine of the edit session
//! - view_model.rs: signals, detail loading and the update command
//! - view.rs: modal component

pub mod session;
mod view;
mod view_model;

pub use session::EditSession;
pub use view::EditOrderModal;
pub use view_model::EditOrderViewModel;
