pub mod api;
pub mod context;
pub mod guard;

pub use context::{use_auth, AuthContext, AuthProvider, AuthState};
pub use guard::{RedirectIfAuthenticated, RequireAdmin};
