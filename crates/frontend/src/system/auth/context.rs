use contracts::system::auth::UserInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<UserInfo>,
    /// Первый запрос `/me` завершён
    pub loaded: bool,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().map(|u| u.is_admin).unwrap_or(false)
    }

    /// Admin guard decision: `None` while the session is still unknown
    pub fn admin_access(&self) -> Option<bool> {
        self.loaded.then(|| self.is_admin())
    }
}

#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: RwSignal<AuthState>,
}

impl AuthContext {
    /// Перечитывает текущего пользователя с сервера
    pub fn refresh(&self) {
        let state = self.state;
        spawn_local(async move {
            let user = match api::me().await {
                Ok(user) => user,
                Err(e) => {
                    log::warn!("current user not loaded: {}", e);
                    None
                }
            };
            log::debug!("session user: {:?}", user.as_ref().map(|u| u.id.as_str()));
            state.try_set(AuthState { user, loaded: true });
        });
    }

    pub fn set_user(&self, user: UserInfo) {
        self.state.set(AuthState {
            user: Some(user),
            loaded: true,
        });
    }

    pub fn is_admin(&self) -> bool {
        self.state.with(AuthState::is_admin)
    }

    /// Завершает сессию; локальное состояние очищается даже при ошибке сервера
    pub async fn logout(&self) -> Result<(), crate::shared::api_utils::ApiError> {
        let result = api::logout().await;
        self.state.try_set(AuthState {
            user: None,
            loaded: true,
        });
        result
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let ctx = AuthContext {
        state: RwSignal::new(AuthState::default()),
    };
    ctx.refresh();
    provide_context(ctx);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthProvider not found in component tree")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(is_admin: bool) -> UserInfo {
        UserInfo {
            id: "u1".into(),
            email: "admin@example.com".into(),
            name: None,
            is_admin,
        }
    }

    #[test]
    fn test_admin_access() {
        assert_eq!(AuthState::default().admin_access(), None);
        let guest = AuthState {
            user: None,
            loaded: true,
        };
        assert_eq!(guest.admin_access(), Some(false));
        let member = AuthState {
            user: Some(user(false)),
            loaded: true,
        };
        assert!(member.is_authenticated());
        assert_eq!(member.admin_access(), Some(false));
        let admin = AuthState {
            user: Some(user(true)),
            loaded: true,
        };
        assert_eq!(admin.admin_access(), Some(true));
    }
}
