use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;
use thaw::*;

use super::context::use_auth;

fn session_spinner() -> impl IntoView {
    view! {
        <div class="page page--center">
            <Spinner />
        </div>
    }
}

/// Component that requires admin privileges
/// Guests are sent to `/login`, other users see the fallback
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let access = Memo::new(move |_| auth.state.with(|s| s.admin_access()));

    Effect::new(move |_| {
        let guest = auth.state.with(|s| s.loaded && !s.is_authenticated());
        if guest {
            navigate(
                "/login",
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });

    move || match access.get() {
        None => session_spinner().into_any(),
        Some(true) => children().into_any(),
        Some(false) => view! {
            <div class="page page--center">
                <MessageBar intent=MessageBarIntent::Error>
                    "Доступ запрещён. Нужны права администратора."
                </MessageBar>
            </div>
        }
        .into_any(),
    }
}

/// Страницы входа и регистрации не нужны уже вошедшему пользователю
#[component]
pub fn RedirectIfAuthenticated(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let authenticated = Memo::new(move |_| auth.state.with(|s| s.is_authenticated()));

    Effect::new(move |_| {
        if authenticated.get() {
            navigate(
                "/",
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });

    move || (!authenticated.get()).then(|| children())
}
