use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use serde::{Deserialize, Serialize};
use thaw::*;

use super::form_state::AuthFormState;
use crate::shared::components::ui::Input;
use crate::shared::storage::{clear_persisted_draft, use_persisted_draft};
use crate::shared::toast::use_toasts;
use crate::system::auth::{api, use_auth};
use contracts::system::auth::validate_login;

const DRAFT_NAME: &str = "login-form";

/// Пароль в черновик не попадает
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct LoginDraft {
    login: String,
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let navigate = use_navigate();

    let login = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let state = RwSignal::new(AuthFormState::default());

    use_persisted_draft(
        DRAFT_NAME,
        Signal::derive(move || LoginDraft { login: login.get() }),
        move |saved: LoginDraft| login.set(saved.login),
    );

    let error_of = move |field: &'static str| Signal::derive(move || state.with(|s| s.error(field)));
    let is_loading = Signal::derive(move || state.with(|s| s.submitting));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let validated = validate_login(&login.get_untracked(), &password.get_untracked());
        let Some(request) = state.try_update(|s| s.begin(validated)).flatten() else {
            return;
        };

        let navigate = navigate.clone();
        spawn_local(async move {
            let result = api::login(&request).await;
            state.try_update(|s| s.finish());
            match result {
                Ok(user) => {
                    log::info!("logged in as {}", user.id);
                    clear_persisted_draft(DRAFT_NAME);
                    toasts.success("Вход выполнен", format!("Добро пожаловать, {}", user.display_name()));
                    auth.set_user(user);
                    auth.refresh();
                    navigate("/", Default::default());
                }
                Err(e) => {
                    log::warn!("login failed: {}", e);
                    toasts.error(e.user_message());
                }
            }
        });
    };

    view! {
        <div class="page page--narrow auth-page">
            <h2 class="page__title">"Вход"</h2>
            <form class="auth-form" on:submit=on_submit>
                <Input
                    label="Логин"
                    id="login"
                    value=login
                    autocomplete="username"
                    disabled=is_loading
                    error=error_of("login")
                />
                <Input
                    label="Пароль"
                    id="password"
                    value=password
                    input_type="password"
                    autocomplete="current-password"
                    disabled=is_loading
                    error=error_of("password")
                />
                <button
                    type="submit"
                    class="button button--primary button--block"
                    disabled=move || is_loading.get()
                >
                    {move || if is_loading.get() { "Вход..." } else { "Войти" }}
                    <Show when=move || is_loading.get()>
                        <Spinner size=SpinnerSize::Tiny />
                    </Show>
                </button>
            </form>
            <p class="auth-page__switch">
                "Нет аккаунта? " <A href="/signup">"Зарегистрироваться"</A>
            </p>
        </div>
    }
}
