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
use contracts::system::auth::validate_signup;

const DRAFT_NAME: &str = "signup-form";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct SignupDraft {
    name: String,
    email: String,
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let navigate = use_navigate();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let state = RwSignal::new(AuthFormState::default());

    use_persisted_draft(
        DRAFT_NAME,
        Signal::derive(move || SignupDraft {
            name: name.get(),
            email: email.get(),
        }),
        move |saved: SignupDraft| {
            name.set(saved.name);
            email.set(saved.email);
        },
    );

    let error_of = move |field: &'static str| Signal::derive(move || state.with(|s| s.error(field)));
    let is_loading = Signal::derive(move || state.with(|s| s.submitting));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let validated = validate_signup(
            &name.get_untracked(),
            &email.get_untracked(),
            &password.get_untracked(),
            &confirm.get_untracked(),
        );
        let Some(request) = state.try_update(|s| s.begin(validated)).flatten() else {
            return;
        };

        let navigate = navigate.clone();
        spawn_local(async move {
            let result = api::signup(&request).await;
            state.try_update(|s| s.finish());
            match result {
                Ok(user) => {
                    log::info!("signed up as {}", user.id);
                    clear_persisted_draft(DRAFT_NAME);
                    toasts.success("Регистрация завершена", format!("Добро пожаловать, {}", user.display_name()));
                    auth.set_user(user);
                    auth.refresh();
                    navigate("/", Default::default());
                }
                Err(e) => {
                    log::warn!("signup failed: {}", e);
                    toasts.error(e.user_message());
                }
            }
        });
    };

    view! {
        <div class="page page--narrow auth-page">
            <h2 class="page__title">"Регистрация"</h2>
            <form class="auth-form" on:submit=on_submit>
                <Input
                    label="Имя"
                    id="signup-name"
                    value=name
                    autocomplete="name"
                    disabled=is_loading
                    error=error_of("name")
                />
                <Input
                    label="E-mail"
                    id="signup-email"
                    value=email
                    input_type="email"
                    autocomplete="email"
                    disabled=is_loading
                    error=error_of("email")
                />
                <Input
                    label="Пароль"
                    id="signup-password"
                    value=password
                    input_type="password"
                    autocomplete="new-password"
                    disabled=is_loading
                    error=error_of("password")
                />
                <Input
                    label="Подтвердите пароль"
                    id="signup-confirm"
                    value=confirm
                    input_type="password"
                    autocomplete="new-password"
                    disabled=is_loading
                    error=error_of("confirm")
                />
                <button
                    type="submit"
                    class="button button--primary button--block"
                    disabled=move || is_loading.get()
                >
                    {move || if is_loading.get() { "Регистрация..." } else { "Зарегистрироваться" }}
                    <Show when=move || is_loading.get()>
                        <Spinner size=SpinnerSize::Tiny />
                    </Show>
                </button>
            </form>
            <p class="auth-page__switch">
                "Уже есть аккаунт? " <A href="/login">"Войти"</A>
            </p>
        </div>
    }
}
