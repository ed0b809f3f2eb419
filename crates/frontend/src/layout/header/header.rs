use crate::shared::theme::ThemeToggle;
use crate::shared::toast::use_toasts;
use crate::system::auth::use_auth;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

/// Пункт навигации: (подпись, путь, только для администратора)
const NAV_ITEMS: [(&str, &str, bool); 3] = [
    ("Главная", "/", false),
    ("Wildberries", "/wb-order", false),
    ("Заявки WB", "/admin/wb-orders", true),
];

/// Пункты, видимые пользователю
fn visible_nav_items(is_admin: bool) -> Vec<(&'static str, &'static str)> {
    NAV_ITEMS
        .iter()
        .filter(|(_, _, admin_only)| is_admin || !admin_only)
        .map(|(label, href, _)| (*label, *href))
        .collect()
}

#[component]
fn AccountMenu() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let navigate = use_navigate();
    let open = RwSignal::new(false);

    let logout = move |_| {
        open.set(false);
        let navigate = navigate.clone();
        spawn_local(async move {
            match auth.logout().await {
                Ok(()) => {
                    toasts.info("Вы вышли из аккаунта");
                }
                Err(e) => {
                    log::warn!("logout failed: {}", e);
                    toasts.error(e.user_message());
                }
            }
            navigate("/", Default::default());
        });
    };

    let user = Memo::new(move |_| auth.state.with(|s| s.user.clone()));

    move || match user.get() {
        None => view! {
            <div class="header__account">
                <A href="/login" attr:class="button button--ghost">"Войти"</A>
                <A href="/signup" attr:class="button button--primary">"Регистрация"</A>
            </div>
        }
        .into_any(),
        Some(user) => {
            let logout = logout.clone();
            view! {
                <div class="header__account account-menu">
                    <button
                        class="button button--ghost account-menu__toggle"
                        aria-haspopup="menu"
                        on:click=move |_| open.update(|o| *o = !*o)
                    >
                        {user.display_name().to_string()}
                    </button>
                    <Show when=move || open.get()>
                        <div class="account-menu__dropdown" role="menu">
                            <div class="account-menu__email">{user.email.clone()}</div>
                            <button class="account-menu__item" role="menuitem" on:click=logout.clone()>
                                "Выйти"
                            </button>
                        </div>
                    </Show>
                </div>
            }
            .into_any()
        }
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let auth = use_auth();
    let is_admin = Memo::new(move |_| auth.is_admin());

    view! {
        <header data-zone="header" class="header">
            <div class="header__content">
                <A href="/" attr:class="header__title">
                    <span class="header__accent">"Джа"</span>"ББароВ"
                </A>
                <nav class="header__nav">
                    {move || {
                        visible_nav_items(is_admin.get())
                            .into_iter()
                            .map(|(label, href)| view! {
                                <A href=href attr:class="header__link">{label}</A>
                            })
                            .collect_view()
                    }}
                </nav>
            </div>
            <div class="header__actions">
                <ThemeToggle />
                <AccountMenu />
            </div>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_link_only_for_admins() {
        let guest: Vec<_> = visible_nav_items(false).into_iter().map(|(_, href)| href).collect();
        assert_eq!(guest, vec!["/", "/wb-order"]);
        assert_eq!(visible_nav_items(true).len(), 3);
    }
}
