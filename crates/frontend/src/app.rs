use crate::domain::a001_wb_order::ui::list::provide_feed_client;
use crate::routes::AppRoutes;
use crate::shared::config::use_app_config;
use crate::shared::theme::ThemeProvider;
use crate::shared::toast::{ToastService, Toaster};
use crate::system::auth::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let config = use_app_config();

    // Сервисы уровня приложения доступны всем маршрутам через контекст
    provide_context(config.clone());
    provide_context(ToastService::new(config.toast_duration_ms));
    provide_feed_client(config.query);

    view! {
        <ThemeProvider default_theme=config.default_theme>
            <AuthProvider>
                <AppRoutes />
                <Toaster />
            </AuthProvider>
        </ThemeProvider>
    }
}
