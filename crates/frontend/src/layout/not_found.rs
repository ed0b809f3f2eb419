use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div class="page page--center not-found">
            <h1 class="not-found__code">"404"</h1>
            <p>"Страница не найдена"</p>
            <A href="/" attr:class="button button--primary">"На главную страницу"</A>
        </div>
    }
}
