use leptos::prelude::*;
use leptos_router::components::A;

use crate::system::auth::use_auth;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let greeting = move || {
        auth.state
            .with(|s| s.user.as_ref().map(|u| format!("Здравствуйте, {}", u.display_name())))
    };

    view! {
        <div class="page home">
            <h1 class="home__title">
                <span class="home__accent">"Джа"</span>"ББароВ"
            </h1>
            {move || greeting().map(|g| view! { <p class="home__greeting">{g}</p> })}
            <p class="home__lead">"Оформите заявку на получение заказа Wildberries онлайн."</p>
            <A href="/wb-order" attr:class="button button--primary">"Оформить заявку"</A>
        </div>
    }
}
