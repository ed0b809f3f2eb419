use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer data-zone="footer" class="footer">
            <span>"© ДжаББаров 2024"</span>
        </footer>
    }
}
