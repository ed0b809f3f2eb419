use leptos::prelude::*;
use leptos_router::hooks::use_location;

/// Граница ошибок маршрута.
///
/// A failed subtree is replaced by a retry panel. The boundary is rebuilt on
/// every path change and on retry, which clears the collected errors.
#[component]
pub fn RouteErrorBoundary(children: ChildrenFn) -> impl IntoView {
    let location = use_location();
    let attempt = RwSignal::new(0u32);

    move || {
        location.pathname.track();
        attempt.track();
        let children = children.clone();
        view! {
            <ErrorBoundary fallback=move |errors| {
                let messages = move || {
                    errors.with(|errors| {
                        errors
                            .iter()
                            .map(|(_, e)| e.to_string())
                            .collect::<Vec<_>>()
                    })
                };
                view! {
                    <div class="error-panel" role="alert">
                        <h3 class="error-panel__title">"Что-то пошло не так"</h3>
                        <ul class="error-panel__list">
                            {move || messages().into_iter().map(|m| view! { <li>{m}</li> }).collect_view()}
                        </ul>
                        <button
                            class="button button--primary"
                            on:click=move |_| attempt.update(|n| *n += 1)
                        >
                            "Повторить"
                        </button>
                    </div>
                }
            }>
                {children()}
            </ErrorBoundary>
        }
    }
}
