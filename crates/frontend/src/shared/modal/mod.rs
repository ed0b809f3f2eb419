use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;

#[component]
pub fn Modal(
    /// Title of the modal
    #[prop(into)]
    title: String,
    /// Callback when modal should close
    on_close: Callback<()>,
    /// Spinner next to the title while background work runs
    #[prop(optional, into)]
    busy: Signal<bool>,
    /// Modal content
    children: Children,
) -> impl IntoView {
    // Escape закрывает окно
    let keydown = StoredValue::new_local(None::<Closure<dyn FnMut(web_sys::Event)>>);
    Effect::new(move |_| {
        if keydown.with_value(|k| k.is_some()) {
            return;
        }
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            if let Some(keyboard_event) = event.dyn_ref::<KeyboardEvent>() {
                if keyboard_event.key() == "Escape" {
                    on_close.run(());
                }
            }
        }) as Box<dyn FnMut(_)>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        }
        keydown.set_value(Some(closure));
    });

    on_cleanup(move || {
        keydown.try_update_value(|k| {
            if let (Some(window), Some(closure)) = (web_sys::window(), k.take()) {
                let _ = window.remove_event_listener_with_callback(
                    "keydown",
                    closure.as_ref().unchecked_ref(),
                );
            }
        });
    });

    let stop_propagation = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal" role="dialog" aria-modal="true" on:click=stop_propagation>
                <div class="modal-header">
                    <h2 class="modal-title">
                        {title}
                        <Show when=move || busy.get()>
                            <span class="modal-title__spinner">
                                <thaw::Spinner size=thaw::SpinnerSize::Tiny />
                            </span>
                        </Show>
                    </h2>
                    <button
                        class="button button--icon modal__close"
                        aria-label="Закрыть"
                        on:click=move |_| on_close.run(())
                    >
                        "×"
                    </button>
                </div>
                <div class="modal-body">
                    {children()}
                </div>
            </div>
        </div>
    }
}
