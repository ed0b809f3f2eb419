//! Копирование в буфер обмена через Web Clipboard API.

use leptos::prelude::*;
use wasm_bindgen_futures::{spawn_local, JsFuture};

/// Copies `text`, then calls `on_copied` with the outcome
pub fn copy_to_clipboard<F>(text: &str, on_copied: F)
where
    F: FnOnce(bool) + 'static,
{
    let text = text.to_owned();
    spawn_local(async move {
        let Some(window) = web_sys::window() else {
            on_copied(false);
            return;
        };
        let promise = window.navigator().clipboard().write_text(&text);
        let ok = JsFuture::from(promise).await.is_ok();
        if !ok {
            log::warn!("clipboard write rejected");
        }
        on_copied(ok);
    });
}

/// Поле только для чтения с кнопкой копирования
#[component]
pub fn ClipboardField(#[prop(into)] label: String, #[prop(into)] value: String) -> impl IntoView {
    let copied = RwSignal::new(false);
    let text = StoredValue::new(value.clone());

    let on_copy = move |_| {
        let current = text.get_value();
        copy_to_clipboard(&current, move |ok| {
            copied.try_set(ok);
        });
    };

    view! {
        <div class="form-group clipboard-field">
            <label>{label}</label>
            <div class="clipboard-field__row">
                <input type="text" readonly=true prop:value=value />
                <button class="button button--ghost" on:click=on_copy>
                    {move || if copied.get() { "Скопировано" } else { "Копировать" }}
                </button>
            </div>
        </div>
    }
}
