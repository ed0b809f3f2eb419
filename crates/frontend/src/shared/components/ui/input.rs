use leptos::prelude::*;

/// Input component with label and field error
#[component]
pub fn Input(
    /// Label text
    #[prop(into)]
    label: String,
    /// ID for the input element
    id: &'static str,
    /// Двусторонняя привязка значения
    value: RwSignal<String>,
    /// Placeholder text
    #[prop(optional, into)]
    placeholder: String,
    /// Input type: "text" (default), "password", "email", etc.
    #[prop(optional)]
    input_type: Option<&'static str>,
    /// Autocomplete attribute
    #[prop(optional)]
    autocomplete: Option<&'static str>,
    #[prop(optional)]
    maxlength: Option<usize>,
    #[prop(optional, into)]
    disabled: Signal<bool>,
    /// Сообщение валидации под полем
    #[prop(into)]
    error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <div class="form-group" class=("form-group--invalid", move || error.with(Option::is_some))>
            <label class="form__label" for=id>{label}</label>
            <input
                id=id
                class="form__input"
                type=input_type.unwrap_or("text")
                placeholder=placeholder
                autocomplete=autocomplete
                maxlength=maxlength.map(|n| n.to_string())
                disabled=move || disabled.get()
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            {move || error.get().map(|e| view! { <div class="field-error">{e}</div> })}
        </div>
    }
}
