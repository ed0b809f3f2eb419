use super::view_model::OrderFormViewModel;
use crate::shared::components::ui::Input;
use crate::shared::toast::use_toasts;
use contracts::domain::a001_wb_order::validation::{
    FIELD_FULL_NAME, FIELD_ORDER_CODE, FIELD_PHONE, FIELD_QR, FIELD_WB_PHONE, ORDER_CODE_LEN,
};
use contracts::domain::a001_wb_order::CreatedWbOrder;
use leptos::prelude::*;
use thaw::*;
use web_sys::HtmlInputElement;

fn confirmation(created: CreatedWbOrder) -> impl IntoView {
    let order = created.order;
    let qr_src = created.qr_code_file.map(|f| f.data_url());
    view! {
        <div class="confirmation">
            <h3 class="confirmation__title">"Подтверждено!"</h3>
            <p>"Заявка оформлена!"</p>
            <p>
                "Ваш идентификатор заявки № " <b>{order.id.clone()}</b><br />
                "Ваши введенные данные:"<br />
                "ФИО: " <b>{order.name.clone()}</b><br />
                "Телефон: " <b>{order.phone.clone()}</b><br />
            </p>
            {qr_src
                .filter(|_| order.qr_code.is_some())
                .map(|src| view! {
                    <p>"QR-code:"</p>
                    <img class="confirmation__qr" src=src alt="qr-code" />
                })}
            {order.order_code.clone().map(|code| view! {
                <p>"Код получения заказа: " <b>{code}</b></p>
            })}
            {order.wb_phone.clone().map(|phone| view! {
                <p>"Телефон Wb: " <b>{phone}</b></p>
            })}
        </div>
    }
}

/// Публичная форма оформления заявки на выдачу заказа Wildberries
#[component]
pub fn WbOrderFormPage() -> impl IntoView {
    let vm = OrderFormViewModel::new(use_toasts());
    let error_of = move |field: &'static str| {
        Signal::derive(move || vm.state.with(|s| s.error(field)))
    };
    let qr_error = error_of(FIELD_QR);
    let is_submitting = Signal::derive(move || vm.state.with(|s| s.is_submitting()));

    let on_file = move |ev: leptos::ev::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        let file = input.files().and_then(|files| files.get(0));
        vm.set_qr_file(file);
    };

    let form = move || {
        view! {
            <form
                class="order-form"
                on:submit=move |ev| {
                    ev.prevent_default();
                    vm.submit();
                }
            >
                <Input
                    label="ФИО"
                    id="order-full-name"
                    value=vm.full_name
                    placeholder="Иванов Иван Иванович"
                    error=error_of(FIELD_FULL_NAME)
                />
                <Input
                    label="Телефон"
                    id="order-phone"
                    value=vm.phone
                    placeholder="Ваш телефон"
                    input_type="tel"
                    error=error_of(FIELD_PHONE)
                />

                <h4 class="order-form__section">"Если мобильное приложение Wb"</h4>
                <div class="form-group" class=("form-group--invalid", move || qr_error.with(Option::is_some))>
                    <label for="order-qr">"QR-код для получения заказа"</label>
                    <input
                        type="file"
                        id="order-qr"
                        accept=".png,.jpg,.jpeg,.webp"
                        on:change=on_file
                    />
                    {move || vm.qr_meta.with(|m| m.as_ref().map(|m| m.name.clone())).map(|name| view! {
                        <div class="field-hint">{name}</div>
                    })}
                    {move || qr_error.get().map(|e| view! { <div class="field-error">{e}</div> })}
                </div>

                <h4 class="order-form__section">"Если Wb с компьютера"</h4>
                <Input
                    label="Код для получения заказа"
                    id="order-code"
                    value=vm.order_code
                    maxlength=ORDER_CODE_LEN
                    error=error_of(FIELD_ORDER_CODE)
                />
                <Input
                    label="Телефон Wb"
                    id="order-wb-phone"
                    value=vm.wb_phone
                    placeholder="Ваш Wb телефон"
                    input_type="tel"
                    error=error_of(FIELD_WB_PHONE)
                />

                <button
                    type="submit"
                    class="button button--primary button--block"
                    disabled=move || is_submitting.get()
                >
                    {move || if is_submitting.get() { "Отправка заявки" } else { "Оформить заявку" }}
                    <Show when=move || is_submitting.get()>
                        <Spinner size=SpinnerSize::Tiny />
                    </Show>
                </button>
            </form>
        }
    };

    let created = Memo::new(move |_| vm.state.with(|s| s.created().cloned()));

    view! {
        <div class="page page--narrow">
            {move || match created.get() {
                Some(created) => view! {
                    {confirmation(created)}
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.start_over()>
                        "Оформить заявку"
                    </Button>
                }
                .into_any(),
                None => form().into_any(),
            }}
        </div>
    }
}
