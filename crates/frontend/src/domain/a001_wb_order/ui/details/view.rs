use super::view_model::EditOrderViewModel;
use crate::shared::clipboard::ClipboardField;
use crate::shared::modal::Modal;
use contracts::domain::a001_wb_order::{OrderStatus, WbOrder};
use leptos::prelude::*;
use thaw::*;

fn order_fields(order: WbOrder) -> impl IntoView {
    let qr_path = order.qr_code_path();
    view! {
        <ClipboardField label="ID" value=order.id.clone() />
        <ClipboardField label="ФИО" value=order.name.clone() />
        <ClipboardField label="Телефон" value=order.phone.clone() />
        {order.wb_phone.clone().map(|wb_phone| view! {
            <ClipboardField label="Телефон WB" value=wb_phone />
        })}
        {order.order_code.clone().map(|code| view! {
            <ClipboardField label="Код для получения заказа" value=code />
        })}
        {qr_path.map(|href| view! {
            <a class="button button--outline" href=href target="_blank">
                "Посмотреть QR"
            </a>
        })}
    }
}

/// Окно редактирования статуса заявки
#[component]
pub fn EditOrderModal(
    vm: EditOrderViewModel,
    /// Closing without submit
    on_close: Callback<()>,
    /// The session was closed by a submit (unchanged or saved)
    on_submitted: Callback<()>,
) -> impl IntoView {
    let order = Memo::new(move |_| vm.session.with(|s| s.order().cloned()));
    let is_busy = Signal::derive(move || {
        vm.session.with(|s| s.is_loading() || s.is_saving())
    });

    let on_submit = move |_| vm.submit(move || on_submitted.run(()));

    view! {
        <Modal title="Редактировать заявку" on_close=on_close busy=is_busy>
            {move || match order.get() {
                None => view! {
                    <div class="modal-body__loading">
                        <Spinner />
                    </div>
                }
                .into_any(),
                Some(order) => view! {
                    <div class="details-form">
                        {order_fields(order)}

                        <div class="form-group">
                            <label for="wb-order-status">"Выберите статус"</label>
                            <select
                                id="wb-order-status"
                                prop:value=move || {
                                    vm.session
                                        .with(|s| s.status().map(|st| st.as_str()).unwrap_or_default())
                                }
                                disabled=move || vm.is_saving()
                                on:change=move |ev| vm.set_status(&event_target_value(&ev))
                            >
                                <option value="">"Выберите статус"</option>
                                {OrderStatus::all()
                                    .into_iter()
                                    .map(|status| view! {
                                        <option value=status.as_str()>{status.display_name()}</option>
                                    })
                                    .collect_view()}
                            </select>
                            <Show when=move || !vm.is_submittable()>
                                <div class="field-error">"Нужно выбрать статус!"</div>
                            </Show>
                        </div>

                        <div class="details-actions">
                            <Button
                                appearance=ButtonAppearance::Primary
                                disabled=Signal::derive(move || !vm.is_submittable() || vm.is_saving())
                                on_click=on_submit
                            >
                                "Подтвердить"
                            </Button>
                        </div>
                    </div>
                }
                .into_any(),
            }}
        </Modal>
    }
}
