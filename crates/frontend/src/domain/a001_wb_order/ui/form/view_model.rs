use super::state::OrderFormState;
use crate::domain::a001_wb_order::api;
use crate::shared::storage::{clear_persisted_draft, use_persisted_draft};
use crate::shared::toast::{ToastId, ToastKind, ToastService};
use contracts::domain::a001_wb_order::validation::{QrFileMeta, WbOrderDraft};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::File;

const DRAFT_NAME: &str = "wb-order";
const ERROR_TOAST_TITLE: &str = "WildBerries";

/// ViewModel публичной формы заявки
#[derive(Clone, Copy)]
pub struct OrderFormViewModel {
    pub full_name: RwSignal<String>,
    pub phone: RwSignal<String>,
    pub wb_phone: RwSignal<String>,
    pub order_code: RwSignal<String>,
    pub qr_meta: RwSignal<Option<QrFileMeta>>,
    pub state: RwSignal<OrderFormState>,
    qr_file: StoredValue<Option<File>, LocalStorage>,
    last_toast: StoredValue<Option<ToastId>>,
    toasts: ToastService,
}

impl OrderFormViewModel {
    pub fn new(toasts: ToastService) -> Self {
        let vm = Self {
            full_name: RwSignal::new(String::new()),
            phone: RwSignal::new(String::new()),
            wb_phone: RwSignal::new(String::new()),
            order_code: RwSignal::new(String::new()),
            qr_meta: RwSignal::new(None),
            state: RwSignal::new(OrderFormState::default()),
            qr_file: StoredValue::new_local(None),
            last_toast: StoredValue::new(None),
            toasts,
        };

        // Файл QR-кода в черновик не попадает
        let draft = Signal::derive(move || vm.draft());
        use_persisted_draft(DRAFT_NAME, draft, move |saved: WbOrderDraft| {
            vm.full_name.set(saved.full_name);
            vm.phone.set(saved.phone);
            vm.wb_phone.set(saved.wb_phone);
            vm.order_code.set(saved.order_code);
        });
        vm
    }

    pub fn draft(&self) -> WbOrderDraft {
        WbOrderDraft {
            full_name: self.full_name.get(),
            phone: self.phone.get(),
            wb_phone: self.wb_phone.get(),
            order_code: self.order_code.get(),
        }
    }

    pub fn set_qr_file(&self, file: Option<File>) {
        let meta = file.as_ref().map(|f| QrFileMeta {
            name: f.name(),
            size: f.size() as u64,
            content_type: f.type_(),
        });
        self.qr_file.set_value(file);
        self.qr_meta.set(meta);
    }

    fn reset_fields(&self) {
        self.full_name.set(String::new());
        self.phone.set(String::new());
        self.wb_phone.set(String::new());
        self.order_code.set(String::new());
        self.set_qr_file(None);
    }

    pub fn submit(&self) {
        let draft = self.draft();
        let mut request = None;
        self.qr_meta.with_untracked(|qr| {
            self.state
                .update(|s| request = s.begin_submit(&draft, qr.as_ref()));
        });
        let Some(request) = request else {
            log::debug!("order form has validation errors");
            return;
        };

        let vm = *self;
        let file = self.qr_file.get_value();
        spawn_local(async move {
            let result = api::create(&request, file.as_ref()).await;
            let Some(outcome) = vm.state.try_update(|s| s.finish(result)) else {
                return;
            };
            match outcome {
                Ok(()) => {
                    log::info!("order submitted");
                    clear_persisted_draft(DRAFT_NAME);
                    vm.reset_fields();
                }
                Err(e) => {
                    log::warn!("order submit failed: {}", e);
                    let previous = vm.last_toast.get_value();
                    let id = vm.toasts.replace(
                        previous,
                        ToastKind::Error,
                        ERROR_TOAST_TITLE,
                        Some(e.user_message()),
                    );
                    vm.last_toast.set_value(Some(id));
                }
            }
        });
    }

    pub fn start_over(&self) {
        self.state.update(|s| s.start_over());
    }
}
