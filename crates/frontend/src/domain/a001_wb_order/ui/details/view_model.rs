use super::session::{DetailOutcome, EditSession, SubmitOutcome};
use crate::domain::a001_wb_order::api;
use crate::domain::a001_wb_order::ui::list::WbOrdersFeedClient;
use crate::shared::toast::ToastService;
use contracts::domain::a001_wb_order::OrderStatus;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// ViewModel окна редактирования заявки
#[derive(Clone, Copy)]
pub struct EditOrderViewModel {
    pub session: RwSignal<EditSession>,
    /// Последняя отправленная на сервер заявка
    pub mutating_id: RwSignal<Option<String>>,
    client: WbOrdersFeedClient,
    toasts: ToastService,
}

impl EditOrderViewModel {
    pub fn new(client: WbOrdersFeedClient, toasts: ToastService) -> Self {
        Self {
            session: RwSignal::new(EditSession::Closed),
            mutating_id: RwSignal::new(None),
            client,
            toasts,
        }
    }

    /// Apply the URL `edit` value; `on_failed` runs when the details can't be loaded
    pub fn sync_with_url(&self, edit: Option<String>, on_failed: impl Fn() + 'static) {
        let mut to_load = None;
        self.session
            .update(|s| to_load = s.sync_with_url(edit.as_deref()));
        let Some(id) = to_load else {
            return;
        };

        log::debug!("edit session: loading {}", id);
        let session = self.session;
        let toasts = self.toasts;
        spawn_local(async move {
            let result = api::fetch_by_id(&id).await;
            let Some(outcome) = session.try_update(|s| s.detail_loaded(&id, result)) else {
                return;
            };
            match outcome {
                DetailOutcome::Opened => log::debug!("edit session: open {}", id),
                DetailOutcome::Ignored => log::debug!("edit session: stale detail {}", id),
                DetailOutcome::Failed(e) => {
                    log::warn!("edit session: {} failed to load: {}", id, e);
                    toasts.error(e.user_message());
                    on_failed();
                }
            }
        });
    }

    pub fn set_status(&self, value: &str) {
        let status = OrderStatus::parse(value);
        self.session.update(|s| s.set_status(status));
    }

    pub fn is_submittable(&self) -> bool {
        self.session.with(|s| s.status().is_some())
    }

    pub fn is_saving(&self) -> bool {
        self.session.with(EditSession::is_saving)
    }

    /// `on_closed` runs once the session is closed by this submit, at once for
    /// an unchanged status or after the server accepted the update
    pub fn submit(&self, on_closed: impl Fn() + 'static) {
        let mut outcome = SubmitOutcome::Ignored;
        self.session.update(|s| outcome = s.submit());
        match outcome {
            SubmitOutcome::Ignored => {}
            SubmitOutcome::Unchanged => {
                log::debug!("edit session: status unchanged, nothing sent");
                on_closed();
            }
            SubmitOutcome::Update(request) => {
                log::debug!("edit session: {} -> {}", request.id, request.status);
                self.mutating_id.set(Some(request.id.clone()));
                let (session, client, toasts, mutating_id) =
                    (self.session, self.client, self.toasts, self.mutating_id);
                spawn_local(async move {
                    let result = api::update(&request).await;
                    let closed = session
                        .try_update(|s| s.update_finished(&request.id, &result))
                        .unwrap_or(false);
                    match result {
                        Ok(_) => {
                            client.invalidate_all();
                            if closed {
                                on_closed();
                            }
                        }
                        Err(e) => {
                            log::error!("update of {} failed: {}", request.id, e);
                            toasts.error(e.user_message());
                            mutating_id.try_set(None);
                        }
                    }
                });
            }
        }
    }

    pub fn close(&self) {
        self.session.update(|s| s.close());
    }
}
