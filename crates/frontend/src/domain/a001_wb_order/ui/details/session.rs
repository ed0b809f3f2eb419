//! Сессия редактирования заявки.
//!
//! The `edit` URL parameter drives the session: opening a row writes the id
//! into the URL, and every URL change is fed back through
//! [`EditSession::sync_with_url`].

use contracts::domain::a001_wb_order::{OrderStatus, UpdateWbOrderRequest, WbOrder};

use crate::shared::api_utils::ApiError;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditSession {
    #[default]
    Closed,
    /// Карточка заявки загружается
    Loading { id: String },
    Open {
        id: String,
        order: WbOrder,
        /// Выбранный в форме статус, `None` если поле очищено
        status: Option<OrderStatus>,
        /// Изменение отправлено, ответа ещё нет
        saving: bool,
    },
}

/// Result of a detail fetch applied to the session
#[derive(Debug, Clone, PartialEq)]
pub enum DetailOutcome {
    /// Late answer for an id the session no longer waits for
    Ignored,
    Opened,
    Failed(ApiError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// No open form or no status chosen
    Ignored,
    /// Status left as it was; the session is closed without a request
    Unchanged,
    /// The session stays open until [`EditSession::update_finished`]
    Update(UpdateWbOrderRequest),
}

impl EditSession {
    pub fn from_url(edit: Option<&str>) -> Self {
        match edit {
            Some(id) if !id.trim().is_empty() => EditSession::Loading { id: id.to_string() },
            _ => EditSession::Closed,
        }
    }

    pub fn editing_id(&self) -> Option<&str> {
        match self {
            EditSession::Closed => None,
            EditSession::Loading { id } | EditSession::Open { id, .. } => Some(id),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, EditSession::Open { .. })
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, EditSession::Loading { .. })
    }

    /// Follow the URL; returns the id whose details must be fetched
    pub fn sync_with_url(&mut self, edit: Option<&str>) -> Option<String> {
        let edit = edit.filter(|id| !id.trim().is_empty());
        if edit == self.editing_id() {
            return None;
        }
        *self = EditSession::from_url(edit);
        edit.map(str::to_string)
    }

    pub fn detail_loaded(&mut self, id: &str, result: Result<WbOrder, ApiError>) -> DetailOutcome {
        if self.editing_id() != Some(id) {
            return DetailOutcome::Ignored;
        }
        match result {
            Ok(order) => {
                let status = Some(order.status);
                *self = EditSession::Open {
                    id: id.to_string(),
                    order,
                    status,
                    saving: false,
                };
                DetailOutcome::Opened
            }
            Err(e) => {
                *self = EditSession::Closed;
                DetailOutcome::Failed(e)
            }
        }
    }

    pub fn order(&self) -> Option<&WbOrder> {
        match self {
            EditSession::Open { order, .. } => Some(order),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<OrderStatus> {
        match self {
            EditSession::Open { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_saving(&self) -> bool {
        matches!(self, EditSession::Open { saving: true, .. })
    }

    pub fn set_status(&mut self, value: Option<OrderStatus>) {
        if let EditSession::Open { status, saving: false, .. } = self {
            *status = value;
        }
    }

    pub fn is_dirty(&self) -> bool {
        match self {
            EditSession::Open { order, status, .. } => *status != Some(order.status),
            _ => false,
        }
    }

    /// Unchanged status closes at once; a change keeps the form open while saving
    pub fn submit(&mut self) -> SubmitOutcome {
        let EditSession::Open {
            order,
            status,
            saving,
            ..
        } = self
        else {
            return SubmitOutcome::Ignored;
        };
        let (Some(status), false) = (*status, *saving) else {
            return SubmitOutcome::Ignored;
        };
        if status == order.status {
            *self = EditSession::Closed;
            return SubmitOutcome::Unchanged;
        }
        *saving = true;
        SubmitOutcome::Update(UpdateWbOrderRequest::with_status(order, status))
    }

    /// Server answered the update of `id`. Success closes the session and
    /// returns true; a failure leaves the form open for another attempt.
    pub fn update_finished<T, E>(&mut self, id: &str, result: &Result<T, E>) -> bool {
        if !self.is_saving() || self.editing_id() != Some(id) {
            return false;
        }
        match result {
            Ok(_) => {
                *self = EditSession::Closed;
                true
            }
            Err(_) => {
                if let EditSession::Open { saving, .. } = self {
                    *saving = false;
                }
                false
            }
        }
    }

    pub fn close(&mut self) {
        *self = EditSession::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: &str) -> WbOrder {
        WbOrder {
            id: id.into(),
            name: "Петров Пётр Петрович".into(),
            phone: "+79001112233".into(),
            wb_phone: Some("+79004445566".into()),
            order_code: Some("12345".into()),
            qr_code: None,
            status: OrderStatus::NotAssembled,
            created_at: 1_700_000_000_000,
            updated_at: 1_700_000_100_000,
        }
    }

    #[test]
    fn test_deep_link_loads_then_opens() {
        let mut session = EditSession::default();
        assert_eq!(session.sync_with_url(Some("abc123")), Some("abc123".into()));
        assert!(session.is_loading());
        // same URL again does not refetch
        assert_eq!(session.sync_with_url(Some("abc123")), None);

        assert_eq!(
            session.detail_loaded("abc123", Ok(order("abc123"))),
            DetailOutcome::Opened
        );
        assert!(session.is_open());
        assert_eq!(session.status(), Some(OrderStatus::NotAssembled));
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_late_detail_for_other_id_ignored() {
        let mut session = EditSession::from_url(Some("b"));
        assert_eq!(session.detail_loaded("a", Ok(order("a"))), DetailOutcome::Ignored);
        assert!(session.is_loading());
    }

    #[test]
    fn test_detail_error_closes() {
        let mut session = EditSession::from_url(Some("missing"));
        let err = ApiError::Api {
            status: 404,
            message: "Заявка не найдена".into(),
        };
        assert_eq!(
            session.detail_loaded("missing", Err(err.clone())),
            DetailOutcome::Failed(err)
        );
        assert_eq!(session, EditSession::Closed);
    }

    #[test]
    fn test_unchanged_submit_sends_nothing() {
        let mut session = EditSession::from_url(Some("x"));
        session.detail_loaded("x", Ok(order("x")));
        assert_eq!(session.submit(), SubmitOutcome::Unchanged);
        assert_eq!(session, EditSession::Closed);
    }

    #[test]
    fn test_changed_submit_sends_full_record() {
        let mut session = EditSession::from_url(Some("x"));
        session.detail_loaded("x", Ok(order("x")));
        session.set_status(Some(OrderStatus::Assembled));
        assert!(session.is_dirty());

        let SubmitOutcome::Update(request) = session.submit() else {
            panic!("expected update");
        };
        assert_eq!(request.status, OrderStatus::Assembled);
        assert_eq!(request.order_code.as_deref(), Some("12345"));
        assert_eq!(request.created_at, 1_700_000_000_000);
        assert!(session.is_saving());
        // second click while saving does nothing
        assert_eq!(session.submit(), SubmitOutcome::Ignored);
    }

    #[test]
    fn test_update_success_closes() {
        let mut session = EditSession::from_url(Some("x"));
        session.detail_loaded("x", Ok(order("x")));
        session.set_status(Some(OrderStatus::Rejected));
        session.submit();
        assert!(session.update_finished::<(), ApiError>("x", &Ok(())));
        assert_eq!(session, EditSession::Closed);
    }

    #[test]
    fn test_update_failure_keeps_form_open_for_retry() {
        let mut session = EditSession::from_url(Some("x"));
        session.detail_loaded("x", Ok(order("x")));
        session.set_status(Some(OrderStatus::Assembled));
        session.submit();

        let failed: Result<(), ApiError> = Err(ApiError::Network("offline".into()));
        assert!(!session.update_finished("x", &failed));
        assert!(session.is_open());
        assert!(!session.is_saving());
        assert_eq!(session.status(), Some(OrderStatus::Assembled));
        assert!(matches!(session.submit(), SubmitOutcome::Update(_)));
    }

    #[test]
    fn test_update_after_close_is_ignored() {
        let mut session = EditSession::from_url(Some("x"));
        session.detail_loaded("x", Ok(order("x")));
        session.set_status(Some(OrderStatus::Assembled));
        session.submit();
        session.close();
        assert!(!session.update_finished::<(), ApiError>("x", &Ok(())));
        assert_eq!(session, EditSession::Closed);
    }

    #[test]
    fn test_empty_status_blocks_submit() {
        let mut session = EditSession::from_url(Some("x"));
        session.detail_loaded("x", Ok(order("x")));
        session.set_status(None);
        assert_eq!(session.submit(), SubmitOutcome::Ignored);
        assert!(session.is_open());
    }

    #[test]
    fn test_url_cleared_closes() {
        let mut session = EditSession::from_url(Some("x"));
        session.detail_loaded("x", Ok(order("x")));
        assert_eq!(session.sync_with_url(None), None);
        assert_eq!(session, EditSession::Closed);
        assert_eq!(session.sync_with_url(Some("  ")), None);
    }
}
