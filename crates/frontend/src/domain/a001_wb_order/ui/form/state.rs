use contracts::domain::a001_wb_order::validation::{validate_create, QrFileMeta, WbOrderDraft};
use contracts::domain::a001_wb_order::{CreateWbOrderRequest, CreatedWbOrder};
use contracts::shared::field_errors::FieldErrors;

/// Этап публичной формы
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormPhase {
    #[default]
    Editing,
    Submitting,
    /// Экран подтверждения с созданной заявкой
    Submitted(Box<CreatedWbOrder>),
}

/// Состояние отправки формы заявки
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderFormState {
    pub phase: FormPhase,
    pub errors: FieldErrors,
}

impl OrderFormState {
    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn created(&self) -> Option<&CreatedWbOrder> {
        match &self.phase {
            FormPhase::Submitted(order) => Some(order),
            _ => None,
        }
    }

    pub fn error(&self, field: &str) -> Option<String> {
        self.errors.get(field).map(str::to_string)
    }

    /// Validates and enters `Submitting`; `None` keeps the form open with its errors
    pub fn begin_submit(
        &mut self,
        draft: &WbOrderDraft,
        qr: Option<&QrFileMeta>,
    ) -> Option<CreateWbOrderRequest> {
        if self.phase != FormPhase::Editing {
            return None;
        }
        match validate_create(draft, qr) {
            Ok(request) => {
                self.errors = FieldErrors::new();
                self.phase = FormPhase::Submitting;
                Some(request)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    /// The server answered; a failure returns the form to editing
    pub fn finish<E>(&mut self, result: Result<CreatedWbOrder, E>) -> Result<(), E> {
        match result {
            Ok(created) => {
                self.phase = FormPhase::Submitted(Box::new(created));
                Ok(())
            }
            Err(e) => {
                self.phase = FormPhase::Editing;
                Err(e)
            }
        }
    }

    /// "Оформить заявку" again from the confirmation screen
    pub fn start_over(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_wb_order::validation::{FIELD_FULL_NAME, FIELD_QR};
    use contracts::domain::a001_wb_order::{OrderStatus, WbOrder};

    fn draft() -> WbOrderDraft {
        WbOrderDraft {
            full_name: "иванов иван иванович".into(),
            phone: "+7 900 123-45-67".into(),
            wb_phone: "+79001234567".into(),
            order_code: "12345".into(),
        }
    }

    fn created() -> CreatedWbOrder {
        CreatedWbOrder {
            order: WbOrder {
                id: "n1".into(),
                name: "Иванов Иван Иванович".into(),
                phone: "+7 900 123-45-67".into(),
                wb_phone: Some("+79001234567".into()),
                order_code: Some("12345".into()),
                qr_code: None,
                status: OrderStatus::NotAssembled,
                created_at: 0,
                updated_at: 0,
            },
            qr_code_file: None,
        }
    }

    #[test]
    fn test_invalid_draft_never_submits() {
        let mut state = OrderFormState::default();
        let mut bad = draft();
        bad.full_name = "Иванов".into();
        bad.order_code.clear();
        assert_eq!(state.begin_submit(&bad, None), None);
        assert!(state.error(FIELD_FULL_NAME).is_some());
        assert!(state.error(FIELD_QR).is_some());
        assert_eq!(state.phase, FormPhase::Editing);
    }

    #[test]
    fn test_valid_draft_is_normalized_and_single_flight() {
        let mut state = OrderFormState::default();
        let request = state.begin_submit(&draft(), None).unwrap();
        assert_eq!(request.full_name, "Иванов Иван Иванович");
        assert!(state.is_submitting());
        assert_eq!(state.begin_submit(&draft(), None), None);
    }

    #[test]
    fn test_failure_returns_to_editing() {
        let mut state = OrderFormState::default();
        state.begin_submit(&draft(), None);
        assert_eq!(state.finish::<&str>(Err("boom")), Err("boom"));
        assert_eq!(state.phase, FormPhase::Editing);
    }

    #[test]
    fn test_success_then_start_over() {
        let mut state = OrderFormState::default();
        state.begin_submit(&draft(), None);
        state.finish::<()>(Ok(created())).unwrap();
        assert_eq!(state.created().map(|c| c.order.id.as_str()), Some("n1"));
        state.start_over();
        assert_eq!(state, OrderFormState::default());
    }
}
