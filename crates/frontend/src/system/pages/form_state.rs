use contracts::shared::field_errors::FieldErrors;

/// Состояние формы входа / регистрации
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthFormState {
    pub submitting: bool,
    pub errors: FieldErrors,
}

impl AuthFormState {
    pub fn error(&self, field: &str) -> Option<String> {
        self.errors.get(field).map(str::to_string)
    }

    /// Validation result in, request out; one request at a time
    pub fn begin<T>(&mut self, validated: Result<T, FieldErrors>) -> Option<T> {
        if self.submitting {
            return None;
        }
        match validated {
            Ok(request) => {
                self.errors = FieldErrors::new();
                self.submitting = true;
                Some(request)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    pub fn finish(&mut self) {
        self.submitting = false;
    }
}
