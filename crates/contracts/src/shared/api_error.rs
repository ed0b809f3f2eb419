use serde::{Deserialize, Serialize};

/// Тело ответа сервера с бизнес-ошибкой: `{ "errors": [{ "message": "..." }] }`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApiErrorPayload {
    #[serde(default)]
    pub errors: Vec<ApiErrorItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorItem {
    pub message: String,
}

impl ApiErrorPayload {
    /// Message shown to the user: the first reported error
    pub fn first_message(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_message() {
        let payload: ApiErrorPayload =
            serde_json::from_str(r#"{"errors":[{"message":"Заявка не найдена"},{"message":"x"}]}"#)
                .unwrap();
        assert_eq!(payload.first_message(), Some("Заявка не найдена"));
        let empty: ApiErrorPayload = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.first_message(), None);
    }
}
