//! API utilities for frontend-backend communication
//!
//! Every request carries the session cookie. Non-2xx responses are turned
//! into [`ApiError`] using the structured `{ "errors": [...] }` payload when
//! the server sends one.

use crate::shared::config::app_config;
use contracts::shared::api_error::ApiErrorPayload;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use web_sys::RequestCredentials;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Business error reported by the server
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("Failed to send request: {0}")]
    Network(String),
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error("Failed to serialize request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Classify a non-2xx response by its body
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ApiErrorPayload>(body)
            .ok()
            .and_then(|p| p.first_message().map(str::to_string))
            .unwrap_or_else(|| match status {
                401 => "Требуется вход".to_string(),
                403 => "Недостаточно прав".to_string(),
                404 => "Не найдено".to_string(),
                _ => format!("Ошибка сервера: {}", status),
            });
        ApiError::Api { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Текст для уведомления
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Api { message, .. } => message.clone(),
            other => format!("{} (╯‵□′)╯︵┻━┻", other),
        }
    }
}

/// Build a full API URL from a path
pub fn api_url(path: &str) -> String {
    format!("{}{}", app_config().api_base, path)
}

pub fn get(path: &str) -> RequestBuilder {
    Request::get(&api_url(path)).credentials(RequestCredentials::Include)
}

pub fn post(path: &str) -> RequestBuilder {
    Request::post(&api_url(path)).credentials(RequestCredentials::Include)
}

pub fn put(path: &str) -> RequestBuilder {
    Request::put(&api_url(path)).credentials(RequestCredentials::Include)
}

pub fn with_json<B: Serialize>(builder: RequestBuilder, body: &B) -> Result<Request, ApiError> {
    builder.json(body).map_err(|e| ApiError::Encode(e.to_string()))
}

pub async fn send(request: Request) -> Result<Response, ApiError> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_response(status, &body))
}

pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let request = get(path)
        .build()
        .map_err(|e| ApiError::Encode(e.to_string()))?;
    read_json(send(request).await?).await
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let response = send(with_json(post(path), body)?).await?;
    read_json(response).await
}

pub async fn put_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let response = send(with_json(put(path), body)?).await?;
    read_json(response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_error_message() {
        let body = r#"{"errors":[{"message":"Заявка не найдена"}]}"#;
        let err = ApiError::from_response(404, body);
        assert_eq!(
            err,
            ApiError::Api {
                status: 404,
                message: "Заявка не найдена".into()
            }
        );
        assert_eq!(err.user_message(), "Заявка не найдена");
    }

    #[test]
    fn test_unstructured_error_falls_back_to_status() {
        let err = ApiError::from_response(502, "<html>Bad gateway</html>");
        assert_eq!(err.user_message(), "Ошибка сервера: 502");
        assert!(ApiError::from_response(401, "").is_unauthorized());
    }

    #[test]
    fn test_transport_error_message() {
        let err = ApiError::Network("timeout".into());
        assert_eq!(
            err.user_message(),
            "Failed to send request: timeout (╯‵□′)╯︵┻━┻"
        );
        assert_eq!(err.status(), None);
    }
}
