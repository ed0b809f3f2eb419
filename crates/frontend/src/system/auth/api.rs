//! Запросы сессии. Сервер держит сессию в cookie, токены на клиенте не хранятся.

use crate::shared::api_utils::{get_json, post, post_json, send, ApiError};
use contracts::system::auth::{LoginRequest, SignupRequest, UserInfo};

pub async fn login(request: &LoginRequest) -> Result<UserInfo, ApiError> {
    post_json("/api/auth/login", request).await
}

pub async fn signup(request: &SignupRequest) -> Result<UserInfo, ApiError> {
    post_json("/api/auth/signup", request).await
}

pub async fn logout() -> Result<(), ApiError> {
    let request = post("/api/auth/logout")
        .build()
        .map_err(|e| ApiError::Encode(e.to_string()))?;
    send(request).await.map(|_| ())
}

/// Текущий пользователь; 401 означает гостя
pub async fn me() -> Result<Option<UserInfo>, ApiError> {
    match get_json::<UserInfo>("/api/auth/me").await {
        Ok(user) => Ok(Some(user)),
        Err(e) if e.is_unauthorized() => Ok(None),
        Err(e) => Err(e),
    }
}
