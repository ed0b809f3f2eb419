use crate::shared::field_errors::FieldErrors;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

impl UserInfo {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

/// Минимальная проверка адреса: `local@domain.tld`
pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .map(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
            .unwrap_or(false)
}

pub fn validate_login(login: &str, password: &str) -> Result<LoginRequest, FieldErrors> {
    let mut errors = FieldErrors::new();
    if login.trim().is_empty() {
        errors.add("login", "Логин обязателен!");
    }
    if password.is_empty() {
        errors.add("password", "Пароль обязателен");
    }
    errors.into_result(LoginRequest {
        login: login.trim().to_string(),
        password: password.to_string(),
    })
}

pub fn validate_signup(
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<SignupRequest, FieldErrors> {
    let mut errors = FieldErrors::new();
    if email.trim().is_empty() {
        errors.add("email", "E-mail обязателен!");
    } else if !is_valid_email(email) {
        errors.add("email", "E-mail некорректен!");
    }
    if password.is_empty() {
        errors.add("password", "Пароль обязателен!");
    }
    if confirm.is_empty() {
        errors.add("confirm", "Подтвердите пароль!");
    } else if password != confirm {
        errors.add("confirm", "Пароли не совпадают!");
    }
    let name = name.trim();
    errors.into_result(SignupRequest {
        name: (!name.is_empty()).then(|| name.to_string()),
        email: email.trim().to_string(),
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(is_valid_email("user@example.com"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a b@example.com"));
        assert!(!is_valid_email("a@b@c.com"));
    }

    #[test]
    fn test_signup_password_mismatch() {
        let errors = validate_signup("", "user@example.com", "secret", "secreT").unwrap_err();
        assert_eq!(errors.get("confirm"), Some("Пароли не совпадают!"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_signup_ok() {
        let req = validate_signup(" Анна ", "user@example.com", "pw", "pw").unwrap();
        assert_eq!(req.name.as_deref(), Some("Анна"));
    }

    #[test]
    fn test_login_required_fields() {
        let errors = validate_login(" ", "").unwrap_err();
        assert!(errors.get("login").is_some());
        assert!(errors.get("password").is_some());
    }
}
