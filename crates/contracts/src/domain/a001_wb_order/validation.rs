//! Правила валидации публичной формы оформления заявки

use super::dto::CreateWbOrderRequest;
use crate::shared::field_errors::FieldErrors;
use serde::{Deserialize, Serialize};

pub const MAX_QR_FILE_SIZE: u64 = 5_000_000;
pub const ACCEPTED_QR_TYPES: [&str; 4] = ["image/jpg", "image/jpeg", "image/png", "image/webp"];
pub const ORDER_CODE_LEN: usize = 5;

pub const FIELD_FULL_NAME: &str = "full_name";
pub const FIELD_PHONE: &str = "phone";
pub const FIELD_WB_PHONE: &str = "wb_phone";
pub const FIELD_ORDER_CODE: &str = "order_code";
pub const FIELD_QR: &str = "qr";

/// Черновик формы. Persisted between visits, so it never holds the QR file itself.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WbOrderDraft {
    pub full_name: String,
    pub phone: String,
    pub wb_phone: String,
    pub order_code: String,
}

/// Метаданные выбранного файла QR-кода
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrFileMeta {
    pub name: String,
    pub size: u64,
    pub content_type: String,
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_lowercase() || ('а'..='я').contains(&c)
}

/// Фамилия, имя и отчество: ровно три слова из латинских или русских букв
pub fn is_valid_full_name(value: &str) -> bool {
    let parts: Vec<&str> = value.split_whitespace().collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|part| part.to_lowercase().chars().all(is_name_char))
}

/// "иВАНОВ  иван" -> "Иванов Иван"
pub fn normalize_full_name(value: &str) -> String {
    value
        .split_whitespace()
        .map(|part| {
            let lower = part.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Optional leading `+` and 10 to 15 digits once separators are removed
pub fn is_possible_phone(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    let digits = compact.strip_prefix('+').unwrap_or(&compact);
    (10..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

pub fn is_valid_order_code(value: &str) -> bool {
    value.chars().count() == ORDER_CODE_LEN
}

pub fn validate_qr_file(meta: &QrFileMeta) -> Result<(), String> {
    if meta.size > MAX_QR_FILE_SIZE {
        return Err("Максимальный размер файла не должен превышать 5 мегабайт.".to_string());
    }
    if !ACCEPTED_QR_TYPES.contains(&meta.content_type.as_str()) {
        return Err(
            ".jpg, .jpeg, .png, .webp расширения файла необходимо прикреплять!".to_string(),
        );
    }
    Ok(())
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Проверяет черновик и собирает запрос на создание заявки.
///
/// Every field is checked so the form can show all errors at once. The
/// cross-field rule (WB phone with pickup code, or a QR image) is reported on
/// the QR field.
pub fn validate_create(
    draft: &WbOrderDraft,
    qr: Option<&QrFileMeta>,
) -> Result<CreateWbOrderRequest, FieldErrors> {
    let mut errors = FieldErrors::new();

    if draft.full_name.trim().is_empty() {
        errors.add(FIELD_FULL_NAME, "ФИО обязательно к заполнению!");
    } else if !is_valid_full_name(&draft.full_name) {
        errors.add(FIELD_FULL_NAME, "Необходимо заполнить Имя, Фамилию и Отчество");
    }

    if draft.phone.trim().is_empty() {
        errors.add(FIELD_PHONE, "Телефон обязателен к заполнению!");
    } else if !is_possible_phone(&draft.phone) {
        errors.add(
            FIELD_PHONE,
            "Проверьте пожалуйста еще раз! Телефон не заполнен до конца!",
        );
    }

    let wb_phone = non_empty(&draft.wb_phone);
    if let Some(ref phone) = wb_phone {
        if !is_possible_phone(phone) {
            errors.add(
                FIELD_WB_PHONE,
                "Проверьте пожалуйста еще раз! Телефон не заполнен до конца!",
            );
        }
    }

    let order_code = non_empty(&draft.order_code);
    if let Some(ref code) = order_code {
        if !is_valid_order_code(code) {
            errors.add(FIELD_ORDER_CODE, "Код не заполнен!");
        }
    }

    if let Some(meta) = qr {
        if let Err(message) = validate_qr_file(meta) {
            errors.add(FIELD_QR, message);
        }
    }

    let wb_filled = wb_phone.is_some() && order_code.is_some();
    if !wb_filled && qr.is_none() {
        errors.add(
            FIELD_QR,
            "Заполните либо (Телефон Wb и Код для получения заказа), либо прикрепите QR-код, либо все вместе",
        );
    }

    errors.into_result(CreateWbOrderRequest {
        full_name: normalize_full_name(&draft.full_name),
        phone: draft.phone.trim().to_string(),
        wb_phone,
        order_code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> WbOrderDraft {
        WbOrderDraft {
            full_name: "иванов иван иванович".into(),
            phone: "+7 (900) 123-45-67".into(),
            wb_phone: "+79001234567".into(),
            order_code: "12345".into(),
        }
    }

    fn png(size: u64) -> QrFileMeta {
        QrFileMeta {
            name: "qr.png".into(),
            size,
            content_type: "image/png".into(),
        }
    }

    #[test]
    fn test_full_name_rules() {
        assert!(is_valid_full_name("Иванов Иван Иванович"));
        assert!(is_valid_full_name("  smith   john  paul "));
        assert!(!is_valid_full_name("Иванов Иван"));
        assert!(!is_valid_full_name("Иванов Иван Иванович2"));
        assert!(!is_valid_full_name("Иванов-Петров Иван Иванович"));
    }

    #[test]
    fn test_normalize_full_name() {
        assert_eq!(
            normalize_full_name(" иВАНОВ  иван   иваНОВИЧ "),
            "Иванов Иван Иванович"
        );
    }

    #[test]
    fn test_phone_rules() {
        assert!(is_possible_phone("+79001234567"));
        assert!(is_possible_phone("8 900 123-45-67"));
        assert!(!is_possible_phone("+7900"));
        assert!(!is_possible_phone("+7900123456a"));
    }

    #[test]
    fn test_valid_with_wb_credentials() {
        let req = validate_create(&draft(), None).unwrap();
        assert_eq!(req.full_name, "Иванов Иван Иванович");
        assert_eq!(req.order_code.as_deref(), Some("12345"));
    }

    #[test]
    fn test_valid_with_qr_only() {
        let mut d = draft();
        d.wb_phone.clear();
        d.order_code.clear();
        let req = validate_create(&d, Some(&png(1024))).unwrap();
        assert_eq!(req.wb_phone, None);
        assert_eq!(req.order_code, None);
    }

    #[test]
    fn test_missing_pickup_credentials_reported_on_qr() {
        let mut d = draft();
        d.order_code.clear();
        let errors = validate_create(&d, None).unwrap_err();
        assert!(errors.get(FIELD_QR).is_some());
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_short_order_code() {
        let mut d = draft();
        d.order_code = "123".into();
        let errors = validate_create(&d, Some(&png(10))).unwrap_err();
        assert_eq!(errors.get(FIELD_ORDER_CODE), Some("Код не заполнен!"));
    }

    #[test]
    fn test_qr_file_limits() {
        assert!(validate_qr_file(&png(MAX_QR_FILE_SIZE)).is_ok());
        assert!(validate_qr_file(&png(MAX_QR_FILE_SIZE + 1)).is_err());
        let gif = QrFileMeta {
            name: "qr.gif".into(),
            size: 10,
            content_type: "image/gif".into(),
        };
        assert!(validate_qr_file(&gif).is_err());
    }

    #[test]
    fn test_all_errors_collected() {
        let errors = validate_create(&WbOrderDraft::default(), None).unwrap_err();
        assert!(errors.get(FIELD_FULL_NAME).is_some());
        assert!(errors.get(FIELD_PHONE).is_some());
        assert!(errors.get(FIELD_QR).is_some());
    }
}
