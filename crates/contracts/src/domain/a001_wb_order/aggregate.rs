use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Статус заявки на выдачу заказа Wildberries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Assembled,
    NotAssembled,
    Rejected,
}

impl OrderStatus {
    pub fn all() -> [OrderStatus; 3] {
        [
            OrderStatus::Assembled,
            OrderStatus::NotAssembled,
            OrderStatus::Rejected,
        ]
    }

    /// Wire name, e.g. `NOT_ASSEMBLED`
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Assembled => "ASSEMBLED",
            OrderStatus::NotAssembled => "NOT_ASSEMBLED",
            OrderStatus::Rejected => "REJECTED",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Assembled => "СОБРАН",
            OrderStatus::NotAssembled => "НЕСОБРАН",
            OrderStatus::Rejected => "ОТКЛОНЕН",
        }
    }

    /// Case-insensitive match against the wire names
    pub fn parse(value: &str) -> Option<Self> {
        let upper = value.trim().to_uppercase();
        Self::all().into_iter().find(|s| s.as_str() == upper)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Поле, по которому ищется текст запроса
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchType {
    Id,
    Name,
    Phone,
    WbPhone,
}

impl SearchType {
    /// Canonical order, also the default search set
    pub fn all() -> Vec<SearchType> {
        vec![
            SearchType::Id,
            SearchType::Name,
            SearchType::Phone,
            SearchType::WbPhone,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Id => "ID",
            SearchType::Name => "NAME",
            SearchType::Phone => "PHONE",
            SearchType::WbPhone => "WB_PHONE",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SearchType::Id => "ID",
            SearchType::Name => "ФИО",
            SearchType::Phone => "ТЕЛЕФОН",
            SearchType::WbPhone => "ТЕЛЕФОН WB",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::all().into_iter().find(|t| t.as_str() == value)
    }
}

/// Фильтр ленты по статусу: все заявки или только один статус.
///
/// On the wire this is a plain string, `ALL` or one of the [`OrderStatus`] names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    pub const ALL: &'static str = "ALL";

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => Self::ALL,
            StatusFilter::Only(status) => status.as_str(),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StatusFilter::All => "ВСЕ",
            StatusFilter::Only(status) => status.display_name(),
        }
    }

    /// Never fails: anything that is not a status name means `All`
    pub fn parse_lenient(value: &str) -> Self {
        OrderStatus::parse(value)
            .map(StatusFilter::Only)
            .unwrap_or(StatusFilter::All)
    }

    pub fn options() -> [StatusFilter; 4] {
        [
            StatusFilter::All,
            StatusFilter::Only(OrderStatus::Assembled),
            StatusFilter::Only(OrderStatus::NotAssembled),
            StatusFilter::Only(OrderStatus::Rejected),
        ]
    }
}

impl From<StatusFilter> for String {
    fn from(value: StatusFilter) -> Self {
        value.as_str().to_string()
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.eq_ignore_ascii_case(Self::ALL) {
            return Ok(StatusFilter::All);
        }
        OrderStatus::parse(&value)
            .map(StatusFilter::Only)
            .ok_or_else(|| format!("Unknown status filter: {}", value))
    }
}

/// Заявка на выдачу заказа Wildberries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WbOrder {
    pub id: String,
    /// ФИО клиента
    pub name: String,
    pub phone: String,
    /// Телефон аккаунта Wildberries
    #[serde(default)]
    pub wb_phone: Option<String>,
    /// Код для получения заказа, ровно 5 символов
    #[serde(default)]
    pub order_code: Option<String>,
    /// Имя файла QR-кода на сервере
    #[serde(default)]
    pub qr_code: Option<String>,
    pub status: OrderStatus,
    /// Epoch milliseconds
    pub created_at: i64,
    /// Epoch milliseconds
    pub updated_at: i64,
}

impl WbOrder {
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.created_at)
    }

    pub fn updated_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.updated_at)
    }

    /// Creation invariant: QR code, or WB phone together with the pickup code
    pub fn has_pickup_credentials(&self) -> bool {
        self.qr_code.is_some() || (self.wb_phone.is_some() && self.order_code.is_some())
    }

    /// Path of the QR image served by the backend
    pub fn qr_code_path(&self) -> Option<String> {
        self.qr_code
            .as_ref()
            .map(|file| format!("/assets/qr-codes/{}", file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> WbOrder {
        WbOrder {
            id: "abc123".into(),
            name: "Иванов Иван Иванович".into(),
            phone: "+79001234567".into(),
            wb_phone: None,
            order_code: None,
            qr_code: Some("qr.png".into()),
            status: OrderStatus::NotAssembled,
            created_at: 1_700_000_000_000,
            updated_at: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!(OrderStatus::parse("rejected"), Some(OrderStatus::Rejected));
        assert_eq!(
            OrderStatus::parse("Not_Assembled"),
            Some(OrderStatus::NotAssembled)
        );
        assert_eq!(OrderStatus::parse("DONE"), None);
    }

    #[test]
    fn test_status_filter_lenient() {
        assert_eq!(StatusFilter::parse_lenient(""), StatusFilter::All);
        assert_eq!(StatusFilter::parse_lenient("all"), StatusFilter::All);
        assert_eq!(StatusFilter::parse_lenient("garbage"), StatusFilter::All);
        assert_eq!(
            StatusFilter::parse_lenient("assembled"),
            StatusFilter::Only(OrderStatus::Assembled)
        );
    }

    #[test]
    fn test_status_filter_wire_format() {
        let json = serde_json::to_string(&StatusFilter::Only(OrderStatus::Rejected)).unwrap();
        assert_eq!(json, "\"REJECTED\"");
        let back: StatusFilter = serde_json::from_str("\"ALL\"").unwrap();
        assert_eq!(back, StatusFilter::All);
        assert!(serde_json::from_str::<StatusFilter>("\"NOPE\"").is_err());
    }

    #[test]
    fn test_order_camel_case_shape() {
        let value = serde_json::to_value(order()).unwrap();
        assert_eq!(value["qrCode"], "qr.png");
        assert_eq!(value["status"], "NOT_ASSEMBLED");
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn test_pickup_credentials() {
        let mut o = order();
        assert!(o.has_pickup_credentials());
        o.qr_code = None;
        assert!(!o.has_pickup_credentials());
        o.wb_phone = Some("+79001234567".into());
        assert!(!o.has_pickup_credentials());
        o.order_code = Some("12345".into());
        assert!(o.has_pickup_credentials());
    }

    #[test]
    fn test_search_type_names() {
        assert_eq!(
            serde_json::to_string(&SearchType::WbPhone).unwrap(),
            "\"WB_PHONE\""
        );
        assert_eq!(SearchType::parse("NAME"), Some(SearchType::Name));
        assert_eq!(SearchType::parse("name"), None);
    }
}
