use super::aggregate::{OrderStatus, SearchType, StatusFilter, WbOrder};
use serde::{Deserialize, Serialize};

/// Запрос одной страницы ленты заявок
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WbOrdersPageRequest {
    pub take: u32,
    /// Курсор конца предыдущей страницы, `None` для первой
    pub cursor: Option<String>,
    pub status: StatusFilter,
    pub query: String,
    pub search_type: Vec<SearchType>,
}

/// Одна страница ленты
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WbOrdersPage {
    pub edges: Vec<WbOrder>,
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// Полная запись заявки с новым статусом.
///
/// The server expects every field back, not a sparse patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWbOrderRequest {
    pub id: String,
    pub status: OrderStatus,
    pub name: String,
    pub phone: String,
    pub qr_code: Option<String>,
    pub wb_phone: Option<String>,
    pub order_code: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl UpdateWbOrderRequest {
    pub fn with_status(order: &WbOrder, status: OrderStatus) -> Self {
        Self {
            id: order.id.clone(),
            status,
            name: order.name.clone(),
            phone: order.phone.clone(),
            qr_code: order.qr_code.clone(),
            wb_phone: order.wb_phone.clone(),
            order_code: order.order_code.clone(),
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

/// JSON part of the multipart create request; the QR image travels as a separate `qr` part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWbOrderRequest {
    /// Нормализованное ФИО
    #[serde(rename = "FLP")]
    pub full_name: String,
    pub phone: String,
    pub wb_phone: Option<String>,
    pub order_code: Option<String>,
}

/// Содержимое загруженного QR-кода, возвращаемое после создания
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeFile {
    #[serde(rename = "type")]
    pub content_type: String,
    /// Base64 encoded image bytes
    pub data: String,
}

impl QrCodeFile {
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.content_type, self.data)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedWbOrder {
    #[serde(flatten)]
    pub order: WbOrder,
    #[serde(default)]
    pub qr_code_file: Option<QrCodeFile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_wire_shape() {
        let req = WbOrdersPageRequest {
            take: 30,
            cursor: None,
            status: StatusFilter::Only(OrderStatus::Rejected),
            query: "иван".into(),
            search_type: vec![SearchType::Name, SearchType::WbPhone],
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["status"], "REJECTED");
        assert_eq!(value["searchType"][1], "WB_PHONE");
        assert!(value["cursor"].is_null());
    }

    #[test]
    fn test_created_order_flattened() {
        let json = r#"{
            "id": "42", "name": "Петров Пётр Петрович", "phone": "+79000000000",
            "wbPhone": null, "orderCode": null, "qrCode": "42.png",
            "status": "NOT_ASSEMBLED", "createdAt": 1, "updatedAt": 1,
            "qrCodeFile": { "type": "image/png", "data": "AAAA" }
        }"#;
        let created: CreatedWbOrder = serde_json::from_str(json).unwrap();
        assert_eq!(created.order.id, "42");
        assert_eq!(
            created.qr_code_file.unwrap().data_url(),
            "data:image/png;base64,AAAA"
        );
    }

    #[test]
    fn test_create_request_uses_flp_key() {
        let req = CreateWbOrderRequest {
            full_name: "Иванов Иван Иванович".into(),
            phone: "+79001234567".into(),
            wb_phone: None,
            order_code: Some("12345".into()),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["FLP"], "Иванов Иван Иванович");
        assert_eq!(value["orderCode"], "12345");
    }
}
