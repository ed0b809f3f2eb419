use contracts::domain::a001_wb_order::{
    CreateWbOrderRequest, CreatedWbOrder, UpdateWbOrderRequest, WbOrder, WbOrdersPage,
    WbOrdersPageRequest,
};
use futures::future::{FutureExt, LocalBoxFuture};
use wasm_bindgen::JsValue;

use super::ui::list::filter_codec::FilterTuple;
use crate::shared::api_utils::{self, ApiError};

/// Одна страница ленты заявок
pub async fn fetch_page(request: &WbOrdersPageRequest) -> Result<WbOrdersPage, ApiError> {
    api_utils::post_json("/api/wb-orders/page", request).await
}

/// Page loader registered with the query cache
pub fn fetch_feed_page(
    filter: FilterTuple,
    cursor: Option<String>,
) -> LocalBoxFuture<'static, Result<WbOrdersPage, ApiError>> {
    async move { fetch_page(&filter.page_request(cursor)).await }.boxed_local()
}

pub async fn fetch_by_id(id: &str) -> Result<WbOrder, ApiError> {
    api_utils::get_json(&format!("/api/wb-orders/{}", urlencoding::encode(id))).await
}

pub async fn update(request: &UpdateWbOrderRequest) -> Result<WbOrder, ApiError> {
    api_utils::put_json(
        &format!("/api/wb-orders/{}", urlencoding::encode(&request.id)),
        request,
    )
    .await
}

fn form_error(e: JsValue) -> ApiError {
    ApiError::Encode(format!("{:?}", e))
}

/// Multipart: `payload` with the JSON request, `qr` with the image if attached
pub async fn create(
    request: &CreateWbOrderRequest,
    qr: Option<&web_sys::File>,
) -> Result<CreatedWbOrder, ApiError> {
    let payload = serde_json::to_string(request).map_err(|e| ApiError::Encode(e.to_string()))?;
    let form = web_sys::FormData::new().map_err(form_error)?;
    form.append_with_str("payload", &payload)
        .map_err(form_error)?;
    if let Some(file) = qr {
        form.append_with_blob_and_filename("qr", file, &file.name())
            .map_err(form_error)?;
    }

    let request = api_utils::post("/api/wb-orders")
        .body(form)
        .map_err(|e| ApiError::Encode(e.to_string()))?;
    let response = api_utils::send(request).await?;
    api_utils::read_json(response).await
}
