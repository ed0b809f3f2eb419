//! Server-sent events of the new-orders stream

use super::aggregate::WbOrder;

/// SSE endpoint streaming newly created orders
pub const EVENTS_PATH: &str = "/api/wb-orders/events";

/// Event name of an order-created message; `data` is a JSON [`WbOrder`]
pub const ORDER_CREATED_EVENT: &str = "order_created";

pub fn parse_order_created(data: &str) -> Result<WbOrder, serde_json::Error> {
    serde_json::from_str(data)
}
