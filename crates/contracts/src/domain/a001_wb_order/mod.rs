pub mod aggregate;
pub mod dto;
pub mod events;
pub mod validation;

pub use aggregate::{OrderStatus, SearchType, StatusFilter, WbOrder};
pub use dto::{
    CreateWbOrderRequest, CreatedWbOrder, QrCodeFile, UpdateWbOrderRequest, WbOrdersPage,
    WbOrdersPageRequest,
};
