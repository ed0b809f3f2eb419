//! Лента заявок для администратора
//!
//! - filter_codec.rs: URL query <-> filter state
//! - feed_url.rs: reading and writing that state through the router
//! - feed.rs: page cache binding for the feed
//! - live.rs: new-order event stream
//! - highlight.rs: per-row visual state
//! - filter_panel.rs, view.rs: components

pub mod feed;
pub mod feed_url;
pub mod filter_codec;
mod filter_panel;
pub mod highlight;
pub mod live;
mod view;

pub use feed::{provide_feed_client, use_infinite_wb_orders, FeedHandle, WbOrdersFeedClient};
pub use view::WbOrdersAdminPage;
