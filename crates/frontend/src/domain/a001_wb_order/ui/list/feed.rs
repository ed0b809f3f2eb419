//! Лента заявок поверх общего кэша страниц.

use super::filter_codec::FilterTuple;
use crate::domain::a001_wb_order::api;
use crate::shared::api_utils::ApiError;
use crate::shared::query::{
    use_infinite_query, InfinitePage, InfiniteQueryClient, InfiniteQueryHandle, QueryClientConfig,
};
use contracts::domain::a001_wb_order::WbOrdersPage;
use leptos::prelude::*;

/// Cache namespace of the admin feed
pub const FEED_NAMESPACE: &str = "WbOrders";

pub type WbOrdersFeedClient = InfiniteQueryClient<WbOrdersPage, ApiError>;
pub type FeedHandle = InfiniteQueryHandle<FilterTuple, WbOrdersPage, ApiError>;

impl InfinitePage for WbOrdersPage {
    fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    fn end_cursor(&self) -> Option<String> {
        self.end_cursor.clone()
    }
}

/// Создаёт клиент кэша и кладёт его в контекст; вызывается в корне приложения
pub fn provide_feed_client(config: QueryClientConfig) -> WbOrdersFeedClient {
    let client = WbOrdersFeedClient::new(config);
    provide_context(client);
    client
}

pub fn use_feed_client() -> WbOrdersFeedClient {
    use_context::<WbOrdersFeedClient>().expect("WbOrdersFeedClient not provided in context")
}

pub fn use_infinite_wb_orders(filter: Signal<FilterTuple>) -> FeedHandle {
    use_infinite_query(use_feed_client(), FEED_NAMESPACE, filter, api::fetch_feed_page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_wb_order::ui::list::filter_codec::decode;
    use crate::domain::a001_wb_order::ui::list::live::LiveUpdates;
    use crate::shared::query::{InfiniteQuery, QueryKey};
    use contracts::domain::a001_wb_order::{OrderStatus, StatusFilter, WbOrder};

    fn order(id: &str) -> WbOrder {
        WbOrder {
            id: id.into(),
            name: "Сидоров Сидор Сидорович".into(),
            phone: "+79005556677".into(),
            wb_phone: None,
            order_code: None,
            qr_code: Some("qr.webp".into()),
            status: OrderStatus::NotAssembled,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn page(ids: &[&str]) -> WbOrdersPage {
        WbOrdersPage {
            edges: ids.iter().map(|id| order(id)).collect(),
            has_next_page: false,
            end_cursor: ids.last().map(|id| id.to_string()),
        }
    }

    fn ids(q: &InfiniteQuery<WbOrdersPage, ApiError>) -> Vec<String> {
        q.pages()
            .iter()
            .flat_map(|p| p.edges.iter().map(|o| o.id.clone()))
            .collect()
    }

    #[test]
    fn test_status_param_scopes_requests_and_key() {
        let rejected = decode("sort_by_status=rejected").filter;
        let request = rejected.page_request(None);
        assert_eq!(request.status, StatusFilter::Only(OrderStatus::Rejected));

        let cleared = decode("").filter;
        assert_eq!(cleared.page_request(None).status, StatusFilter::All);
        assert_ne!(
            QueryKey::new(FEED_NAMESPACE, &rejected),
            QueryKey::new(FEED_NAMESPACE, &cleared)
        );
    }

    #[test]
    fn test_live_event_refetches_active_feed_once() {
        let mut feed: InfiniteQuery<WbOrdersPage, ApiError> = InfiniteQuery::new();
        let t = feed.begin_refetch().unwrap();
        feed.complete(&t, Ok(page(&["A"])), 1);
        assert_eq!(ids(&feed), vec!["A"]);

        let mut live = LiveUpdates::default();
        let x = order("X");
        assert!(live.receive(&x).is_some());
        feed.invalidate();
        assert!(feed.needs_fetch());
        // the old list stays on screen until the reload lands
        assert_eq!(ids(&feed), vec!["A"]);

        let t = feed.begin_refetch().unwrap();
        assert_eq!(t.cursor, None);
        feed.complete(&t, Ok(page(&["X", "A"])), 2);
        assert_eq!(ids(&feed), vec!["X", "A"]);
        assert!(!feed.needs_fetch());

        // second delivery of the same order changes nothing
        assert!(live.receive(&x).is_none());
    }

    #[test]
    fn test_page_trait_reads_wire_fields() {
        let p = WbOrdersPage {
            edges: vec![],
            has_next_page: true,
            end_cursor: Some("c1".into()),
        };
        assert!(InfinitePage::has_next_page(&p));
        assert_eq!(InfinitePage::end_cursor(&p).as_deref(), Some("c1"));
    }
}
