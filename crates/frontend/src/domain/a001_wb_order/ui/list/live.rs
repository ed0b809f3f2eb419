//! Подписка на новые заявки (server-sent events).
//!
//! [`LiveUpdates`] decides what an incoming event means for the feed;
//! [`use_new_wb_order_subscription`] owns the `EventSource` for the lifetime
//! of the calling component.

use contracts::domain::a001_wb_order::events::{parse_order_created, EVENTS_PATH, ORDER_CREATED_EVENT};
use contracts::domain::a001_wb_order::WbOrder;
use futures::channel::oneshot;
use futures::StreamExt;
use gloo_net::eventsource::futures::EventSource;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::{HashSet, VecDeque};

use crate::shared::api_utils::api_url;

pub const NEW_ORDER_TOAST_TITLE: &str = "Клиент только что оформил заявку";
pub const NEW_ORDER_TOAST_MS: u32 = 5000;
pub const CONNECTION_LOST_TITLE: &str = "Нет связи с сервером уведомлений";

/// Сколько последних id помнить для отсева повторов
pub const SEEN_LIMIT: usize = 200;

/// Что показать по новой заявке
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderNotice {
    pub id: String,
}

impl NewOrderNotice {
    pub fn title(&self) -> &'static str {
        NEW_ORDER_TOAST_TITLE
    }

    pub fn description(&self) -> String {
        format!("Номер заявки: {}", self.id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveUpdates {
    seen: HashSet<String>,
    seen_order: VecDeque<String>,
    just_inserted: Option<String>,
    connection_lost: bool,
}

impl LiveUpdates {
    /// `None` for a repeated delivery of one of the last [`SEEN_LIMIT`] orders
    pub fn receive(&mut self, order: &WbOrder) -> Option<NewOrderNotice> {
        self.connection_lost = false;
        if !self.seen.insert(order.id.clone()) {
            log::debug!("duplicate order_created for {}", order.id);
            return None;
        }
        self.seen_order.push_back(order.id.clone());
        while self.seen_order.len() > SEEN_LIMIT {
            if let Some(oldest) = self.seen_order.pop_front() {
                self.seen.remove(&oldest);
            }
        }
        self.just_inserted = Some(order.id.clone());
        Some(NewOrderNotice {
            id: order.id.clone(),
        })
    }

    pub fn just_inserted(&self) -> Option<&str> {
        self.just_inserted.as_deref()
    }

    /// True only for the first error after a working period
    pub fn connection_error(&mut self) -> bool {
        !std::mem::replace(&mut self.connection_lost, true)
    }
}

/// Events delivered by the subscription
#[derive(Debug, Clone)]
pub enum LiveEvent {
    OrderCreated(WbOrder),
    ConnectionError(String),
}

/// Keeps an `EventSource` open until the owning component is disposed
pub fn use_new_wb_order_subscription(on_event: impl Fn(LiveEvent) + 'static) {
    let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
    let url = api_url(EVENTS_PATH);

    spawn_local(async move {
        let mut source = match EventSource::new(&url) {
            Ok(source) => source,
            Err(e) => {
                on_event(LiveEvent::ConnectionError(format!("{:?}", e)));
                return;
            }
        };
        let stream = match source.subscribe(ORDER_CREATED_EVENT) {
            Ok(stream) => stream,
            Err(e) => {
                on_event(LiveEvent::ConnectionError(format!("{:?}", e)));
                return;
            }
        };
        log::debug!("live channel open: {}", url);

        let mut events = stream.take_until(cancel_rx);
        while let Some(item) = events.next().await {
            match item {
                Ok((_, message)) => {
                    let Some(data) = message.data().as_string() else {
                        continue;
                    };
                    match parse_order_created(&data) {
                        Ok(order) => on_event(LiveEvent::OrderCreated(order)),
                        Err(e) => log::warn!("bad order_created payload: {}", e),
                    }
                }
                Err(e) => on_event(LiveEvent::ConnectionError(format!("{:?}", e))),
            }
        }

        source.close();
        log::debug!("live channel closed");
    });

    on_cleanup(move || {
        let _ = cancel_tx.send(());
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_wb_order::OrderStatus;

    fn order(id: &str) -> WbOrder {
        WbOrder {
            id: id.into(),
            name: "Иванов Иван Иванович".into(),
            phone: "+79000000000".into(),
            wb_phone: None,
            order_code: None,
            qr_code: Some(format!("{}.png", id)),
            status: OrderStatus::NotAssembled,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_notice_fires_once_per_order() {
        let mut live = LiveUpdates::default();
        let notice = live.receive(&order("X")).unwrap();
        assert_eq!(notice.title(), "Клиент только что оформил заявку");
        assert_eq!(notice.description(), "Номер заявки: X");
        assert_eq!(live.just_inserted(), Some("X"));
        assert_eq!(live.receive(&order("X")), None);
    }

    #[test]
    fn test_just_inserted_follows_latest() {
        let mut live = LiveUpdates::default();
        live.receive(&order("1"));
        live.receive(&order("2"));
        assert_eq!(live.just_inserted(), Some("2"));
    }

    #[test]
    fn test_seen_ids_are_bounded() {
        let mut live = LiveUpdates::default();
        for i in 0..=SEEN_LIMIT {
            assert!(live.receive(&order(&i.to_string())).is_some());
        }
        assert_eq!(live.seen.len(), SEEN_LIMIT);
        assert_eq!(live.seen_order.len(), SEEN_LIMIT);
        // самый старый вытеснен, последний ещё помнится
        assert_eq!(live.receive(&order(&SEEN_LIMIT.to_string())), None);
        assert!(live.receive(&order("0")).is_some());
        assert_eq!(live.seen.len(), SEEN_LIMIT);
    }

    #[test]
    fn test_connection_error_reported_once_until_recovery() {
        let mut live = LiveUpdates::default();
        assert!(live.connection_error());
        assert!(!live.connection_error());
        live.receive(&order("1"));
        assert!(live.connection_error());
    }
}
