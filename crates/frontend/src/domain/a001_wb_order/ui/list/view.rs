use super::feed::{use_feed_client, use_infinite_wb_orders};
use super::feed_url::use_feed_url;
use super::filter_panel::{FilterPanel, SearchBox};
use super::highlight::{row_visual_state, shows_skeleton, RowVisual};
use super::live::{
    use_new_wb_order_subscription, LiveEvent, LiveUpdates, CONNECTION_LOST_TITLE, NEW_ORDER_TOAST_MS,
};
use crate::domain::a001_wb_order::ui::details::{EditOrderModal, EditOrderViewModel};
use crate::shared::config::use_app_config;
use crate::shared::date_utils::{format_relative, format_timestamp, now_ms};
use crate::shared::deferred::use_deferred;
use crate::shared::infinite_scroll::{should_fetch_next, ScrollSentinel};
use crate::shared::toast::{use_toasts, ToastKind};
use contracts::domain::a001_wb_order::{OrderStatus, WbOrder};
use gloo_timers::callback::Interval;
use leptos::prelude::*;
use thaw::*;

const COLUMNS: [&str; 9] = [
    "Номер заявки",
    "ФИО",
    "Телефон",
    "QR-код",
    "Код заказа",
    "Телефон Wb",
    "Статус",
    "Создано",
    "Обновлено",
];

const NO_PREVIEW: &str = "/static/images/no-preview.svg";
const PLACEHOLDER_ROWS: usize = 8;
const NEXT_PAGE_ROWS: usize = 15;
/// Период обновления относительного времени
const CLOCK_TICK_MS: u32 = 30_000;

fn status_badge(status: OrderStatus) -> impl IntoView {
    let color = match status {
        OrderStatus::NotAssembled => BadgeColor::Warning,
        OrderStatus::Assembled => BadgeColor::Success,
        OrderStatus::Rejected => BadgeColor::Danger,
    };
    view! {
        <Badge appearance=BadgeAppearance::Filled color=color>
            {status.display_name()}
        </Badge>
    }
}

fn skeleton_row() -> impl IntoView {
    view! {
        <tr class="feed-row feed-row--skeleton">
            {COLUMNS
                .iter()
                .enumerate()
                .map(|(i, _)| {
                    let class = if i == 3 { "skeleton skeleton--qr" } else { "skeleton" };
                    view! { <td><div class=class></div></td> }
                })
                .collect_view()}
        </tr>
    }
}

fn skeleton_rows(count: usize) -> impl IntoView {
    (0..count).map(|_| skeleton_row()).collect_view()
}

fn time_cell(ms: i64, now: RwSignal<i64>) -> impl IntoView {
    view! {
        <td class="feed-row__time" title=format_timestamp(ms)>
            {move || format_relative(ms, now.get())}
        </td>
    }
}

fn qr_cell(order: &WbOrder) -> impl IntoView {
    match order.qr_code_path() {
        Some(path) => {
            let href = path.clone();
            view! {
            <td>
                <a
                    href=href
                    target="_blank"
                    rel="noopener noreferrer"
                    on:click=|ev| ev.stop_propagation()
                >
                    <img
                        class="feed-row__qr"
                        src=path
                        alt="qr-code"
                        onerror=format!("this.onerror=null;this.src='{}'", NO_PREVIEW)
                    />
                </a>
            </td>
            }
            .into_any()
        }
        None => view! {
            <td>
                <img class="feed-row__qr" src=NO_PREVIEW alt="qr-code" />
            </td>
        }
        .into_any(),
    }
}

#[component]
fn OrderRow(
    order: WbOrder,
    visual: Memo<RowVisual>,
    /// Лента перезагружается после изменения
    refetching: Memo<bool>,
    now: RwSignal<i64>,
    on_open: Callback<String>,
) -> impl IntoView {
    move || {
        if shows_skeleton(visual.get(), refetching.get()) {
            return skeleton_row().into_any();
        }
        let id = order.id.clone();
        view! {
            <tr class=move || visual.get().class() on:click=move |_| on_open.run(id.clone())>
                <td class="feed-row__id">{order.id.clone()}</td>
                <td>{order.name.clone()}</td>
                <td>{order.phone.clone()}</td>
                {qr_cell(&order)}
                <td>{order.order_code.clone().unwrap_or_default()}</td>
                <td>{order.wb_phone.clone().unwrap_or_default()}</td>
                <td>{status_badge(order.status)}</td>
                {time_cell(order.created_at, now)}
                {time_cell(order.updated_at, now)}
            </tr>
        }
        .into_any()
    }
}

/// Администрирование заявок: лента с фильтрами, поиском и живыми обновлениями
#[component]
pub fn WbOrdersAdminPage() -> impl IntoView {
    let config = use_app_config();
    let toasts = use_toasts();
    let client = use_feed_client();
    let url = use_feed_url();

    // Текст поиска живёт отдельно от адреса, чтобы ввод не ждал роутер
    let search_text = RwSignal::new(url.state.with_untracked(|s| s.filter.query.clone()));
    let last_written = StoredValue::new(search_text.get_untracked());
    Effect::new(move |_| {
        let q = url.state.with(|s| s.filter.query.clone());
        if last_written.with_value(|w| *w != q) {
            last_written.set_value(q.clone());
            search_text.set(q);
        }
    });
    let on_search = Callback::new(move |value: String| {
        last_written.set_value(value.clone());
        search_text.set(value.clone());
        url.set_query(value);
    });

    let deferred = use_deferred(search_text.into());
    let page_size = config.page_size;
    let filter = Memo::new(move |_| {
        let mut filter = url.state.with(|s| s.filter.clone());
        filter.query = deferred.value.get();
        filter.take = page_size;
        filter
    });
    let feed = use_infinite_wb_orders(filter.into());

    // Живые обновления
    let live = StoredValue::new(LiveUpdates::default());
    let just_inserted = RwSignal::new(None::<String>);
    use_new_wb_order_subscription(move |event| match event {
        LiveEvent::OrderCreated(order) => {
            let Some(notice) = live.try_update_value(|l| l.receive(&order)).flatten() else {
                return;
            };
            log::debug!("new order {} from live channel", notice.id);
            feed.invalidate();
            just_inserted.try_set(Some(notice.id.clone()));
            toasts.show(
                ToastKind::Success,
                notice.title(),
                Some(notice.description()),
                Some(NEW_ORDER_TOAST_MS),
            );
        }
        LiveEvent::ConnectionError(e) => {
            log::warn!("live channel error: {}", e);
            if live.try_update_value(|l| l.connection_error()).unwrap_or(false) {
                toasts.warning(CONNECTION_LOST_TITLE);
            }
        }
    });

    // Редактирование
    let vm = EditOrderViewModel::new(client, toasts);
    Effect::new(move |_| {
        let edit = url.state.with(|s| s.edit.clone());
        vm.sync_with_url(edit, move || url.close_edit(true));
    });
    let on_open = Callback::new(move |id: String| url.open_edit(id));
    let on_close = Callback::new(move |_: ()| {
        vm.close();
        url.close_edit(false);
    });
    let on_submitted = Callback::new(move |_: ()| url.close_edit(false));

    let now = RwSignal::new(now_ms());
    let ticker = StoredValue::new_local(Some(Interval::new(CLOCK_TICK_MS, move || {
        now.try_set(now_ms());
    })));
    on_cleanup(move || {
        ticker.try_update_value(|t| t.take());
    });

    let rows = Memo::new(move |_| {
        feed.with(|q| {
            q.pages()
                .iter()
                .flat_map(|p| p.edges.iter().cloned())
                .collect::<Vec<_>>()
        })
        .unwrap_or_default()
    });
    let refetching = Memo::new(move |_| {
        feed.with(|q| q.is_fetching() && q.is_success())
            .unwrap_or(false)
    });
    let show_placeholder = Memo::new(move |_| deferred.is_stale.get() || feed.is_pending());

    // Ошибка догрузки при уже показанных строках уходит в уведомление
    let feed_error = Memo::new(move |_| feed.error());
    Effect::new(move |_| {
        if let Some(e) = feed_error.get() {
            if !untrack(move || rows.with(Vec::is_empty)) {
                toasts.error(e.user_message());
            }
        }
    });

    let on_sentinel = Callback::new(move |_: ()| {
        if should_fetch_next(feed.is_fetching(), feed.has_next_page()) {
            feed.fetch_next_page();
        }
    });

    let table_body = move || {
        if show_placeholder.get() {
            return skeleton_rows(PLACEHOLDER_ROWS).into_any();
        }
        view! {
            <Show when=move || rows.with(Vec::is_empty)>
                <tr>
                    <td class="feed-table__empty" colspan="9">"Нет данных"</td>
                </tr>
            </Show>
            <For
                each=move || rows.get()
                key=|order| (order.id.clone(), order.updated_at, order.status)
                children=move |order| {
                    let id = order.id.clone();
                    let visual = Memo::new(move |_| {
                        vm.mutating_id.with(|m| {
                            just_inserted.with(|j| row_visual_state(&id, m.as_deref(), j.as_deref()))
                        })
                    });
                    view! {
                        <OrderRow
                            order=order
                            visual=visual
                            refetching=refetching
                            now=now
                            on_open=on_open
                        />
                    }
                }
            />
            <Show when=move || feed.is_fetching_next_page()>
                {skeleton_rows(NEXT_PAGE_ROWS)}
            </Show>
        }
        .into_any()
    };

    // Первая страница не загрузилась: ошибку показывает граница маршрута
    let fatal_error = Memo::new(move |_| feed_error.get().filter(|_| rows.with(Vec::is_empty)));
    let content = move || match fatal_error.get() {
        Some(e) => Err(e),
        None => Ok(view! {
            <div class="table-container">
                <table class="table__data feed-table">
                    <thead>
                        <tr>
                            {COLUMNS.iter().map(|c| view! { <th>{*c}</th> }).collect_view()}
                        </tr>
                    </thead>
                    <tbody>{table_body}</tbody>
                </table>
                <ScrollSentinel on_enter=on_sentinel />
            </div>
        }),
    };

    view! {
        <div class="page wb-orders-admin">
            <div class="page__header">
                <h2 class="page__title">"Заявки WB"</h2>
                <SearchBox text=search_text is_stale=deferred.is_stale.into() on_change=on_search />
            </div>
            <FilterPanel url=url query=deferred.value.into() />

            {content}

            <Show when=move || vm.session.with(|s| s.editing_id().is_some())>
                <EditOrderModal vm=vm on_close=on_close on_submitted=on_submitted />
            </Show>
        </div>
    }
}
