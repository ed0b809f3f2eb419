use super::filter_codec::{self, canonical_search_type, FeedUrlState};
use contracts::domain::a001_wb_order::{SearchType, StatusFilter};
use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::NavigateOptions;
use std::rc::Rc;

type Navigate = Rc<dyn Fn(&str, NavigateOptions)>;

/// Состояние ленты, прочитанное из адресной строки, и запись в неё
#[derive(Clone, Copy)]
pub struct FeedUrl {
    pub state: Memo<FeedUrlState>,
    pathname: Memo<String>,
    navigate: StoredValue<Navigate, LocalStorage>,
}

pub fn use_feed_url() -> FeedUrl {
    let location = use_location();
    let search = location.search;
    let navigate = use_navigate();
    FeedUrl {
        state: Memo::new(move |_| filter_codec::decode(&search.get())),
        pathname: location.pathname,
        navigate: StoredValue::new_local(Rc::new(navigate) as Navigate),
    }
}

impl FeedUrl {
    fn write(&self, next: FeedUrlState, replace: bool) {
        let query = filter_codec::encode(&next);
        let current = self.state.with_untracked(filter_codec::encode);
        if query == current {
            return;
        }
        let path = self.pathname.get_untracked();
        let url = if query.is_empty() {
            path
        } else {
            format!("{}?{}", path, query)
        };
        log::debug!("feed url -> {} (replace: {})", url, replace);
        self.navigate.with_value(|navigate| {
            navigate(
                &url,
                NavigateOptions {
                    replace,
                    scroll: false,
                    ..Default::default()
                },
            )
        });
    }

    /// Текст поиска; пустая строка убирает `q`
    pub fn set_query(&self, query: String) {
        let mut next = self.state.get_untracked();
        next.filter.query = query;
        self.write(next, true);
    }

    pub fn set_filters(&self, status: StatusFilter, search_type: &[SearchType]) {
        let mut next = self.state.get_untracked();
        next.filter.status = status;
        next.filter.search_type = canonical_search_type(search_type);
        self.write(next, true);
    }

    pub fn open_edit(&self, id: String) {
        let mut next = self.state.get_untracked();
        next.edit = Some(id);
        self.write(next, false);
    }

    pub fn close_edit(&self, replace: bool) {
        let mut next = self.state.get_untracked();
        next.edit = None;
        self.write(next, replace);
    }
}
