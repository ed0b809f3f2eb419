//! URL query ↔ состояние фильтров ленты.
//!
//! The URL is the only source of truth for the filters and the edited order.
//! Decoding never fails: anything unreadable falls back to the defaults.

use contracts::domain::a001_wb_order::{SearchType, StatusFilter, WbOrdersPageRequest};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TAKE: u32 = 30;

/// Параметры одной выборки ленты; also the cache key of its pages
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FilterTuple {
    pub status: StatusFilter,
    pub query: String,
    /// Canonical order, no duplicates, never empty
    pub search_type: Vec<SearchType>,
    pub take: u32,
}

impl Default for FilterTuple {
    fn default() -> Self {
        Self {
            status: StatusFilter::All,
            query: String::new(),
            search_type: SearchType::all(),
            take: DEFAULT_TAKE,
        }
    }
}

impl FilterTuple {
    pub fn page_request(&self, cursor: Option<String>) -> WbOrdersPageRequest {
        WbOrdersPageRequest {
            take: self.take,
            cursor,
            status: self.status,
            query: self.query.clone(),
            search_type: self.search_type.clone(),
        }
    }

    pub fn has_default_search_type(&self) -> bool {
        self.search_type == SearchType::all()
    }
}

/// Sorts into canonical order and drops duplicates; an empty selection means all fields
pub fn canonical_search_type(selected: &[SearchType]) -> Vec<SearchType> {
    let canonical: Vec<SearchType> = SearchType::all()
        .into_iter()
        .filter(|t| selected.contains(t))
        .collect();
    if canonical.is_empty() {
        SearchType::all()
    } else {
        canonical
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedUrlState {
    pub filter: FilterTuple,
    /// Заявка, открытая на редактирование
    pub edit: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct FeedQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    search_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sort_by_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    edit: Option<String>,
}

fn decode_component(value: &str) -> String {
    let value = value.replace('+', " ");
    match urlencoding::decode(&value) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => value,
    }
}

/// Pair-by-pair reading for queries serde_qs rejects; first occurrence wins
fn lenient_query(query: &str) -> FeedQuery {
    let mut parsed = FeedQuery::default();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let slot = match decode_component(key).as_str() {
            "q" => &mut parsed.q,
            "search_type" => &mut parsed.search_type,
            "sort_by_status" => &mut parsed.sort_by_status,
            "edit" => &mut parsed.edit,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(decode_component(value));
        }
    }
    parsed
}

/// `search_type` is a JSON array of field names; invalid members are dropped
pub fn decode_search_type(raw: Option<&str>) -> Vec<SearchType> {
    let selected: Vec<SearchType> = raw
        .and_then(|raw| serde_json::from_str::<Vec<serde_json::Value>>(raw).ok())
        .map(|values| {
            values
                .iter()
                .filter_map(|v| v.as_str().and_then(SearchType::parse))
                .collect()
        })
        .unwrap_or_default();
    canonical_search_type(&selected)
}

pub fn decode(query: &str) -> FeedUrlState {
    let query = query.trim_start_matches('?');
    let raw = serde_qs::from_str::<FeedQuery>(query).unwrap_or_else(|e| {
        log::debug!("lenient query decode after serde_qs error: {}", e);
        lenient_query(query)
    });

    FeedUrlState {
        filter: FilterTuple {
            status: raw
                .sort_by_status
                .as_deref()
                .map(StatusFilter::parse_lenient)
                .unwrap_or_default(),
            query: raw.q.unwrap_or_default(),
            search_type: decode_search_type(raw.search_type.as_deref()),
            take: DEFAULT_TAKE,
        },
        edit: raw.edit.filter(|id| !id.trim().is_empty()),
    }
}

/// Query string without the leading `?`; empty for the default state
pub fn encode(state: &FeedUrlState) -> String {
    let filter = &state.filter;
    let customized = filter.status != StatusFilter::All || !filter.has_default_search_type();
    let query = FeedQuery {
        q: (!filter.query.is_empty()).then(|| filter.query.clone()),
        search_type: customized
            .then(|| serde_json::to_string(&filter.search_type).ok())
            .flatten(),
        sort_by_status: customized.then(|| filter.status.as_str().to_string()),
        edit: state.edit.clone(),
    };
    serde_qs::to_string(&query).unwrap_or_else(|e| {
        log::error!("failed to encode feed query: {}", e);
        String::new()
    })
}
