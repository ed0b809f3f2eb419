//! Состояние бесконечного списка одного ключа кэша.
//!
//! Plain state machine with no reactive types, driven by the Leptos glue in
//! [`super::client`]. Every fetch is described by a [`FetchTicket`]; a ticket
//! issued before the last invalidation carries an old generation and its
//! result is dropped on arrival.

/// Страница, которая знает, есть ли следующая
pub trait InfinitePage {
    fn has_next_page(&self) -> bool;
    fn end_cursor(&self) -> Option<String>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryStatus<E> {
    Pending,
    Success,
    Error(E),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// Reload of the first `target` pages, replacing the list once all have arrived
    Refetch { index: usize, target: usize },
    /// Append one page after the last loaded one
    Next,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub kind: FetchKind,
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfiniteQuery<P, E> {
    pages: Vec<P>,
    /// Pages of a refetch in progress; shown only once complete
    refetched: Vec<P>,
    status: QueryStatus<E>,
    in_flight: Option<FetchKind>,
    generation: u64,
    invalidated: bool,
    updated_at: Option<i64>,
}

impl<P, E> Default for InfiniteQuery<P, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, E> InfiniteQuery<P, E> {
    /// Новый ключ: ещё ничего не загружено, нужна первая загрузка
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            refetched: Vec::new(),
            status: QueryStatus::Pending,
            in_flight: None,
            generation: 0,
            invalidated: true,
            updated_at: None,
        }
    }

    pub fn pages(&self) -> &[P] {
        &self.pages
    }

    pub fn status(&self) -> &QueryStatus<E> {
        &self.status
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, QueryStatus::Pending)
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, QueryStatus::Success)
    }

    pub fn error(&self) -> Option<&E> {
        match &self.status {
            QueryStatus::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_fetching_next_page(&self) -> bool {
        self.in_flight == Some(FetchKind::Next)
    }

    pub fn updated_at(&self) -> Option<i64> {
        self.updated_at
    }

    /// True when nothing is in flight and the data must be (re)loaded
    pub fn needs_fetch(&self) -> bool {
        self.in_flight.is_none() && self.invalidated
    }

    /// Drop any in-flight work and schedule a wholesale reload.
    ///
    /// Loaded pages stay visible until the reload completes.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.in_flight = None;
        self.refetched.clear();
        self.invalidated = true;
    }

    /// Called when a view subscribes: old or failed data is reloaded
    pub fn mark_stale_if_older(&mut self, now: i64, stale_time_ms: i64) {
        if self.in_flight.is_some() {
            return;
        }
        let expired = match self.updated_at {
            Some(at) => now - at >= stale_time_ms,
            None => true,
        };
        if expired || self.error().is_some() {
            self.invalidated = true;
        }
    }

    /// Start reloading every currently loaded page, first page first
    pub fn begin_refetch(&mut self) -> Option<FetchTicket> {
        if self.in_flight.is_some() {
            return None;
        }
        let kind = FetchKind::Refetch {
            index: 0,
            target: self.pages.len().max(1),
        };
        self.invalidated = false;
        self.refetched.clear();
        self.in_flight = Some(kind);
        Some(FetchTicket {
            generation: self.generation,
            kind,
            cursor: None,
        })
    }
}

impl<P: InfinitePage, E> InfiniteQuery<P, E> {
    pub fn has_next_page(&self) -> bool {
        self.pages.last().map(|p| p.has_next_page()).unwrap_or(false)
    }

    /// Single-flight: `None` while anything is in flight or the end is reached.
    /// A failed previous attempt does not block the next one.
    pub fn begin_next(&mut self) -> Option<FetchTicket> {
        if self.in_flight.is_some() || self.pages.is_empty() || !self.has_next_page() {
            return None;
        }
        let cursor = self.pages.last().and_then(|p| p.end_cursor());
        self.in_flight = Some(FetchKind::Next);
        Some(FetchTicket {
            generation: self.generation,
            kind: FetchKind::Next,
            cursor,
        })
    }

    /// Apply a fetch result. Returns the follow-up ticket when a multi-page
    /// reload has more pages to go.
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        result: Result<P, E>,
        now: i64,
    ) -> Option<FetchTicket> {
        if ticket.generation != self.generation || self.in_flight != Some(ticket.kind) {
            log::debug!(
                "discarding stale page result (generation {} != {})",
                ticket.generation,
                self.generation
            );
            return None;
        }

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                self.in_flight = None;
                self.refetched.clear();
                self.status = QueryStatus::Error(e);
                return None;
            }
        };

        match ticket.kind {
            FetchKind::Next => {
                self.pages.push(page);
                self.in_flight = None;
                self.status = QueryStatus::Success;
                self.updated_at = Some(now);
                None
            }
            FetchKind::Refetch { index, target } => {
                let more = page.has_next_page() && index + 1 < target;
                let cursor = page.end_cursor();
                self.refetched.push(page);
                if more {
                    let kind = FetchKind::Refetch {
                        index: index + 1,
                        target,
                    };
                    self.in_flight = Some(kind);
                    return Some(FetchTicket {
                        generation: self.generation,
                        kind,
                        cursor,
                    });
                }
                self.pages = std::mem::take(&mut self.refetched);
                self.in_flight = None;
                self.status = QueryStatus::Success;
                self.updated_at = Some(now);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Page {
        items: Vec<u32>,
        next: Option<String>,
    }

    impl InfinitePage for Page {
        fn has_next_page(&self) -> bool {
            self.next.is_some()
        }
        fn end_cursor(&self) -> Option<String> {
            self.next.clone()
        }
    }

    fn page(items: &[u32], next: Option<&str>) -> Page {
        Page {
            items: items.to_vec(),
            next: next.map(String::from),
        }
    }

    fn loaded() -> InfiniteQuery<Page, String> {
        let mut q = InfiniteQuery::new();
        let t = q.begin_refetch().unwrap();
        assert_eq!(q.complete(&t, Ok(page(&[1, 2], Some("c1"))), 0), None);
        q
    }

    #[test]
    fn test_new_query_needs_first_fetch() {
        let mut q: InfiniteQuery<Page, String> = InfiniteQuery::new();
        assert!(q.needs_fetch());
        assert!(q.is_pending());
        let t = q.begin_refetch().unwrap();
        assert_eq!(t.cursor, None);
        assert!(!q.needs_fetch());
        assert!(q.is_fetching());
        assert!(!q.is_fetching_next_page());
    }

    #[test]
    fn test_next_page_is_single_flight() {
        let mut q = loaded();
        let first = q.begin_next();
        let second = q.begin_next();
        assert!(first.is_some());
        assert_eq!(second, None);
        assert!(q.is_fetching_next_page());
        let first = first.unwrap();
        assert_eq!(first.cursor.as_deref(), Some("c1"));
        q.complete(&first, Ok(page(&[3], None)), 1);
        assert_eq!(q.pages().len(), 2);
        assert!(!q.has_next_page());
        assert_eq!(q.begin_next(), None);
    }

    #[test]
    fn test_invalidate_discards_in_flight_result() {
        let mut q = loaded();
        let stale = q.begin_next().unwrap();
        q.invalidate();
        assert!(q.needs_fetch());
        assert_eq!(q.complete(&stale, Ok(page(&[99], None)), 1), None);
        assert_eq!(q.pages().len(), 1);
        assert_eq!(q.pages()[0].items, vec![1, 2]);
    }

    #[test]
    fn test_refetch_reloads_all_loaded_pages_then_swaps() {
        let mut q = loaded();
        let next = q.begin_next().unwrap();
        q.complete(&next, Ok(page(&[3], Some("c2"))), 1);
        assert_eq!(q.pages().len(), 2);

        q.invalidate();
        let t0 = q.begin_refetch().unwrap();
        assert_eq!(t0.kind, FetchKind::Refetch { index: 0, target: 2 });
        let t1 = q.complete(&t0, Ok(page(&[0, 1], Some("n1"))), 2).unwrap();
        // old pages still visible mid-refetch
        assert_eq!(q.pages()[0].items, vec![1, 2]);
        assert_eq!(t1.cursor.as_deref(), Some("n1"));
        assert_eq!(q.complete(&t1, Ok(page(&[2], Some("n2"))), 3), None);
        assert_eq!(q.pages().len(), 2);
        assert_eq!(q.pages()[0].items, vec![0, 1]);
        assert_eq!(q.updated_at(), Some(3));
    }

    #[test]
    fn test_error_surfaces_without_retry() {
        let mut q: InfiniteQuery<Page, String> = InfiniteQuery::new();
        let t = q.begin_refetch().unwrap();
        q.complete(&t, Err("boom".into()), 0);
        assert_eq!(q.error().map(String::as_str), Some("boom"));
        assert!(!q.needs_fetch());
        assert!(!q.is_fetching());
        q.mark_stale_if_older(0, 10_000);
        assert!(q.needs_fetch());
    }

    #[test]
    fn test_failed_next_page_can_be_retried() {
        let mut q = loaded();
        let t = q.begin_next().unwrap();
        q.complete(&t, Err("net".into()), 1);
        assert_eq!(q.error().map(String::as_str), Some("net"));
        assert_eq!(q.pages().len(), 1);
        assert!(q.has_next_page());

        let retry = q.begin_next().expect("next page retry");
        assert_eq!(retry.cursor.as_deref(), Some("c1"));
        q.complete(&retry, Ok(page(&[3], None)), 2);
        assert!(q.is_success());
        assert_eq!(q.pages().len(), 2);
    }

    #[test]
    fn test_failed_refetch_keeps_last_good_pages() {
        let mut q = loaded();
        let next = q.begin_next().unwrap();
        q.complete(&next, Ok(page(&[3], Some("c2"))), 1);

        q.invalidate();
        let t0 = q.begin_refetch().unwrap();
        let t1 = q.complete(&t0, Ok(page(&[0, 1], Some("n1"))), 2).unwrap();
        q.complete(&t1, Err("boom".into()), 3);
        assert_eq!(q.error().map(String::as_str), Some("boom"));
        assert_eq!(q.pages().len(), 2);
        assert_eq!(q.pages()[0].items, vec![1, 2]);
        assert!(!q.is_fetching());

        // explicit retry reloads from the first page again
        let again = q.begin_refetch().unwrap();
        assert_eq!(again.kind, FetchKind::Refetch { index: 0, target: 2 });
        assert_eq!(again.cursor, None);
        assert!(q.begin_next().is_none());
    }

    #[test]
    fn test_fresh_data_is_not_refetched_on_subscribe() {
        let mut q = loaded();
        q.mark_stale_if_older(5_000, 10_000);
        assert!(!q.needs_fetch());
        q.mark_stale_if_older(10_000, 10_000);
        assert!(q.needs_fetch());
    }

    #[test]
    fn test_begin_next_requires_loaded_data() {
        let mut q: InfiniteQuery<Page, String> = InfiniteQuery::new();
        assert_eq!(q.begin_next(), None);
    }
}
