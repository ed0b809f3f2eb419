//! Сторож бесконечной прокрутки.
//!
//! An `IntersectionObserver` watches a zero-height element after the last
//! row. Only the transition into view fires; staying visible does not.

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentinelState {
    intersecting: bool,
}

impl SentinelState {
    /// Returns true on a not-intersecting → intersecting edge
    pub fn observe(&mut self, intersecting: bool) -> bool {
        let entered = intersecting && !self.intersecting;
        self.intersecting = intersecting;
        entered
    }
}

/// Guard applied when the sentinel fires
pub fn should_fetch_next(is_fetching: bool, has_next_page: bool) -> bool {
    !is_fetching && has_next_page
}

#[component]
pub fn ScrollSentinel(
    /// Called each time the sentinel scrolls into view
    on_enter: Callback<()>,
    /// Distance below the viewport at which loading starts
    #[prop(optional, into)]
    root_margin: Option<String>,
) -> impl IntoView {
    let node_ref = NodeRef::<leptos::html::Div>::new();
    let observer = StoredValue::new_local(None::<IntersectionObserver>);

    Effect::new(move |_| {
        let Some(el) = node_ref.get() else { return };
        if observer.with_value(|o| o.is_some()) {
            return;
        }

        let mut state = SentinelState::default();
        let callback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if state.observe(entry.is_intersecting()) {
                        on_enter.run(());
                    }
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_root_margin(root_margin.as_deref().unwrap_or("0px 0px 200px 0px"));

        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
            Ok(created) => {
                created.observe(&el);
                observer.set_value(Some(created));
                callback.forget();
            }
            Err(e) => log::error!("IntersectionObserver unavailable: {:?}", e),
        }
    });

    on_cleanup(move || {
        observer.try_with_value(|o| {
            if let Some(o) = o {
                o.disconnect();
            }
        });
    });

    view! { <div class="scroll-sentinel" node_ref=node_ref aria-hidden="true"></div> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_only_on_entry() {
        let mut s = SentinelState::default();
        assert!(!s.observe(false));
        assert!(s.observe(true));
        assert!(!s.observe(true));
        assert!(!s.observe(false));
        assert!(s.observe(true));
    }

    #[test]
    fn test_guard() {
        assert!(should_fetch_next(false, true));
        assert!(!should_fetch_next(true, true));
        assert!(!should_fetch_next(false, false));
    }
}
