//! Отложенное значение для дорогих пересчётов во время набора текста.
//!
//! The raw value changes on every keystroke; the deferred copy catches up on
//! the next animation frame. Each raw change bumps a generation and only the
//! settle carrying the latest generation is applied.

use leptos::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deferred<T> {
    raw: T,
    deferred: T,
    generation: u64,
}

impl<T: Clone + PartialEq> Deferred<T> {
    pub fn new(value: T) -> Self {
        Self {
            raw: value.clone(),
            deferred: value,
            generation: 0,
        }
    }

    pub fn raw(&self) -> &T {
        &self.raw
    }

    pub fn deferred(&self) -> &T {
        &self.deferred
    }

    pub fn is_stale(&self) -> bool {
        self.raw != self.deferred
    }

    /// Returns the generation to settle, `None` when nothing changed
    pub fn set_raw(&mut self, value: T) -> Option<u64> {
        if value == self.raw {
            return None;
        }
        self.raw = value;
        self.generation += 1;
        Some(self.generation)
    }

    /// Applies the raw value if no newer input arrived since `generation`
    pub fn settle(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        if self.deferred == self.raw {
            return false;
        }
        self.deferred = self.raw.clone();
        true
    }
}

pub struct DeferredValue<T: Send + Sync + 'static> {
    pub value: Memo<T>,
    pub is_stale: Memo<bool>,
}

impl<T: Send + Sync + 'static> Clone for DeferredValue<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for DeferredValue<T> {}

/// Follows `source` one animation frame behind
pub fn use_deferred<T>(source: Signal<T>) -> DeferredValue<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    let state = RwSignal::new(Deferred::new(source.get_untracked()));

    Effect::new(move |_| {
        let next = source.get();
        let mut generation = None;
        state.update(|d| generation = d.set_raw(next));
        if let Some(generation) = generation {
            request_animation_frame(move || {
                state.try_update(|d| d.settle(generation));
            });
        }
    });

    DeferredValue {
        value: Memo::new(move |_| state.with(|d| d.deferred().clone())),
        is_stale: Memo::new(move |_| state.with(|d| d.is_stale())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settles_latest_input_only() {
        let mut d = Deferred::new(String::new());
        let g1 = d.set_raw("и".to_string()).unwrap();
        let g2 = d.set_raw("ив".to_string()).unwrap();
        assert!(d.is_stale());
        assert!(!d.settle(g1));
        assert_eq!(d.deferred(), "");
        assert!(d.settle(g2));
        assert_eq!(d.deferred(), "ив");
        assert!(!d.is_stale());
    }

    #[test]
    fn test_same_value_does_not_bump() {
        let mut d = Deferred::new(1);
        assert_eq!(d.set_raw(1), None);
        assert!(!d.is_stale());
    }

    #[test]
    fn test_typing_back_to_deferred_value() {
        let mut d = Deferred::new("a".to_string());
        let g1 = d.set_raw("ab".to_string()).unwrap();
        let g2 = d.set_raw("a".to_string()).unwrap();
        assert!(!d.is_stale());
        assert!(!d.settle(g1));
        assert!(!d.settle(g2));
        assert_eq!(d.deferred(), "a");
    }
}
