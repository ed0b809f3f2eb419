//! Всплывающие уведомления.
//!
//! [`ToastQueue`] is the plain list; [`ToastService`] is the context handle
//! that schedules auto-dismiss, modelled on the modal service.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use thaw::{MessageBar, MessageBarIntent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
    Warning,
}

impl ToastKind {
    fn intent(self) -> MessageBarIntent {
        match self {
            ToastKind::Success => MessageBarIntent::Success,
            ToastKind::Error => MessageBarIntent::Error,
            ToastKind::Info => MessageBarIntent::Info,
            ToastKind::Warning => MessageBarIntent::Warning,
        }
    }
}

pub type ToastId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub title: String,
    pub description: Option<String>,
}

/// Upper bound of toasts on screen; the oldest goes first
pub const MAX_VISIBLE_TOASTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToastQueue {
    next_id: ToastId,
    items: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, kind: ToastKind, title: String, description: Option<String>) -> ToastId {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast {
            id,
            kind,
            title,
            description,
        });
        if self.items.len() > MAX_VISIBLE_TOASTS {
            let overflow = self.items.len() - MAX_VISIBLE_TOASTS;
            self.items.drain(..overflow);
        }
        id
    }

    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        self.items.len() != before
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

#[derive(Clone, Copy)]
pub struct ToastService {
    queue: RwSignal<ToastQueue>,
    duration_ms: u32,
}

impl ToastService {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            queue: RwSignal::new(ToastQueue::default()),
            duration_ms,
        }
    }

    pub fn show(
        &self,
        kind: ToastKind,
        title: impl Into<String>,
        description: Option<String>,
        duration_ms: Option<u32>,
    ) -> ToastId {
        let mut id = 0;
        let title = title.into();
        self.queue
            .update(|q| id = q.push(kind, title, description));
        let service = *self;
        Timeout::new(duration_ms.unwrap_or(self.duration_ms), move || {
            service.dismiss(id);
        })
        .forget();
        id
    }

    pub fn success(&self, title: impl Into<String>, description: impl Into<String>) -> ToastId {
        self.show(ToastKind::Success, title, Some(description.into()), None)
    }

    /// Заголовок "Ошибка" и текст ошибки
    pub fn error(&self, description: impl Into<String>) -> ToastId {
        self.show(ToastKind::Error, "Ошибка", Some(description.into()), None)
    }

    pub fn info(&self, title: impl Into<String>) -> ToastId {
        self.show(ToastKind::Info, title, None, None)
    }

    /// Без описания, как `info`
    pub fn warning(&self, title: impl Into<String>) -> ToastId {
        self.show(ToastKind::Warning, title, None, None)
    }

    pub fn dismiss(&self, id: ToastId) {
        self.queue.try_update(|q| q.dismiss(id));
    }

    /// Closes `previous` (if any) and shows a new toast in its place
    pub fn replace(
        &self,
        previous: Option<ToastId>,
        kind: ToastKind,
        title: impl Into<String>,
        description: Option<String>,
    ) -> ToastId {
        if let Some(previous) = previous {
            self.dismiss(previous);
        }
        self.show(kind, title, description, None)
    }
}

pub fn use_toasts() -> ToastService {
    use_context::<ToastService>().expect("ToastService not provided in context")
}

/// Область вывода уведомлений, монтируется один раз в корне
#[component]
pub fn Toaster() -> impl IntoView {
    let service = use_toasts();

    view! {
        <div class="toaster">
            <For
                each=move || service.queue.with(|q| q.items().to_vec())
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class="toaster__item">
                            <MessageBar intent=toast.kind.intent()>
                                <div class="toaster__content">
                                    <strong class="toaster__title">{toast.title.clone()}</strong>
                                    {toast.description.clone().map(|d| view! {
                                        <div class="toaster__description">{d}</div>
                                    })}
                                </div>
                                <button
                                    class="button button--icon toaster__close"
                                    aria-label="Закрыть"
                                    on:click=move |_| service.dismiss(id)
                                >
                                    "×"
                                </button>
                            </MessageBar>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let mut queue = ToastQueue::default();
        let a = queue.push(ToastKind::Success, "a".into(), None);
        let b = queue.push(ToastKind::Error, "b".into(), Some("desc".into()));
        assert_ne!(a, b);
        assert!(queue.dismiss(a));
        assert!(!queue.dismiss(a));
        assert_eq!(queue.items().len(), 1);
        assert_eq!(queue.items()[0].title, "b");
    }

    #[test]
    fn test_kind_intent() {
        assert!(matches!(ToastKind::Warning.intent(), MessageBarIntent::Warning));
        assert!(matches!(ToastKind::Error.intent(), MessageBarIntent::Error));
    }

    #[test]
    fn test_oldest_dropped_on_overflow() {
        let mut queue = ToastQueue::default();
        for i in 0..MAX_VISIBLE_TOASTS + 2 {
            queue.push(ToastKind::Info, i.to_string(), None);
        }
        assert_eq!(queue.items().len(), MAX_VISIBLE_TOASTS);
        assert_eq!(queue.items()[0].title, "2");
    }
}
