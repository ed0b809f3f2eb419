use super::feed_url::FeedUrl;
use contracts::domain::a001_wb_order::{SearchType, StatusFilter};
use leptos::prelude::*;
use thaw::*;

/// Toggles one field in the current search set
fn toggle_search_type(current: &[SearchType], field: SearchType, checked: bool) -> Vec<SearchType> {
    let mut next: Vec<SearchType> = current.iter().copied().filter(|t| *t != field).collect();
    if checked {
        next.push(field);
    }
    next
}

/// Строка поиска; `is_stale` показывает, что лента ещё не догнала ввод
#[component]
pub fn SearchBox(
    /// Текст в поле ввода
    text: RwSignal<String>,
    is_stale: Signal<bool>,
    on_change: Callback<String>,
) -> impl IntoView {
    let on_input = move |ev| on_change.run(event_target_value(&ev));
    let on_clear = move |_| on_change.run(String::new());

    view! {
        <div class="feed-search">
            <span class="feed-search__icon">
                <Show when=move || is_stale.get() fallback=|| view! { "🔍" }>
                    <Spinner size=SpinnerSize::Tiny />
                </Show>
            </span>
            <input
                type="search"
                class="feed-search__input"
                placeholder="Искать заявку..."
                prop:value=move || text.get()
                on:input=on_input
            />
            <Show when=move || !text.with(String::is_empty)>
                <button class="button button--ghost" aria-label="clear search" on:click=on_clear>
                    "×"
                </button>
            </Show>
        </div>
    }
}

/// Фильтры ленты; every change is written to the URL right away
#[component]
pub fn FilterPanel(
    url: FeedUrl,
    /// Отложенный текст поиска
    query: Signal<String>,
) -> impl IntoView {
    let status = Memo::new(move |_| url.state.with(|s| s.filter.status));
    let search_type = Memo::new(move |_| url.state.with(|s| s.filter.search_type.clone()));

    let on_status = move |ev| {
        let value = StatusFilter::parse_lenient(&event_target_value(&ev));
        url.set_filters(value, &search_type.get_untracked());
    };

    view! {
        <div class="feed-filters">
            <div class="form-group">
                <label for="feed-status">"Сортировать статус"</label>
                <select
                    id="feed-status"
                    prop:value=move || status.get().as_str()
                    on:change=on_status
                >
                    {StatusFilter::options()
                        .into_iter()
                        .map(|option| view! {
                            <option value=option.as_str()>{option.display_name()}</option>
                        })
                        .collect_view()}
                </select>
            </div>

            <Show when=move || !query.with(String::is_empty)>
                <fieldset class="form-group feed-filters__search-type">
                    <legend>"Выберите тип поиска"</legend>
                    {SearchType::all()
                        .into_iter()
                        .map(|field| {
                            let on_change = move |ev| {
                                let checked = event_target_checked(&ev);
                                let next = toggle_search_type(&search_type.get_untracked(), field, checked);
                                url.set_filters(status.get_untracked(), &next);
                            };
                            view! {
                                <label class="checkbox-label">
                                    <input
                                        type="checkbox"
                                        prop:checked=move || search_type.with(|s| s.contains(&field))
                                        on:change=on_change
                                    />
                                    {field.display_name()}
                                </label>
                            }
                        })
                        .collect_view()}
                </fieldset>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_search_type() {
        let all = SearchType::all();
        let without_id = toggle_search_type(&all, SearchType::Id, false);
        assert_eq!(without_id.len(), 3);
        assert!(!without_id.contains(&SearchType::Id));
        let back = toggle_search_type(&without_id, SearchType::Id, true);
        assert!(back.contains(&SearchType::Id));
        assert_eq!(toggle_search_type(&[SearchType::Name], SearchType::Name, false), vec![]);
    }
}
