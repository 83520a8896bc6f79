use std::collections::BTreeSet;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::config::Config;
use crate::models::options::FilterOption;

/// Toggles `code` in or out of the selection.
pub fn toggle_code(selected: &BTreeSet<String>, code: &str) -> BTreeSet<String> {
    let mut next = selected.clone();
    if !next.remove(code) {
        next.insert(code.to_string());
    }
    next
}

pub fn clear_all() -> BTreeSet<String> {
    BTreeSet::new()
}

/// Options ordered by description, ties kept in backend order.
pub fn sorted_options(options: &[FilterOption]) -> Vec<FilterOption> {
    let mut sorted = options.to_vec();
    sorted.sort_by(|a, b| a.description.cmp(&b.description));
    sorted
}

/// Case-insensitive substring match on description or code.
pub fn matches_search(option: &FilterOption, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    query.is_empty()
        || option.description.to_lowercase().contains(&query)
        || option.code.to_lowercase().contains(&query)
}

/// Selected entries in display order, plus how many did not fit.
///
/// Codes without a matching option are shown by their code, after the rest.
pub fn visible_selection(
    options: &[FilterOption],
    selected: &BTreeSet<String>,
    max_shown: usize,
) -> (Vec<FilterOption>, usize) {
    let mut ordered: Vec<FilterOption> = sorted_options(options)
        .into_iter()
        .filter(|o| selected.contains(&o.code))
        .collect();

    let unknown = selected
        .iter()
        .filter(|code| !options.iter().any(|o| &o.code == *code))
        .map(|code| FilterOption::new(code.clone(), code.clone()));
    ordered.extend(unknown);

    let overflow = ordered.len().saturating_sub(max_shown);
    ordered.truncate(max_shown);
    (ordered, overflow)
}

/// Trigger label, or `None` when nothing is selected.
pub fn summary_label(
    options: &[FilterOption],
    selected: &BTreeSet<String>,
    max_shown: usize,
) -> Option<String> {
    if selected.is_empty() {
        return None;
    }

    let (shown, overflow) = visible_selection(options, selected, max_shown);
    let mut label = shown
        .iter()
        .map(|o| o.description.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    if overflow > 0 {
        label.push_str(&format!(" +{overflow} more"));
    }
    Some(label)
}

/// Text shown on the collapsed trigger.
pub fn trigger_label(
    options: &[FilterOption],
    selected: &BTreeSet<String>,
    max_shown: usize,
    placeholder: &str,
) -> String {
    summary_label(options, selected, max_shown).unwrap_or_else(|| placeholder.to_string())
}

#[derive(Properties, PartialEq)]
pub struct FilterSelectorProps {
    /// Plural name of the dimension, e.g. "fuel types"
    pub label: AttrValue,
    pub placeholder: AttrValue,
    pub options: Vec<FilterOption>,
    pub selected: BTreeSet<String>,
    pub on_change: Callback<BTreeSet<String>>,
    #[prop_or(Config::SUMMARY_LABEL_LIMIT)]
    pub max_shown: usize,
}

/// Searchable multi-select dropdown
#[function_component(FilterSelector)]
pub fn filter_selector(props: &FilterSelectorProps) -> Html {
    let open = use_state(|| false);
    let search = use_state(String::new);

    let on_toggle_open = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.set(!*open))
    };

    let on_search = {
        let search = search.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            search.set(input.value());
        })
    };

    let on_clear = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_change.emit(clear_all());
        })
    };

    let label = trigger_label(
        &props.options,
        &props.selected,
        props.max_shown,
        &props.placeholder,
    );
    let (selected_options, _) =
        visible_selection(&props.options, &props.selected, props.selected.len());

    let badges = selected_options
        .into_iter()
        .map(|option| {
            let on_dismiss = {
                let on_change = props.on_change.clone();
                let selected = props.selected.clone();
                let code = option.code.clone();
                Callback::from(move |e: MouseEvent| {
                    // Keep the row and trigger handlers out of it
                    e.stop_propagation();
                    on_change.emit(toggle_code(&selected, &code));
                })
            };
            let dismiss_label = format!("Remove {}", option.description);

            html! {
                <span class="filter-badge" key={option.code.clone()}>
                    {&option.description}
                    <button
                        type="button"
                        class="filter-badge-dismiss"
                        onclick={on_dismiss}
                        aria-label={dismiss_label}
                    >
                        {"×"}
                    </button>
                </span>
            }
        })
        .collect::<Html>();

    let rows: Vec<FilterOption> = sorted_options(&props.options)
        .into_iter()
        .filter(|o| matches_search(o, &search))
        .collect();

    html! {
        <div class="filter-selector">
            <div
                class="filter-trigger"
                role="button"
                aria-expanded={(*open).to_string()}
                onclick={on_toggle_open}
            >
                <span class={classes!(
                    "filter-summary",
                    props.selected.is_empty().then_some("filter-placeholder"),
                )}>
                    {label}
                </span>
                <span class="filter-chevron">{if *open { "▲" } else { "▼" }}</span>
            </div>

            if *open {
                <div class="filter-dropdown">
                    if !props.selected.is_empty() {
                        <div class="filter-badges">{badges}</div>
                    }
                    <input
                        type="search"
                        class="filter-search"
                        placeholder={format!("Search {}...", props.label)}
                        value={(*search).clone()}
                        oninput={on_search}
                    />
                    <ul class="filter-options" role="listbox">
                        if rows.is_empty() {
                            <li class="filter-empty">{format!("No {} found", props.label)}</li>
                        }
                        {
                            rows.into_iter().map(|option| {
                                let is_selected = props.selected.contains(&option.code);
                                let onclick = {
                                    let on_change = props.on_change.clone();
                                    let selected = props.selected.clone();
                                    let code = option.code.clone();
                                    Callback::from(move |_: MouseEvent| {
                                        on_change.emit(toggle_code(&selected, &code));
                                    })
                                };
                                let class = classes!("filter-option", is_selected.then_some("selected"));

                                html! {
                                    <li
                                        key={option.code.clone()}
                                        {class}
                                        role="option"
                                        aria-selected={is_selected.to_string()}
                                        {onclick}
                                    >
                                        <span class="filter-check">{if is_selected { "✓" } else { "" }}</span>
                                        {&option.description}
                                    </li>
                                }
                            }).collect::<Html>()
                        }
                    </ul>
                    if !props.selected.is_empty() {
                        <button type="button" class="filter-clear" onclick={on_clear}>
                            {"Clear all"}
                        </button>
                    }
                </div>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fuels() -> Vec<FilterOption> {
        vec![
            FilterOption::new("NG", "Natural Gas"),
            FilterOption::new("COL", "Coal"),
            FilterOption::new("SUN", "Solar"),
            FilterOption::new("WND", "Wind"),
        ]
    }

    fn set(codes: &[&str]) -> BTreeSet<String> {
        codes.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        for start in [set(&[]), set(&["NG"]), set(&["NG", "COL"])] {
            for code in ["NG", "SUN"] {
                let once = toggle_code(&start, code);
                assert_ne!(once.contains(code), start.contains(code));
                assert_eq!(toggle_code(&once, code), start);
            }
        }
    }

    #[test]
    fn test_clear_all_is_empty() {
        assert!(clear_all().is_empty());
    }

    #[test]
    fn test_sorted_by_description() {
        let codes: Vec<String> = sorted_options(&fuels()).into_iter().map(|o| o.code).collect();
        assert_eq!(codes, vec!["COL", "NG", "SUN", "WND"]);
    }

    #[test]
    fn test_matches_search() {
        let gas = FilterOption::new("NG", "Natural Gas");
        assert!(matches_search(&gas, ""));
        assert!(matches_search(&gas, "gas"));
        assert!(matches_search(&gas, "ng"));
        assert!(!matches_search(&gas, "coal"));
    }

    #[test]
    fn test_summary_label_empty_selection() {
        assert_eq!(summary_label(&fuels(), &set(&[]), 2), None);
    }

    #[test]
    fn test_summary_label_within_limit() {
        assert_eq!(
            summary_label(&fuels(), &set(&["NG", "COL"]), 2).as_deref(),
            Some("Coal, Natural Gas")
        );
    }

    #[test]
    fn test_summary_label_overflow() {
        assert_eq!(
            summary_label(&fuels(), &set(&["NG", "COL", "WND", "SUN"]), 2).as_deref(),
            Some("Coal, Natural Gas +2 more")
        );
    }

    #[test]
    fn test_summary_label_unknown_code() {
        assert_eq!(
            summary_label(&fuels(), &set(&["XYZ"]), 2).as_deref(),
            Some("XYZ")
        );
    }

    #[test]
    fn test_trigger_label_shows_summary_when_selected() {
        assert_eq!(
            trigger_label(&fuels(), &set(&["NG", "COL", "WND"]), 2, "All fuel types"),
            "Coal, Natural Gas +1 more"
        );
    }

    #[test]
    fn test_trigger_label_falls_back_to_placeholder() {
        assert_eq!(
            trigger_label(&fuels(), &set(&[]), 2, "All fuel types"),
            "All fuel types"
        );
    }
}
