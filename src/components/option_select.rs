use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::models::options::FilterOption;

#[derive(Properties, PartialEq)]
pub struct OptionSelectProps {
    pub label: AttrValue,
    pub options: Vec<FilterOption>,
    pub selected: Option<String>,
    pub on_change: Callback<String>,
}

/// Single-choice dropdown for frequency and metric
#[function_component(OptionSelect)]
pub fn option_select(props: &OptionSelectProps) -> Html {
    let on_change = {
        let callback = props.on_change.clone();
        Callback::from(move |e: Event| {
            let target: HtmlSelectElement = e.target_unchecked_into();
            let value = target.value();
            if !value.is_empty() {
                callback.emit(value);
            }
        })
    };

    let aria_label = format!("Select {}", props.label);

    html! {
        <label class="option-select">
            <span class="filter-label">{props.label.to_string()}</span>
            <select
                onchange={on_change}
                aria-label={aria_label.clone()}
                title={aria_label}
                disabled={props.options.is_empty()}
            >
                if props.selected.is_none() {
                    <option value="" selected={true} disabled={true}>{"Select..."}</option>
                }
                {
                    props.options.iter().map(|o| {
                        let selected = props.selected.as_deref() == Some(o.code.as_str());
                        html! {
                            <option value={o.code.clone()} {selected}>{&o.description}</option>
                        }
                    }).collect::<Html>()
                }
            </select>
        </label>
    }
}
