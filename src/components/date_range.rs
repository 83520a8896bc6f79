use chrono::NaiveDate;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::models::selection::{DateRange, parse_date};

#[derive(Properties, PartialEq)]
pub struct DateRangeInputProps {
    pub range: DateRange,
    pub on_start_change: Callback<NaiveDate>,
    pub on_end_change: Callback<NaiveDate>,
}

fn date_callback(callback: Callback<NaiveDate>) -> Callback<Event> {
    Callback::from(move |e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        if let Some(date) = parse_date(&input.value()) {
            callback.emit(date);
        }
    })
}

/// Start and end date pickers. The end picker cannot go before the start.
#[function_component(DateRangeInput)]
pub fn date_range_input(props: &DateRangeInputProps) -> Html {
    let start = props.range.start_param();
    let end = props.range.end_param();

    let class = classes!("date-range", (!props.range.is_ordered()).then_some("invalid"));

    html! {
        <div {class}>
            <label>
                <span class="filter-label">{"Start date"}</span>
                <input
                    type="date"
                    value={start.clone()}
                    max={end.clone()}
                    onchange={date_callback(props.on_start_change.clone())}
                />
            </label>
            <label>
                <span class="filter-label">{"End date"}</span>
                <input
                    type="date"
                    value={end}
                    min={start}
                    onchange={date_callback(props.on_end_change.clone())}
                />
            </label>
        </div>
    }
}
