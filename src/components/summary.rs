use crate::models::aggregate::{RawDataPoint, stats};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SummaryProps {
    pub points: Rc<Vec<RawDataPoint>>,
}

fn format_value(value: f64, unit: Option<&str>) -> String {
    match unit {
        Some(unit) => format!("{value:.2} {unit}"),
        None => format!("{value:.2}"),
    }
}

#[function_component(Summary)]
pub fn summary(props: &SummaryProps) -> Html {
    match stats(&props.points) {
        Ok(summary) => {
            let unit = summary.unit.as_deref();
            html! {
                <div class="data-summary">
                    <div class="summary-grid">
                        <div class="summary-item">
                            <h3>{"Data Points"}</h3>
                            <p class="summary-value">{summary.count}</p>
                        </div>
                        <div class="summary-item">
                            <h3>{"Total"}</h3>
                            <p class="summary-value">{format_value(summary.total, unit)}</p>
                        </div>
                        <div class="summary-item">
                            <h3>{"Minimum"}</h3>
                            <p class="summary-value">{format_value(summary.min, unit)}</p>
                        </div>
                        <div class="summary-item">
                            <h3>{"Maximum"}</h3>
                            <p class="summary-value">{format_value(summary.max, unit)}</p>
                        </div>
                    </div>
                </div>
            }
        }
        Err(e) => html! {
            <div class="data-summary error">
                <p>{"Error calculating summary: "}{e.to_string()}</p>
            </div>
        },
    }
}
