use crate::config::Config;
use crate::models::aggregate::RawDataPoint;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct DataTableProps {
    pub points: Rc<Vec<RawDataPoint>>,
    #[prop_or(Config::TABLE_ROW_LIMIT)]
    pub row_limit: usize,
}

fn cell(value: Option<&str>) -> Html {
    html! { <td>{value.unwrap_or("—")}</td> }
}

/// Raw rows as returned by the backend, truncated to `row_limit`
#[function_component(DataTable)]
pub fn data_table(props: &DataTableProps) -> Html {
    let total = props.points.len();
    let shown = total.min(props.row_limit);

    html! {
        <div class="data-table">
            <table>
                <thead>
                    <tr>
                        <th>{"Timestamp"}</th>
                        <th>{"Metric"}</th>
                        <th>{"Value"}</th>
                        <th>{"Unit"}</th>
                        <th>{"Fuel"}</th>
                        <th>{"Prime Mover"}</th>
                        <th>{"State"}</th>
                        <th>{"Sector"}</th>
                    </tr>
                </thead>
                <tbody>
                    {
                        props.points.iter().take(shown).map(|p| html! {
                            <tr>
                                <td>{&p.timestamp}</td>
                                <td>{&p.metric_code}</td>
                                <td class="numeric">
                                    {p.value.map(|v| format!("{v:.2}")).unwrap_or_else(|| "—".to_string())}
                                </td>
                                {cell(p.unit_code.as_deref())}
                                {cell(p.fuel_code.as_deref())}
                                {cell(p.prime_mover_code.as_deref())}
                                {cell(p.state_code.as_deref())}
                                {cell(p.sector_code.as_deref())}
                            </tr>
                        }).collect::<Html>()
                    }
                </tbody>
            </table>
            if shown < total {
                <p class="table-note">{format!("Showing {shown} of {total} rows")}</p>
            }
        </div>
    }
}
