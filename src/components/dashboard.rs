use chrono::{Local, NaiveDate};
use std::collections::BTreeSet;
use yew::prelude::*;

use crate::components::{
    chart::{CompositionChart, TimeSeriesChart},
    data_table::DataTable,
    date_range::DateRangeInput,
    filter_selector::FilterSelector,
    option_select::OptionSelect,
    status::Status,
    summary::Summary,
};
use crate::hooks::use_dashboard::{DashboardAction, OptionsState, use_dashboard};
use crate::models::options::Dimension;
use crate::services::api::EnergyClient;

#[derive(Properties, PartialEq)]
pub struct DashboardPageProps {
    pub client: EnergyClient,
}

/// Filters, charts and table for the signed-in user
#[function_component(DashboardPage)]
pub fn dashboard_page(props: &DashboardPageProps) -> Html {
    let state = use_dashboard(props.client.clone());

    let action_callback = |make: fn(BTreeSet<String>) -> DashboardAction| {
        let state = state.clone();
        Callback::from(move |codes: BTreeSet<String>| state.dispatch(make(codes)))
    };
    let on_fuel_change = action_callback(DashboardAction::SetFuelCodes);
    let on_prime_mover_change = action_callback(DashboardAction::SetPrimeMovers);
    let on_state_change = action_callback(DashboardAction::SetStateCodes);

    let date_callback = |make: fn(NaiveDate) -> DashboardAction| {
        let state = state.clone();
        Callback::from(move |date: NaiveDate| state.dispatch(make(date)))
    };
    let on_start_change = date_callback(DashboardAction::SetStartDate);
    let on_end_change = date_callback(DashboardAction::SetEndDate);

    let code_callback = |make: fn(String) -> DashboardAction| {
        let state = state.clone();
        Callback::from(move |code: String| state.dispatch(make(code)))
    };
    let on_frequency_change = code_callback(DashboardAction::SetFrequency);
    let on_metric_change = code_callback(DashboardAction::SetMetric);

    let on_reset = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| {
            state.dispatch(DashboardAction::Reset {
                today: Local::now().date_naive(),
            })
        })
    };

    let selection = &state.selection;
    let filters = match &state.options {
        OptionsState::Loading => html! {
            <div class="status loading">
                <div class="spinner"></div>
                <p>{"Loading filters..."}</p>
            </div>
        },
        OptionsState::Error(msg) => html! {
            <div class="status error">
                <p>{msg}</p>
            </div>
        },
        OptionsState::Loaded(options) => html! {
            <div class="filter-panel">
                <DateRangeInput
                    range={selection.date_range}
                    {on_start_change}
                    {on_end_change}
                />
                <OptionSelect
                    label="Frequency"
                    options={options.frequencies.clone()}
                    selected={selection.frequency.clone()}
                    on_change={on_frequency_change}
                />
                <OptionSelect
                    label="Metric"
                    options={options.metrics.clone()}
                    selected={selection.metric.clone()}
                    on_change={on_metric_change}
                />
                <FilterSelector
                    label={Dimension::FuelCodes.label()}
                    placeholder="All fuel types"
                    options={options.get(Dimension::FuelCodes).to_vec()}
                    selected={selection.fuel_codes.clone()}
                    on_change={on_fuel_change}
                />
                <FilterSelector
                    label={Dimension::PrimeMovers.label()}
                    placeholder="All prime movers"
                    options={options.get(Dimension::PrimeMovers).to_vec()}
                    selected={selection.prime_movers.clone()}
                    on_change={on_prime_mover_change}
                />
                <FilterSelector
                    label={Dimension::States.label()}
                    placeholder="All states"
                    options={options.get(Dimension::States).to_vec()}
                    selected={selection.state_codes.clone()}
                    on_change={on_state_change}
                />
                <button type="button" class="reset-filters" onclick={on_reset}>
                    {"Reset filters"}
                </button>
            </div>
        },
    };

    let group_by = state.group_by();

    html! {
        <main class="app-main">
            <section class="filter-section">
                <h2>{"Filters"}</h2>
                {filters}
            </section>

            <section class="status-section">
                <Status state={state.data.clone()} />
            </section>

            if let Some(points) = state.data.data().filter(|p| !p.is_empty()) {
                <section class="data-section">
                    <h2>{"Summary"}</h2>
                    <Summary points={points.clone()} />
                </section>

                <section class="chart-section">
                    <TimeSeriesChart
                        id="time-series-chart"
                        points={points.clone()}
                        {group_by}
                        unit={points.iter().find_map(|p| p.unit_code.clone())}
                    />
                    <CompositionChart
                        id="composition-chart"
                        points={points.clone()}
                        {group_by}
                    />
                </section>

                <section class="table-section">
                    <h2>{"Data"}</h2>
                    <DataTable points={points.clone()} />
                </section>
            }
        </main>
    }
}
