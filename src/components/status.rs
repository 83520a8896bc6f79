use crate::hooks::use_dashboard::DataState;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatusProps {
    pub state: DataState,
}

#[function_component(Status)]
pub fn status(props: &StatusProps) -> Html {
    match &props.state {
        DataState::Idle => html! {
            <div class="status idle">
                <p>{"Select a metric to load data"}</p>
            </div>
        },
        DataState::Loading => html! {
            <div class="status loading">
                <div class="spinner"></div>
                <p>{"Loading data..."}</p>
            </div>
        },
        DataState::Loaded(points) if points.is_empty() => html! {
            <div class="status empty">
                <p>{"No data for the selected filters"}</p>
            </div>
        },
        DataState::Loaded(points) => html! {
            <div class="status success">
                <p>{format!("{} data points loaded", points.len())}</p>
            </div>
        },
        DataState::Error(msg) => html! {
            <div class="status error">
                <p>{"Error: "}{msg}</p>
            </div>
        },
    }
}
