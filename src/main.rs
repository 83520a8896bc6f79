use energy_dashboard::components::{DashboardPage, Header};
use energy_dashboard::config::AppConfig;
use energy_dashboard::services::api::EnergyClient;
use energy_dashboard::services::auth::{AuthHandle, StoredSession};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
struct AppProps {
    client: Result<EnergyClient, String>,
    auth: AuthHandle,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    // Owns the reaction to auth changes; components only report them
    let user = {
        let auth = props.auth.clone();
        use_state(move || auth.current_user())
    };

    let on_signed_out = {
        let user = user.clone();
        Callback::from(move |()| user.set(None))
    };

    let body = match (&*user, &props.client) {
        (None, _) => html! {
            <main class="app-main">
                <div class="status idle">
                    <p>{"Sign in to view the energy dashboard."}</p>
                </div>
            </main>
        },
        (Some(_), Err(msg)) => html! {
            <main class="app-main">
                <div class="status error">
                    <p>{"❌ Error: "}{msg}</p>
                </div>
            </main>
        },
        (Some(_), Ok(client)) => html! {
            <DashboardPage client={client.clone()} />
        },
    };

    html! {
        <div class="app-container">
            if let Some(current) = &*user {
                <Header user={current.clone()} auth={props.auth.clone()} {on_signed_out} />
            }

            {body}

            <style>
                {include_str!("style.css")}
            </style>
        </div>
    }
}

fn main() {
    let client = AppConfig::from_env()
        .and_then(EnergyClient::with_config)
        .map_err(|e| e.to_string());

    if let Ok(client) = &client {
        gloo::console::log!(format!("Using API at {}", client.config().base_url()));
    }

    yew::Renderer::<App>::with_props(AppProps {
        client,
        auth: AuthHandle::new(StoredSession),
    })
    .render();
}
