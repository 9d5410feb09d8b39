use payloads::APIClient;
use yew::prelude::*;
use yew_router::prelude::*;

pub mod components;
pub mod config;
pub mod contexts;
pub mod events;
pub mod hooks;
mod logs;
pub mod pages;
mod state;
pub mod subscription;
pub mod ticket_gate;

pub use state::State;

use components::layout::MainLayout;
use contexts::{SubscriptionProvider, TicketGateProvider};
use pages::{EventDetailPage, HomePage, NotFoundPage, SubscribePage};

/// Client for the events service configured for this build.
pub fn get_api_client() -> APIClient {
    APIClient::new(config::AppConfig::from_build_env().backend_url)
}

#[function_component]
pub fn App() -> Html {
    use_effect_with((), |_| logs::init_logging());

    html! {
        <BrowserRouter>
            <SubscriptionProvider>
                <TicketGateProvider>
                    <MainLayout>
                        <Switch<Route> render={switch} />
                    </MainLayout>
                </TicketGateProvider>
            </SubscriptionProvider>
        </BrowserRouter>
    }
}

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/event/:id")]
    EventDetail { id: String },
    #[at("/email")]
    Subscribe,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <HomePage /> },
        Route::EventDetail { id } => html! {
            <EventDetailPage event_id={payloads::EventId(id)} />
        },
        Route::Subscribe => html! { <SubscribePage /> },
        Route::NotFound => html! { <NotFoundPage /> },
    }
}
