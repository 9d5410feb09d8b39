use payloads::APIClient;
use yew::prelude::*;

use crate::components::TicketGateModal;
use crate::config::AppConfig;
use crate::get_api_client;
use crate::subscription::SubscriptionStore;
use crate::ticket_gate::{BrowserNavigator, TicketGate};

pub type BrowserTicketGate = TicketGate<APIClient, BrowserNavigator>;

#[derive(Properties, PartialEq)]
pub struct TicketGateProviderProps {
    pub children: Children,
}

/// Shares one ticket gate with every page and renders its modal.
#[function_component]
pub fn TicketGateProvider(props: &TicketGateProviderProps) -> Html {
    let store = use_context::<SubscriptionStore>().expect(
        "TicketGateProvider must be used within a SubscriptionProvider",
    );
    let force_update = use_force_update();

    let gate = use_memo(store, move |store| {
        let config = AppConfig::from_build_env();
        tracing::debug!("Ticket gate uses {:?} verification", config.verification);
        TicketGate::new(
            config.verification,
            store.clone(),
            get_api_client(),
            BrowserNavigator,
        )
        .with_redirect_delay(config.redirect_delay_ms)
        .on_change(move || force_update.force_update())
    });
    let gate = (*gate).clone();
    let flow = gate.snapshot();

    html! {
        <ContextProvider<BrowserTicketGate> context={gate.clone()}>
            {props.children.clone()}
            <TicketGateModal {gate} {flow} />
        </ContextProvider<BrowserTicketGate>>
    }
}

/// Returns a callback that starts the ticket flow for a ticket URL.
#[hook]
pub fn use_ticket_gate() -> Callback<String> {
    let gate = use_context::<BrowserTicketGate>()
        .expect("use_ticket_gate must be used within a TicketGateProvider");
    Callback::from(move |ticket_url: String| gate.request_tickets(&ticket_url))
}
