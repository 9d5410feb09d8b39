use payloads::responses::Event;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::contexts::use_ticket_gate;
use crate::events::format_event_date;

#[derive(Properties, PartialEq)]
pub struct EventCardProps {
    pub event: Event,
}

#[function_component]
pub fn EventCard(props: &EventCardProps) -> Html {
    let request_tickets = use_ticket_gate();
    let event = &props.event;

    let on_get_tickets = {
        let ticket_url = event.ticket_url.clone();
        Callback::from(move |_: MouseEvent| {
            request_tickets.emit(ticket_url.clone());
        })
    };

    let detail_route = Route::EventDetail {
        id: event.id.to_string(),
    };

    html! {
        <div class="bg-white rounded-xl overflow-hidden shadow-md \
                    hover:shadow-lg transition-shadow flex flex-col">
            <Link<Route> to={detail_route.clone()} classes="block h-48 overflow-hidden">
                <img
                    src={event.image_url.clone()}
                    alt={event.title.clone()}
                    class="w-full h-full object-cover"
                />
            </Link<Route>>
            <div class="p-5 flex flex-col flex-1">
                <Link<Route> to={detail_route} classes="hover:underline">
                    <h3 class="text-lg font-bold mb-2 line-clamp-2">
                        {&event.title}
                    </h3>
                </Link<Route>>
                <p class="text-sm text-gray-500 mb-1">
                    {format_event_date(event.date.as_deref())}
                </p>
                <p class="text-sm text-gray-500 mb-4">{&event.venue}</p>
                <button
                    type="button"
                    onclick={on_get_tickets}
                    class="mt-auto w-full bg-purple-700 hover:bg-purple-800 \
                           text-white text-center py-2 px-4 rounded-md \
                           font-medium transition-colors"
                >
                    {"Get Tickets"}
                </button>
            </div>
        </div>
    }
}
