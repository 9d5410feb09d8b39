use payloads::EventId;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::contexts::use_ticket_gate;
use crate::events::format_event_date;
use crate::hooks::{use_event, use_title};

#[derive(Properties, PartialEq)]
pub struct EventDetailPageProps {
    pub event_id: EventId,
}

#[function_component]
pub fn EventDetailPage(props: &EventDetailPageProps) -> Html {
    let event_hook = use_event(props.event_id.clone());
    let request_tickets = use_ticket_gate();
    let navigator = use_navigator().expect("Must be used within a Router");

    let title = match event_hook.data.as_ref() {
        Some(event) => format!("{} - Sydney Events Hub", event.title),
        None => "Event - Sydney Events Hub".to_string(),
    };
    use_title(&title);

    let on_back = Callback::from(move |_: MouseEvent| {
        navigator.push(&Route::Home);
    });

    html! {
        <div class="max-w-4xl mx-auto">
            <button
                type="button"
                onclick={on_back}
                class="mb-6 text-purple-700 hover:text-purple-900"
            >
                {"← Back to Events"}
            </button>
            {event_hook.render("event", |event, _, _| {
                let on_get_tickets = {
                    let request_tickets = request_tickets.clone();
                    let ticket_url = event.ticket_url.clone();
                    Callback::from(move |_: MouseEvent| {
                        request_tickets.emit(ticket_url.clone());
                    })
                };

                html! {
                    <article class="bg-white rounded-lg shadow-lg overflow-hidden">
                        <img
                            src={event.image_url.clone()}
                            alt={event.title.clone()}
                            class="w-full h-64 object-cover"
                        />
                        <div class="p-6">
                            <h1 class="text-3xl font-bold mb-4">{&event.title}</h1>
                            if !event.description.is_empty() {
                                <p class="text-gray-600 mb-4 whitespace-pre-line">
                                    {&event.description}
                                </p>
                            }
                            <dl class="space-y-2 mb-6 text-gray-700">
                                <div>
                                    <dt class="inline font-semibold">{"Date: "}</dt>
                                    <dd class="inline">
                                        {format_event_date(event.date.as_deref())}
                                    </dd>
                                </div>
                                <div>
                                    <dt class="inline font-semibold">{"Venue: "}</dt>
                                    <dd class="inline">{&event.venue}</dd>
                                </div>
                            </dl>
                            <button
                                type="button"
                                onclick={on_get_tickets}
                                class="inline-block bg-purple-700 text-white \
                                       py-2 px-6 rounded-md hover:bg-purple-800 \
                                       transition-colors"
                            >
                                {"Get Tickets"}
                            </button>
                        </div>
                    </article>
                }
            })}
        </div>
    }
}
