use payloads::responses::Event as EventData;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yewdux::prelude::*;

use crate::State;
use crate::components::{EventCard, PaginationControls};
use crate::config::AppConfig;
use crate::contexts::use_subscription;
use crate::events::{EventQuery, filter_events, paginate, venues};
use crate::hooks::{use_events, use_title};

#[function_component]
pub fn HomePage() -> Html {
    use_title("Sydney Events Hub");
    let events_hook = use_events();
    let subscriber = use_subscription();
    let (state, dispatch) = use_store::<State>();
    let per_page = *use_memo((), |_| AppConfig::from_build_env().events_per_page);

    let on_search = {
        let dispatch = dispatch.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let search = input.value();
            dispatch.reduce_mut(move |state| {
                let query = EventQuery {
                    search,
                    venue: state.query.venue.clone(),
                };
                state.set_query(query);
            });
        })
    };

    let on_venue = {
        let dispatch = dispatch.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let venue = Some(select.value()).filter(|v| !v.is_empty());
            dispatch.reduce_mut(move |state| {
                let query = EventQuery {
                    search: state.query.search.clone(),
                    venue,
                };
                state.set_query(query);
            });
        })
    };

    let on_clear = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| {
            dispatch.reduce_mut(|state| state.set_query(EventQuery::default()));
        })
    };

    let on_page_change = {
        let dispatch = dispatch.clone();
        Callback::from(move |page: usize| {
            dispatch.reduce_mut(|state| state.set_page(page));
            if let Some(window) = web_sys::window() {
                window.scroll_to_with_x_and_y(0.0, 0.0);
            }
        })
    };

    let render_events = |events: &Vec<EventData>, _: bool, _: Option<&String>| {
        let matching = filter_events(events, &state.query);
        let page = paginate(&matching, state.page, per_page);
        let selected_venue = state.query.venue.clone().unwrap_or_default();

        html! {
            <>
                <div class="flex flex-col md:flex-row gap-3 mb-6">
                    <input
                        type="search"
                        placeholder="Search events"
                        aria-label="Search events"
                        value={state.query.search.clone()}
                        oninput={on_search.clone()}
                        class="flex-1 p-2 border rounded focus:outline-none \
                               focus:ring-2 focus:ring-purple-500"
                    />
                    <select
                        aria-label="Venue"
                        onchange={on_venue.clone()}
                        class="p-2 border rounded bg-white"
                    >
                        <option value="" selected={selected_venue.is_empty()}>
                            {"All venues"}
                        </option>
                        {for venues(events).into_iter().map(|venue| {
                            let selected = venue == selected_venue;
                            html! {
                                <option value={venue.clone()} {selected}>
                                    {venue}
                                </option>
                            }
                        })}
                    </select>
                    if !state.query.is_empty() {
                        <button
                            type="button"
                            onclick={on_clear.clone()}
                            class="px-4 py-2 text-sm text-gray-700 \
                                   hover:text-gray-900"
                        >
                            {"Clear filters"}
                        </button>
                    }
                </div>

                if page.total_items == 0 {
                    <p class="text-center py-8 text-gray-600">
                        {if events.is_empty() {
                            "No upcoming events yet."
                        } else {
                            "No events match your filters."
                        }}
                    </p>
                } else {
                    <p class="text-sm text-gray-500 mb-4">
                        {format!("{} events", page.total_items)}
                    </p>
                    <div class="grid grid-cols-1 md:grid-cols-2 \
                                lg:grid-cols-3 gap-6">
                        {for page.items.iter().map(|event| html! {
                            <EventCard
                                key={event.id.to_string()}
                                event={(*event).clone()}
                            />
                        })}
                    </div>
                    <PaginationControls
                        page={page.page}
                        total_pages={page.total_pages}
                        on_page_change={on_page_change.clone()}
                    />
                }
            </>
        }
    };

    html! {
        <div>
            <section class="bg-gradient-to-r from-purple-700 to-purple-900 \
                            text-white rounded-xl py-16 px-4 mb-8 text-center">
                <h1 class="text-4xl md:text-5xl font-bold mb-4">
                    {"Discover Sydney's Live Scene"}
                </h1>
                <p class="text-lg md:text-xl text-gray-100">
                    {"Find and book tickets for the best events happening in Sydney"}
                </p>
                if subscriber.is_some() {
                    <p class="mt-4 text-sm text-purple-100">
                        {"You're subscribed, so ticket links open straight away."}
                    </p>
                }
            </section>

            {events_hook.render("events", render_events)}
        </div>
    }
}
