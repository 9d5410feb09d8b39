use payloads::{EventId, responses};
use yew::prelude::*;
use yewdux::prelude::*;

use crate::{
    State, get_api_client,
    hooks::{FetchHookReturn, use_fetch_with_cache},
};

/// Hook for the full event list, cached in global state.
#[hook]
pub fn use_events() -> FetchHookReturn<Vec<responses::Event>> {
    let (state, dispatch) = use_store::<State>();

    let get_cached_state = state.clone();
    let should_fetch_state = state.clone();
    let fetch_dispatch = dispatch.clone();

    use_fetch_with_cache(
        (),
        move || get_cached_state.events.as_ref().cloned(),
        move || !should_fetch_state.events.is_fetched(),
        move || {
            let dispatch = fetch_dispatch.clone();
            async move {
                let api_client = get_api_client();
                let events = api_client
                    .list_events()
                    .await
                    .map_err(|e| {
                        e.detail().unwrap_or_else(|| e.to_string())
                    })?;
                tracing::debug!("Loaded {} events", events.len());
                dispatch.reduce_mut(|s| s.set_events(events.clone()));
                Ok(events)
            }
        },
    )
}

/// Hook for a single event. Served from the cached list when the visitor
/// came from it, fetched on its own for direct links.
#[hook]
pub fn use_event(event_id: EventId) -> FetchHookReturn<responses::Event> {
    let (state, dispatch) = use_store::<State>();

    let get_cached_state = state.clone();
    let should_fetch_state = state.clone();
    let fetch_dispatch = dispatch.clone();
    let cached_id = event_id.clone();
    let should_fetch_id = event_id.clone();
    let fetch_id = event_id.clone();

    use_fetch_with_cache(
        event_id,
        move || get_cached_state.get_event(&cached_id).cloned(),
        move || !should_fetch_state.has_event_loaded(&should_fetch_id),
        move || {
            let dispatch = fetch_dispatch.clone();
            let event_id = fetch_id.clone();
            async move {
                let api_client = get_api_client();
                let event = api_client
                    .get_event(&event_id)
                    .await
                    .map_err(|e| {
                        e.detail().unwrap_or_else(|| e.to_string())
                    })?;
                dispatch.reduce_mut(|s| s.set_event(event.clone()));
                Ok(event)
            }
        },
    )
}
