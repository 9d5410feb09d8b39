use payloads::{EventId, responses};
use std::collections::HashMap;
use yewdux::prelude::*;

use crate::events::EventQuery;
use crate::hooks::FetchState;

#[derive(Default, Clone, PartialEq, Store)]
pub struct State {
    // === Event list (managed by use_events) ===
    pub events: FetchState<Vec<responses::Event>>,

    // === Events fetched one at a time (managed by use_event) ===
    pub individual_events: HashMap<EventId, responses::Event>,

    // === Listing filters, kept while visiting detail pages ===
    pub query: EventQuery,
    pub page: usize,
}

impl State {
    pub fn set_events(&mut self, events: Vec<responses::Event>) {
        self.events = FetchState::Fetched(events);
    }

    /// Look an event up in the list first, then among single fetches.
    pub fn get_event(&self, event_id: &EventId) -> Option<&responses::Event> {
        self.events
            .as_ref()
            .and_then(|events| events.iter().find(|e| &e.id == event_id))
            .or_else(|| self.individual_events.get(event_id))
    }

    pub fn has_event_loaded(&self, event_id: &EventId) -> bool {
        self.get_event(event_id).is_some()
    }

    pub fn set_event(&mut self, event: responses::Event) {
        self.individual_events.insert(event.id.clone(), event);
    }

    /// Changing the filters always starts over at the first page.
    pub fn set_query(&mut self, query: EventQuery) {
        if self.query != query {
            self.query = query;
            self.page = 1;
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }
}
