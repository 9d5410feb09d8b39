//! Client-side handling of the event list: search, venue filter, paging and
//! date display.

use jiff::{Timestamp, civil, tz};
use payloads::responses::Event;

/// Filters applied to the event list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventQuery {
    /// Free text matched against title, venue and description.
    pub search: String,
    /// Only show events at exactly this venue.
    pub venue: Option<String>,
}

impl EventQuery {
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.venue.is_none()
    }

    pub fn matches(&self, event: &Event) -> bool {
        if let Some(venue) = &self.venue
            && event.venue.trim() != venue.trim()
        {
            return false;
        }

        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&event.title, &event.venue, &event.description]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

pub fn filter_events<'a>(
    events: &'a [Event],
    query: &EventQuery,
) -> Vec<&'a Event> {
    events.iter().filter(|event| query.matches(event)).collect()
}

/// Distinct venues, sorted, for the venue selector.
pub fn venues(events: &[Event]) -> Vec<String> {
    let mut venues: Vec<String> = events
        .iter()
        .map(|event| event.venue.trim())
        .filter(|venue| !venue.is_empty())
        .map(str::to_string)
        .collect();
    venues.sort_by(|a, b| {
        a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
    });
    venues.dedup();
    venues
}

/// One page of a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually shown.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Cut `items` into pages of `per_page` and return page `page` (1-based).
///
/// Out of range pages are clamped, so a list that shrank under the current
/// page number still shows its last page.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);

    let items = items
        .iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .cloned()
        .collect();

    Page {
        items,
        page,
        total_pages,
        total_items,
    }
}

const RELATIVE_WORDS: [&str; 9] = [
    "today",
    "tomorrow",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Human readable date for an event card.
///
/// Scraped dates are either ISO 8601 or already human phrases like
/// "Tomorrow at 12:00 PM", which are shown as they are.
pub fn format_event_date(date: Option<&str>) -> String {
    format_event_date_in(date, &tz::TimeZone::system())
}

/// [`format_event_date`] with timestamps shown in `time_zone`.
pub fn format_event_date_in(
    date: Option<&str>,
    time_zone: &tz::TimeZone,
) -> String {
    let Some(date) = date.map(str::trim).filter(|date| !date.is_empty())
    else {
        return "Date TBA".to_string();
    };

    let lower = date.to_lowercase();
    if RELATIVE_WORDS.iter().any(|word| lower.contains(word)) {
        return date.to_string();
    }

    if let Ok(timestamp) = date.parse::<Timestamp>() {
        let zoned = timestamp.to_zoned(time_zone.clone());
        return format_civil(zoned.datetime());
    }
    // A bare date would also parse as a date-time at midnight.
    let has_time = date.contains(['T', 't', ' ']);
    if !has_time && let Ok(day) = date.parse::<civil::Date>() {
        return day.strftime("%a, %b %-d").to_string();
    }
    if let Ok(datetime) = date.parse::<civil::DateTime>() {
        return format_civil(datetime);
    }

    tracing::warn!("Invalid event date: {date}");
    "Invalid date".to_string()
}

fn format_civil(datetime: civil::DateTime) -> String {
    datetime.strftime("%a, %b %-d, %-I:%M %p").to_string()
}
