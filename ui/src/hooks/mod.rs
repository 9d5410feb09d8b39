//! Hooks shared by pages.
//!
//! Data hooks return a [`FetchHookReturn`]: `data` is `NotFetched` until the
//! first successful request, `is_loading` covers both the first request and
//! refetches, and `error` holds the message of the last failed request.

pub mod use_events;
pub mod use_fetch;
pub mod use_title;

pub use use_events::{use_event, use_events};
pub use use_fetch::{FetchHookReturn, FetchState, use_fetch_with_cache};
pub use use_title::use_title;
