use std::future::Future;
use std::rc::Rc;
use yew::prelude::*;

/// Distinguishes "not fetched yet" from "fetched, possibly empty".
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState<T> {
    #[default]
    NotFetched,
    Fetched(T),
}

impl<T> FetchState<T> {
    pub fn is_fetched(&self) -> bool {
        matches!(self, FetchState::Fetched(_))
    }

    pub fn as_ref(&self) -> Option<&T> {
        match self {
            FetchState::NotFetched => None,
            FetchState::Fetched(data) => Some(data),
        }
    }
}

/// Generic fetch hook return type
pub struct FetchHookReturn<T> {
    pub data: FetchState<T>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub refetch: Callback<()>,
}

impl<T: Clone> FetchHookReturn<T> {
    /// Render the data once there is some, or a loading / error notice
    /// mentioning `context` (e.g. "events") until then.
    ///
    /// `render_fn` receives the data, whether a refetch is running, and the
    /// error of a failed refetch, if any.
    pub fn render<F>(&self, context: &str, render_fn: F) -> Html
    where
        F: Fn(&T, bool, Option<&String>) -> Html,
    {
        match self.data.as_ref() {
            Some(data) => render_fn(data, self.is_loading, self.error.as_ref()),
            None => match &self.error {
                Some(error) if !self.is_loading => html! {
                    <div class="text-center py-8 text-red-600">
                        {format!("Error loading {context}: {error}")}
                    </div>
                },
                _ => html! {
                    <div class="text-center py-8 text-gray-600">
                        {format!("Loading {context}...")}
                    </div>
                },
            },
        }
    }
}

/// Fetch hook backed by the yewdux [`State`](crate::State) cache.
///
/// - `get_cached` reads the value from global state, if present.
/// - `should_fetch` decides whether a request is needed on mount or when
///   `deps` change.
/// - `fetch_and_cache` performs the request and stores the result in global
///   state.
#[hook]
pub fn use_fetch_with_cache<T, D, GetCached, ShouldFetch, FetchAndCache, Fut>(
    deps: D,
    get_cached: GetCached,
    should_fetch: ShouldFetch,
    fetch_and_cache: FetchAndCache,
) -> FetchHookReturn<T>
where
    T: Clone + 'static,
    D: PartialEq + Clone + 'static,
    GetCached: Fn() -> Option<T> + 'static,
    ShouldFetch: Fn() -> bool + 'static,
    FetchAndCache: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, String>> + 'static,
{
    let error = use_state(|| None::<String>);
    let is_loading = use_state(|| false);

    let refetch = {
        let error = error.clone();
        let is_loading = is_loading.clone();
        let fetch_and_cache = Rc::new(fetch_and_cache);

        use_callback(deps.clone(), move |_, _| {
            let error = error.clone();
            let is_loading = is_loading.clone();
            let fetch_and_cache = fetch_and_cache.clone();

            yew::platform::spawn_local(async move {
                is_loading.set(true);
                error.set(None);

                if let Err(e) = fetch_and_cache().await {
                    tracing::warn!("Fetch failed: {e}");
                    error.set(Some(e));
                }

                is_loading.set(false);
            });
        })
    };

    {
        let refetch = refetch.clone();
        let is_loading = is_loading.clone();

        use_effect_with(deps, move |_| {
            if should_fetch() && !*is_loading {
                refetch.emit(());
            }
        });
    }

    let data = match get_cached() {
        Some(cached) => FetchState::Fetched(cached),
        None => FetchState::NotFetched,
    };

    // Nothing cached and no error yet means the first request is underway.
    let effective_is_loading =
        *is_loading || (!data.is_fetched() && error.is_none());

    FetchHookReturn {
        data,
        is_loading: effective_is_loading,
        error: (*error).clone(),
        refetch: Callback::from(move |_| refetch.emit(())),
    }
}
