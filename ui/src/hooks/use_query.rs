use payloads::ClientError;
use query::{QueryClient, QueryKey, QueryOptions, QueryResult, QueryStatus};
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use yew::prelude::*;

use crate::contexts::use_query_client;

/// Cached query hook return type
pub struct QueryHookReturn<T> {
    pub data: Option<T>,
    pub status: QueryStatus,
    /// No data yet and a fetch is pending or about to start.
    pub is_loading: bool,
    /// Any fetch in flight, including background refetches.
    pub is_fetching: bool,
    pub error: Option<Rc<ClientError>>,
    /// Invalidate the entry and fetch again.
    pub refetch: Callback<()>,
}

impl<T> QueryHookReturn<T> {
    /// Render based on query state with contextual loading/error messages.
    ///
    /// The render function receives the data, whether a refetch is in
    /// progress, and the error of a failed refetch (data from the previous
    /// fetch is still shown).
    pub fn render<F>(&self, context: &str, render_fn: F) -> Html
    where
        F: Fn(&T, bool, Option<String>) -> Html,
    {
        let error = self.error.as_ref().map(|e| e.to_string());
        match &self.data {
            Some(data) => render_fn(data, self.is_fetching, error),
            None if self.is_loading => html! {
                <div class="text-center py-12">
                    <p class="text-neutral-600 dark:text-neutral-400">
                        {format!("Loading {}...", context)}
                    </p>
                </div>
            },
            None if error.is_some() => html! {
                <div class="p-4 rounded-md bg-red-50 \
                           dark:bg-red-900/20 border \
                           border-red-200 dark:border-red-800">
                    <p class="text-sm text-red-700 \
                              dark:text-red-400">
                        {format!("Error loading {}: {}", context, error.unwrap_or_default())}
                    </p>
                </div>
            },
            None => html! {
                <div class="text-center py-12">
                    <p class="text-neutral-600 dark:text-neutral-400">
                        {format!("No {} found", context)}
                    </p>
                </div>
            },
        }
    }
}

type Latest<F, T> = (Rc<F>, QueryOptions<T>);

/// Fetch `key` with the closure and options last stored in `latest`,
/// invalidating the entry first when `force` is set.
fn fetch_latest<T, F, Fut>(
    client: QueryClient,
    key: QueryKey,
    latest: &RefCell<Option<Latest<F, T>>>,
    force: bool,
) -> Option<impl Future<Output = QueryResult<T, ClientError>> + use<T, F, Fut>>
where
    T: Clone + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, ClientError>> + 'static,
{
    let (fetch_fn, options) = latest.borrow().clone()?;
    Some(async move {
        if force {
            client.invalidate_query(&key);
        }
        client.fetch_query(&key, move || fetch_fn(), &options).await
    })
}

/// Query hook backed by the [`QueryClient`](query::QueryClient) in context.
///
/// Fetches on mount and whenever `key` changes, unless the cache already
/// holds fresh data or a fetch for `key` is in flight. Re-renders whenever
/// the entry for `key` changes, including changes caused by other
/// components sharing the key. A disabled query does not fetch, subscribe,
/// or create a cache entry; it only reads what is already cached.
#[hook]
pub fn use_query<T, F, Fut>(
    key: QueryKey,
    fetch_fn: F,
    options: QueryOptions<T>,
) -> QueryHookReturn<T>
where
    T: Clone + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, ClientError>> + 'static,
{
    let client = use_query_client();
    let update = use_force_update();
    let enabled = options.enabled;

    {
        let client = client.clone();
        use_effect_with((key.clone(), enabled), move |(key, enabled)| {
            let subscription = enabled
                .then(|| client.subscribe(key, move || update.force_update()));
            move || drop(subscription)
        });
    }

    // Refreshed every render so a refetch uses the latest closure and
    // options, even when the key is unchanged.
    let latest = use_mut_ref(|| None::<Latest<F, T>>);
    *latest.borrow_mut() = Some((Rc::new(fetch_fn), options));

    let fetch = {
        let client = client.clone();

        use_callback((key.clone(), enabled), move |force: bool, (key, _)| {
            let Some(fetch) = fetch_latest(client.clone(), key.clone(), &latest, force)
            else {
                return;
            };
            let key = key.clone();

            yew::platform::spawn_local(async move {
                if let Some(error) = &fetch.await.error {
                    tracing::warn!(%key, "query failed: {error}");
                }
            });
        })
    };

    // Auto-fetch on mount and when the key changes
    {
        let fetch = fetch.clone();
        use_effect_with((key.clone(), enabled), move |(_, enabled)| {
            if *enabled {
                fetch.emit(false);
            }
        });
    }

    let state: QueryResult<T, ClientError> =
        client.get_query_state(&key).unwrap_or_default();
    let is_loading = state.is_loading()
        || (enabled && state.status == QueryStatus::Idle && state.data.is_none());

    QueryHookReturn {
        data: state.data,
        status: state.status,
        is_loading,
        is_fetching: state.is_fetching,
        error: state.error,
        refetch: Callback::from(move |_| {
            if enabled {
                fetch.emit(true)
            }
        }),
    }
}
