use futures::future::{FutureExt, LocalBoxFuture, Shared};
use jiff::{SignedDuration, Timestamp};
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::{Rc, Weak};

use crate::{QueryKey, QueryOptions, QueryResult, QueryStatus, TimeSource};

type Erased = Rc<dyn Any>;
type Outcome = Result<Erased, Erased>;
type InFlight = Shared<LocalBoxFuture<'static, Outcome>>;
type Listener = Rc<dyn Fn()>;

struct Entry {
    status: QueryStatus,
    data: Option<Erased>,
    error: Option<Erased>,
    data_updated_at: Option<Timestamp>,
    invalidated: bool,
    in_flight: Option<(u64, InFlight)>,
}

impl Entry {
    fn new() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            data_updated_at: None,
            invalidated: false,
            in_flight: None,
        }
    }

    fn is_fresh(&self, now: Timestamp, stale_time: SignedDuration) -> bool {
        !self.invalidated
            && self
                .data_updated_at
                .is_some_and(|at| now.duration_since(at) < stale_time)
    }

    fn snapshot<T: Clone + 'static, E: 'static>(
        &self,
        key: &QueryKey,
    ) -> QueryResult<T, E> {
        let data = self.data.as_ref().and_then(|data| {
            let typed = data.downcast_ref::<T>().cloned();
            if typed.is_none() {
                tracing::warn!(%key, "cached data does not have the requested type");
            }
            typed
        });
        let error = self
            .error
            .clone()
            .and_then(|error| error.downcast::<E>().ok());

        QueryResult {
            status: self.status,
            data,
            error,
            data_updated_at: self.data_updated_at,
            is_fetching: self.in_flight.is_some(),
        }
    }
}

#[derive(Default)]
struct Inner {
    entries: HashMap<QueryKey, Entry>,
    listeners: HashMap<QueryKey, Vec<(u64, Listener)>>,
    next_id: u64,
}

impl Inner {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

enum Plan {
    Join(u64, InFlight),
    Fetch,
}

/// Handle to a shared query cache.
///
/// Clones share the same cache. Everything is single threaded: entries live
/// behind `Rc<RefCell<..>>` and fetches are local futures. No borrow is held
/// across an await or while calling out to user code.
#[derive(Clone)]
pub struct QueryClient {
    inner: Rc<RefCell<Inner>>,
    time_source: TimeSource,
}

impl QueryClient {
    pub fn new() -> Self {
        Self::with_time_source(default_time_source())
    }

    pub fn with_time_source(time_source: TimeSource) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner::default())),
            time_source,
        }
    }

    pub fn time_source(&self) -> &TimeSource {
        &self.time_source
    }

    /// Return the cached result for `key` if it is fresh, otherwise fetch it.
    ///
    /// `fetch_fn` is only called when a fetch is actually started. Callers
    /// that arrive while a fetch for the same key is in flight wait for that
    /// fetch instead of starting another. A failed fetch keeps the data of
    /// the last successful one.
    pub async fn fetch_query<T, E, F, Fut>(
        &self,
        key: &QueryKey,
        fetch_fn: F,
        options: &QueryOptions<T>,
    ) -> QueryResult<T, E>
    where
        T: Clone + 'static,
        E: 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + 'static,
    {
        if !options.enabled {
            return self.get_query_state(key).unwrap_or_default();
        }

        let plan = {
            let now = self.time_source.now();
            let inner = self.inner.borrow();
            match inner.entries.get(key) {
                Some(Entry {
                    in_flight: Some((id, in_flight)),
                    ..
                }) => Plan::Join(*id, in_flight.clone()),
                Some(entry) if entry.is_fresh(now, options.stale_time) => {
                    return entry.snapshot(key);
                }
                _ => Plan::Fetch,
            }
        };

        let (fetch_id, in_flight, started) = match plan {
            Plan::Join(id, in_flight) => {
                tracing::debug!(%key, "joining in-flight fetch");
                (id, in_flight, false)
            }
            Plan::Fetch => {
                let fut = fetch_fn();
                let in_flight = async move {
                    fut.await
                        .map(|data| Rc::new(data) as Erased)
                        .map_err(|error| Rc::new(error) as Erased)
                }
                .boxed_local()
                .shared();

                let fetch_id = {
                    let inner = &mut *self.inner.borrow_mut();
                    let fetch_id = inner.next_id();
                    let entry =
                        inner.entries.entry(key.clone()).or_insert_with(Entry::new);
                    entry.in_flight = Some((fetch_id, in_flight.clone()));
                    if entry.data.is_none() {
                        entry.status = QueryStatus::Loading;
                    }
                    fetch_id
                };
                tracing::debug!(%key, fetch_id, "fetch started");
                self.notify(key);
                (fetch_id, in_flight, true)
            }
        };

        let outcome = in_flight.await;

        if self.settle(key, fetch_id, &outcome) {
            self.notify(key);
        }
        if started {
            if let (Some(on_success), Ok(data)) = (&options.on_success, &outcome) {
                if let Some(data) = data.downcast_ref::<T>() {
                    on_success(data);
                }
            }
        }

        self.get_query_state(key)
            .unwrap_or_else(|| detached_result(outcome))
    }

    /// Record the outcome of fetch `fetch_id`. Returns false if the entry
    /// was removed or another awaiter already recorded it.
    fn settle(&self, key: &QueryKey, fetch_id: u64, outcome: &Outcome) -> bool {
        let now = self.time_source.now();
        let mut inner = self.inner.borrow_mut();
        let Some(entry) = inner.entries.get_mut(key) else {
            return false;
        };
        if !matches!(&entry.in_flight, Some((id, _)) if *id == fetch_id) {
            return false;
        }

        entry.in_flight = None;
        match outcome {
            Ok(data) => {
                entry.status = QueryStatus::Success;
                entry.data = Some(data.clone());
                entry.error = None;
                entry.data_updated_at = Some(now);
                entry.invalidated = false;
                tracing::debug!(%key, fetch_id, "fetch succeeded");
            }
            Err(error) => {
                entry.status = QueryStatus::Error;
                entry.error = Some(error.clone());
                tracing::debug!(%key, fetch_id, "fetch failed");
            }
        }
        true
    }

    pub fn get_query_state<T: Clone + 'static, E: 'static>(
        &self,
        key: &QueryKey,
    ) -> Option<QueryResult<T, E>> {
        self.inner
            .borrow()
            .entries
            .get(key)
            .map(|entry| entry.snapshot(key))
    }

    pub fn get_query_data<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        let inner = self.inner.borrow();
        inner.entries.get(key)?.data.as_ref()?.downcast_ref::<T>().cloned()
    }

    /// Store `data` as if a fetch for `key` had just succeeded.
    pub fn set_query_data<T: 'static>(&self, key: &QueryKey, data: T) {
        let now = self.time_source.now();
        {
            let mut inner = self.inner.borrow_mut();
            let entry = inner.entries.entry(key.clone()).or_insert_with(Entry::new);
            entry.status = QueryStatus::Success;
            entry.data = Some(Rc::new(data));
            entry.error = None;
            entry.data_updated_at = Some(now);
            entry.invalidated = false;
        }
        self.notify(key);
    }

    /// Mark `key` stale so the next fetch goes to the network regardless of
    /// `stale_time`. Returns whether the key was cached.
    pub fn invalidate_query(&self, key: &QueryKey) -> bool {
        let found = match self.inner.borrow_mut().entries.get_mut(key) {
            Some(entry) => {
                entry.invalidated = true;
                true
            }
            None => false,
        };
        if found {
            self.notify(key);
        }
        found
    }

    pub fn remove_query(&self, key: &QueryKey) -> bool {
        let removed = self.inner.borrow_mut().entries.remove(key).is_some();
        if removed {
            self.notify(key);
        }
        removed
    }

    pub fn clear(&self) {
        let keys: Vec<QueryKey> = {
            let mut inner = self.inner.borrow_mut();
            inner.entries.drain().map(|(key, _)| key).collect()
        };
        for key in &keys {
            self.notify(key);
        }
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.inner.borrow().entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call `listener` whenever the entry for `key` changes. Dropping the
    /// returned subscription unsubscribes.
    pub fn subscribe(
        &self,
        key: &QueryKey,
        listener: impl Fn() + 'static,
    ) -> QuerySubscription {
        let inner = &mut *self.inner.borrow_mut();
        let id = inner.next_id();
        inner
            .listeners
            .entry(key.clone())
            .or_default()
            .push((id, Rc::new(listener)));

        QuerySubscription {
            inner: Rc::downgrade(&self.inner),
            key: key.clone(),
            id,
        }
    }

    fn notify(&self, key: &QueryKey) {
        let listeners: Vec<Listener> = match self.inner.borrow().listeners.get(key) {
            Some(listeners) => listeners.iter().map(|(_, l)| l.clone()).collect(),
            None => return,
        };
        for listener in listeners {
            listener();
        }
    }
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for QueryClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

#[cfg(not(any(feature = "mock-time", test)))]
fn default_time_source() -> TimeSource {
    TimeSource::new()
}

#[cfg(any(feature = "mock-time", test))]
fn default_time_source() -> TimeSource {
    TimeSource::new(Timestamp::now())
}

/// Result for a fetch whose entry was removed while it was in flight.
fn detached_result<T: Clone + 'static, E: 'static>(
    outcome: Outcome,
) -> QueryResult<T, E> {
    match outcome {
        Ok(data) => QueryResult {
            status: QueryStatus::Success,
            data: data.downcast_ref::<T>().cloned(),
            ..QueryResult::idle()
        },
        Err(error) => QueryResult {
            status: QueryStatus::Error,
            error: error.downcast::<E>().ok(),
            ..QueryResult::idle()
        },
    }
}

/// Listener registration returned by [`QueryClient::subscribe`].
pub struct QuerySubscription {
    inner: Weak<RefCell<Inner>>,
    key: QueryKey,
    id: u64,
}

impl Drop for QuerySubscription {
    fn drop(&mut self) {
        let Some(inner) = self.inner.upgrade() else {
            return;
        };
        let mut inner = inner.borrow_mut();
        if let Some(listeners) = inner.listeners.get_mut(&self.key) {
            listeners.retain(|(id, _)| *id != self.id);
            if listeners.is_empty() {
                inner.listeners.remove(&self.key);
            }
        }
    }
}
