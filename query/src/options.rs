use jiff::SignedDuration;
use std::fmt;
use std::rc::Rc;

/// Options understood by [`QueryClient::fetch_query`](crate::QueryClient::fetch_query).
pub struct QueryOptions<T> {
    /// A disabled query never fetches and never creates a cache entry.
    pub enabled: bool,
    /// How long fetched data counts as fresh. Zero means stale on arrival,
    /// so every fetch goes to the network unless one is already in flight.
    pub stale_time: SignedDuration,
    /// Called with the data of each successful fetch this query started.
    pub on_success: Option<Rc<dyn Fn(&T)>>,
}

impl<T> QueryOptions<T> {
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn stale_time(mut self, stale_time: SignedDuration) -> Self {
        self.stale_time = stale_time;
        self
    }

    /// Data never goes stale; only invalidation triggers a refetch.
    pub fn never_stale(self) -> Self {
        self.stale_time(SignedDuration::MAX)
    }

    pub fn on_success(mut self, f: impl Fn(&T) + 'static) -> Self {
        self.on_success = Some(Rc::new(f));
        self
    }
}

impl<T> Default for QueryOptions<T> {
    fn default() -> Self {
        Self {
            enabled: true,
            stale_time: SignedDuration::ZERO,
            on_success: None,
        }
    }
}

// Manual impls: `T` itself need not be Clone or Debug.
impl<T> Clone for QueryOptions<T> {
    fn clone(&self) -> Self {
        Self {
            enabled: self.enabled,
            stale_time: self.stale_time,
            on_success: self.on_success.clone(),
        }
    }
}

impl<T> PartialEq for QueryOptions<T> {
    fn eq(&self, other: &Self) -> bool {
        self.enabled == other.enabled
            && self.stale_time == other.stale_time
            && match (&self.on_success, &other.on_success) {
                (None, None) => true,
                (Some(a), Some(b)) => Rc::ptr_eq(a, b),
                _ => false,
            }
    }
}

impl<T> fmt::Debug for QueryOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryOptions")
            .field("enabled", &self.enabled)
            .field("stale_time", &self.stale_time)
            .field("on_success", &self.on_success.is_some())
            .finish()
    }
}
