use jiff::Timestamp;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryStatus {
    /// Nothing fetched yet and nothing in flight.
    #[default]
    Idle,
    /// First fetch in flight, no data yet.
    Loading,
    Success,
    /// Last fetch failed. Data from an earlier success may still be present.
    Error,
}

/// Snapshot of one cache entry.
#[derive(Debug)]
pub struct QueryResult<T, E> {
    pub status: QueryStatus,
    pub data: Option<T>,
    pub error: Option<Rc<E>>,
    pub data_updated_at: Option<Timestamp>,
    /// A fetch is in flight, initial or background.
    pub is_fetching: bool,
}

impl<T, E> QueryResult<T, E> {
    pub fn idle() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            data_updated_at: None,
            is_fetching: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading
    }

    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Success
    }

    pub fn is_error(&self) -> bool {
        self.status == QueryStatus::Error
    }
}

impl<T, E> Default for QueryResult<T, E> {
    fn default() -> Self {
        Self::idle()
    }
}

impl<T: Clone, E> Clone for QueryResult<T, E> {
    fn clone(&self) -> Self {
        Self {
            status: self.status,
            data: self.data.clone(),
            error: self.error.clone(),
            data_updated_at: self.data_updated_at,
            is_fetching: self.is_fetching,
        }
    }
}
