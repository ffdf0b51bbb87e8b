use jiff::Timestamp;
#[cfg(any(feature = "mock-time", test))]
use std::{cell::Cell, rc::Rc};

/// Clock used to decide whether cached data is still fresh.
#[derive(Clone)]
pub struct TimeSource {
    #[cfg(any(feature = "mock-time", test))]
    time: Rc<Cell<Timestamp>>,
}

impl TimeSource {
    #[allow(clippy::new_without_default)]
    #[cfg(not(any(feature = "mock-time", test)))]
    pub fn new() -> Self {
        Self {}
    }

    #[cfg(any(feature = "mock-time", test))]
    pub fn new(initial_time: Timestamp) -> Self {
        Self {
            time: Rc::new(Cell::new(initial_time)),
        }
    }

    #[cfg(not(any(feature = "mock-time", test)))]
    pub fn now(&self) -> Timestamp {
        Timestamp::now()
    }

    #[cfg(any(feature = "mock-time", test))]
    pub fn now(&self) -> Timestamp {
        self.time.get()
    }

    #[cfg(any(feature = "mock-time", test))]
    pub fn advance(&self, duration: jiff::SignedDuration) {
        self.time.set(self.time.get() + duration);
    }
}
