//! # Entity Store Testing
//!
//! Testing utilities and helpers for reducer-driven entity stores.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A Given-When-Then harness for reducers
//! - An observer that records what it was notified with
//!
//! ## Example
//!
//! ```ignore
//! use entity_store_testing::{test_clock, RecordingObserver};
//!
//! #[test]
//! fn observers_see_every_add() {
//!     let mut store = TodoStore::unseeded().unwrap();
//!     let recorder = RecordingObserver::new();
//!     store.subscribe(recorder.callback(|s: &TodoState| s.len()));
//!
//!     store.add(NewTodo::new("Buy milk")).unwrap();
//!
//!     assert_eq!(recorder.calls(), vec![1]);
//! }
//! ```

use chrono::{DateTime, Utc};
use entity_store_core::environment::Clock;

/// Ergonomic reducer tests
pub mod reducer_test;

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use entity_store_testing::mocks::FixedClock;
    /// use entity_store_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Test helpers and utilities.
pub mod helpers {
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Collects a value from every observer notification
    ///
    /// Clones share the same recording, so the recorder can stay in the test
    /// while its callback is moved into a store.
    #[derive(Debug)]
    pub struct RecordingObserver<T> {
        calls: Rc<RefCell<Vec<T>>>,
    }

    impl<T: 'static> RecordingObserver<T> {
        /// Create an empty recorder
        #[must_use]
        pub fn new() -> Self {
            Self {
                calls: Rc::new(RefCell::new(Vec::new())),
            }
        }

        /// Build an observer callback that records `extract(state)`
        pub fn callback<S, F>(&self, extract: F) -> impl FnMut(&S) + use<T, S, F>
        where
            S: 'static,
            F: Fn(&S) -> T + 'static,
        {
            let calls = Rc::clone(&self.calls);
            move |state| calls.borrow_mut().push(extract(state))
        }

        /// Number of notifications seen so far
        #[must_use]
        pub fn count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    impl<T: Clone + 'static> RecordingObserver<T> {
        /// Everything recorded so far, oldest first
        #[must_use]
        pub fn calls(&self) -> Vec<T> {
            self.calls.borrow().clone()
        }
    }

    impl<T: 'static> Default for RecordingObserver<T> {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<T> Clone for RecordingObserver<T> {
        fn clone(&self) -> Self {
            Self {
                calls: Rc::clone(&self.calls),
            }
        }
    }
}

// Re-export commonly used items
pub use helpers::RecordingObserver;
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::{assertions, ReducerTest};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }

    #[test]
    fn recorder_clones_share_calls() {
        let recorder = RecordingObserver::new();
        let mut callback = recorder.clone().callback(|value: &u32| value * 2);

        callback(&1);
        callback(&5);

        assert_eq!(recorder.calls(), vec![2, 10]);
        assert_eq!(recorder.count(), 2);
    }
}
