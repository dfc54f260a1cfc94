//! Store metrics.
//!
//! Metric names used by the store, plus [`describe_store_metrics`] to register
//! their descriptions with whichever recorder the application installed.
//! Without a recorder the macros are no-ops.

use metrics::{describe_counter, describe_histogram, Unit};

// Re-export metrics macros for use in other modules
pub use metrics::{counter, histogram};

/// Actions dispatched, labelled by action
pub const ACTIONS_TOTAL: &str = "store.actions.total";

/// Actions refused by the reducer, labelled by action
pub const ACTIONS_REJECTED: &str = "store.actions.rejected";

/// Time spent inside `Reducer::reduce`
pub const REDUCER_DURATION: &str = "store.reducer.duration_seconds";

/// Observer callbacks invoked
pub const OBSERVERS_NOTIFIED: &str = "store.observers.notified";

/// Devtools entries recorded
pub const DEVTOOLS_ENTRIES: &str = "store.devtools.entries";

/// Register descriptions for every store metric
pub fn describe_store_metrics() {
    describe_counter!(ACTIONS_TOTAL, Unit::Count, "Actions dispatched to the store");
    describe_counter!(
        ACTIONS_REJECTED,
        Unit::Count,
        "Actions refused by the reducer"
    );
    describe_histogram!(
        REDUCER_DURATION,
        Unit::Seconds,
        "Time spent reducing a single action"
    );
    describe_counter!(
        OBSERVERS_NOTIFIED,
        Unit::Count,
        "Observer callbacks invoked after successful dispatches"
    );
    describe_counter!(DEVTOOLS_ENTRIES, Unit::Count, "Devtools entries recorded");
}
