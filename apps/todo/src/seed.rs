//! Initial todos added when a store is created.

use crate::types::NewTodo;

/// The todos every new store starts with; they receive ids 1, 2 and 3
#[must_use]
pub fn default_seed() -> Vec<NewTodo> {
    vec![
        NewTodo::new("Go for a Walk"),
        NewTodo::new("Sleep 8 hours once"),
        NewTodo::new("Clean the room").with_finished(true),
    ]
}
