//! In-memory todo store.
//!
//! Todos live in an id-keyed collection fed by a counter that never goes back,
//! so ids stay unique even after removals. The store:
//!
//! - adds todos under the next id,
//! - removes todos (unknown ids are ignored),
//! - toggles the finished flag (unknown ids are a [`TodoError::NotFound`]),
//! - notifies observers after every successful operation,
//! - records every accepted action in a devtools log.
//!
//! A new store is seeded with three todos.
//!
//! # Quick Start
//!
//! ```
//! use todo::{NewTodo, TodoId, TodoStore};
//!
//! # fn main() -> Result<(), todo::TodoError> {
//! let mut store = TodoStore::unseeded()?;
//!
//! let milk = store.add(NewTodo::new("Buy milk"))?;
//! let rent = store.add(NewTodo::new("Pay rent"))?;
//! assert_eq!((milk, rent), (TodoId::new(1), TodoId::new(2)));
//!
//! store.remove(milk)?;
//! store.toggle_finished(rent)?;
//!
//! let names: Vec<&str> = store.todos().map(|todo| todo.name.as_str()).collect();
//! assert_eq!(names, vec!["Pay rent"]);
//! assert_eq!(store.finished_count(), 1);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod reducer;
pub mod seed;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use error::TodoError;
pub use reducer::{TodoEnvironment, TodoReducer};
pub use store::{TodoStore, TodoStoreBuilder};
pub use types::{NewTodo, Todo, TodoAction, TodoId, TodoState};
