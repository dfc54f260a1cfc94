//! Domain types for the todo store.
//!
//! A todo list is a collection of [`Todo`] entities keyed by store-assigned
//! ids. Callers describe new todos with [`NewTodo`], which has every field of
//! a todo except the id.

use chrono::{DateTime, Utc};
use entity_store_core::action::Action;
use entity_store_core::entity::{EntityId, EntityState};
use serde::{Deserialize, Serialize};

/// Identifier of a todo, assigned by the store
pub type TodoId = EntityId;

/// A single todo
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier, assigned by the store
    pub id: TodoId,
    /// Short label
    pub name: String,
    /// Whether the todo is done
    pub finished: bool,
    /// Optional longer text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional due date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
}

impl Todo {
    /// Builds the stored todo for `id` from its creation fields
    #[must_use]
    pub fn from_new(id: TodoId, todo: NewTodo) -> Self {
        let NewTodo {
            name,
            finished,
            description,
            deadline,
        } = todo;

        Self {
            id,
            name,
            finished,
            description,
            deadline,
        }
    }

    /// Flips the finished flag
    pub const fn toggle_finished(&mut self) {
        self.finished = !self.finished;
    }
}

/// Fields of a todo that the caller supplies on creation
///
/// # Example
///
/// ```
/// use todo::NewTodo;
///
/// let todo = NewTodo::new("Clean the room").with_finished(true);
/// assert!(todo.finished);
/// assert_eq!(todo.description, None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodo {
    /// Short label
    pub name: String,
    /// Whether the todo starts out done
    pub finished: bool,
    /// Optional longer text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional due date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
}

impl NewTodo {
    /// An unfinished todo with only a name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            finished: false,
            description: None,
            deadline: None,
        }
    }

    /// Set the finished flag
    #[must_use]
    pub const fn with_finished(mut self, finished: bool) -> Self {
        self.finished = finished;
        self
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the deadline
    #[must_use]
    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// State of the todo store
///
/// Holds the todo entities and the id counter. Only the reducer mutates it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TodoState {
    pub(crate) todos: EntityState<Todo>,
}

impl TodoState {
    /// Creates an empty state with the id counter at 0
    #[must_use]
    pub const fn new() -> Self {
        Self {
            todos: EntityState::new(),
        }
    }

    /// Returns a todo by id
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.get(id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn exists(&self, id: TodoId) -> bool {
        self.todos.contains(id)
    }

    /// All todos in id order
    pub fn todos(&self) -> impl Iterator<Item = &Todo> {
        self.todos.iter()
    }

    /// Returns the number of todos
    #[must_use]
    pub fn len(&self) -> usize {
        self.todos.len()
    }

    /// Returns `true` if there are no todos
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Returns the number of finished todos
    #[must_use]
    pub fn finished_count(&self) -> usize {
        self.todos.iter().filter(|todo| todo.finished).count()
    }

    /// The last id handed out, `0` before the first add
    #[must_use]
    pub const fn last_id(&self) -> u64 {
        self.todos.last_id()
    }
}

impl FromIterator<NewTodo> for TodoState {
    fn from_iter<I: IntoIterator<Item = NewTodo>>(iter: I) -> Self {
        let mut state = Self::new();
        for todo in iter {
            state.todos.insert_with(|id| Todo::from_new(id, todo));
        }
        state
    }
}

/// Everything the todo store can be asked to do
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoAction {
    /// Seed the store; sent once when the store is created
    Init,
    /// Add a todo under the next id
    Add(NewTodo),
    /// Remove a todo; unknown ids are ignored
    Remove {
        /// Todo to remove
        id: TodoId,
    },
    /// Flip a todo's finished flag
    ToggleFinished {
        /// Todo to toggle
        id: TodoId,
    },
}

impl Action for TodoAction {
    fn label(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Add(_) => "add todo",
            Self::Remove { .. } => "remove todo",
            Self::ToggleFinished { .. } => "toggle todo",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_new_keeps_every_field() {
        let deadline = Utc::now();
        let todo = Todo::from_new(
            TodoId::new(4),
            NewTodo::new("Pay rent")
                .with_description("before the 3rd")
                .with_deadline(deadline),
        );

        assert_eq!(todo.id, TodoId::new(4));
        assert_eq!(todo.name, "Pay rent");
        assert!(!todo.finished);
        assert_eq!(todo.description.as_deref(), Some("before the 3rd"));
        assert_eq!(todo.deadline, Some(deadline));
    }

    #[test]
    fn toggle_twice_restores_flag() {
        let mut todo = Todo::from_new(TodoId::new(1), NewTodo::new("Walk"));
        todo.toggle_finished();
        assert!(todo.finished);
        todo.toggle_finished();
        assert!(!todo.finished);
    }

    #[test]
    fn state_from_iterator_assigns_ids_in_order() {
        let state: TodoState = [NewTodo::new("a"), NewTodo::new("b").with_finished(true)]
            .into_iter()
            .collect();

        let ids: Vec<u64> = state.todos().map(|todo| todo.id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(state.finished_count(), 1);
        assert_eq!(state.last_id(), 2);
    }

    #[test]
    fn labels() {
        assert_eq!(TodoAction::Init.label(), "init");
        assert_eq!(TodoAction::Add(NewTodo::new("x")).label(), "add todo");
        assert_eq!(
            TodoAction::Remove { id: TodoId::new(1) }.label(),
            "remove todo"
        );
        assert_eq!(
            TodoAction::ToggleFinished { id: TodoId::new(1) }.label(),
            "toggle todo"
        );
    }

    #[test]
    fn optional_fields_are_omitted_from_json() {
        let todo = Todo::from_new(TodoId::new(1), NewTodo::new("Walk"));
        let json = serde_json::to_value(&todo).unwrap();

        assert_eq!(json, serde_json::json!({ "id": 1, "name": "Walk", "finished": false }));
    }
}
