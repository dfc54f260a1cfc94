//! Reducer logic for the todo store.
//!
//! Every operation of the store is an arm here. Arms validate before they
//! mutate, so a rejected action leaves the state untouched.

use crate::seed;
use crate::types::{NewTodo, Todo, TodoAction, TodoState};
use entity_store_core::{
    effect::Effect, entity::LookupError, reducer::Reducer, smallvec, SmallVec,
};

/// Environment dependencies for the todo reducer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoEnvironment {
    /// Todos added by [`TodoAction::Init`], in order
    pub seed: Vec<NewTodo>,
}

impl TodoEnvironment {
    /// Creates an environment with a custom seed
    #[must_use]
    pub const fn new(seed: Vec<NewTodo>) -> Self {
        Self { seed }
    }

    /// An environment whose `Init` adds nothing
    #[must_use]
    pub const fn empty() -> Self {
        Self { seed: Vec::new() }
    }
}

impl Default for TodoEnvironment {
    fn default() -> Self {
        Self::new(seed::default_seed())
    }
}

/// Reducer for the todo store
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;
    type Error = LookupError;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Result<SmallVec<[Effect<Self::Action>; 4]>, Self::Error> {
        match action {
            TodoAction::Init => {
                let adds = env
                    .seed
                    .iter()
                    .cloned()
                    .map(|todo| Effect::send(TodoAction::Add(todo)))
                    .collect();
                Ok(smallvec![Effect::chain(adds)])
            },

            TodoAction::Add(todo) => {
                let id = state.todos.insert_with(|id| Todo::from_new(id, todo));
                tracing::debug!(%id, "Todo added");
                Ok(smallvec![Effect::None])
            },

            TodoAction::Remove { id } => {
                if state.todos.remove(id).is_none() {
                    tracing::debug!(%id, "Remove of unknown todo ignored");
                }
                Ok(smallvec![Effect::None])
            },

            TodoAction::ToggleFinished { id } => {
                state.todos.update(id, Todo::toggle_finished)?;
                Ok(smallvec![Effect::None])
            },
        }
    }
}
