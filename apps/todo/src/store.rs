//! The todo store facade.
//!
//! [`TodoStore`] wraps a runtime [`Store`] running [`TodoReducer`] and exposes
//! the todo operations as methods. Creating one runs the bootstrap: an
//! [`TodoAction::Init`] that adds the seed todos before anyone can observe the
//! store.

use crate::error::TodoError;
use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::types::{NewTodo, Todo, TodoAction, TodoId, TodoState};
use entity_store_core::environment::{Clock, SystemClock};
use entity_store_runtime::{DevtoolsLog, Store, StoreConfig, SubscriptionId};

/// Name used for logs and the devtools log
pub const STORE_NAME: &str = "todo";

/// In-memory todo collection with observers and a devtools log
///
/// # Example
///
/// ```
/// use todo::{NewTodo, TodoStore};
///
/// # fn main() -> Result<(), todo::TodoError> {
/// let mut store = TodoStore::new()?;
/// assert_eq!(store.len(), 3);
///
/// let id = store.add(NewTodo::new("Buy milk"))?;
/// store.toggle_finished(id)?;
/// assert!(store.get(id).is_some_and(|todo| todo.finished));
///
/// store.remove(id)?;
/// assert!(store.get(id).is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TodoStore {
    store: Store<TodoReducer>,
}

impl TodoStore {
    /// Creates a store seeded with the default todos
    ///
    /// # Errors
    ///
    /// Only fails if bootstrapping fails, which the default seed never does.
    pub fn new() -> Result<Self, TodoError> {
        Self::builder().build()
    }

    /// Creates a store with no todos
    ///
    /// # Errors
    ///
    /// Same as [`TodoStore::new`].
    pub fn unseeded() -> Result<Self, TodoError> {
        Self::builder()
            .environment(TodoEnvironment::empty())
            .build()
    }

    /// Starts building a store with custom configuration
    #[must_use]
    pub fn builder() -> TodoStoreBuilder {
        TodoStoreBuilder::default()
    }

    /// Adds a todo and returns the id it was given
    ///
    /// # Errors
    ///
    /// Adding never fails at the domain level; the `Result` carries runtime
    /// errors from the underlying store.
    pub fn add(&mut self, todo: NewTodo) -> Result<TodoId, TodoError> {
        self.store.send(TodoAction::Add(todo))?;
        Ok(TodoId::new(self.store.current().last_id()))
    }

    /// Removes a todo; removing an unknown id does nothing
    ///
    /// # Errors
    ///
    /// Removing never fails at the domain level; the `Result` carries runtime
    /// errors from the underlying store.
    pub fn remove(&mut self, id: TodoId) -> Result<(), TodoError> {
        self.store.send(TodoAction::Remove { id })?;
        Ok(())
    }

    /// Flips the finished flag of a todo
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::NotFound`] if no todo has this id. The store is
    /// left unchanged and observers are not notified.
    pub fn toggle_finished(&mut self, id: TodoId) -> Result<(), TodoError> {
        self.store.send(TodoAction::ToggleFinished { id })?;
        Ok(())
    }

    /// All todos in id order
    pub fn todos(&self) -> impl Iterator<Item = &Todo> {
        self.store.current().todos()
    }

    /// Returns a todo by id
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.store.current().get(id)
    }

    /// Returns the number of todos
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.current().len()
    }

    /// Returns `true` if there are no todos
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.current().is_empty()
    }

    /// Returns the number of finished todos
    #[must_use]
    pub fn finished_count(&self) -> usize {
        self.store.current().finished_count()
    }

    /// The whole state
    #[must_use]
    pub const fn state(&self) -> &TodoState {
        self.store.current()
    }

    /// Registers an observer called after every successful operation
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&TodoState) + 'static,
    {
        self.store.subscribe(observer)
    }

    /// Removes an observer
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    /// The devtools log, if enabled
    #[must_use]
    pub const fn devtools(&self) -> Option<&DevtoolsLog> {
        self.store.devtools()
    }
}

/// Builder for [`TodoStore`]
pub struct TodoStoreBuilder {
    config: StoreConfig,
    environment: TodoEnvironment,
    clock: Box<dyn Clock>,
}

impl TodoStoreBuilder {
    /// Use a custom store configuration
    #[must_use]
    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a custom environment, e.g. a different seed
    #[must_use]
    pub fn environment(mut self, environment: TodoEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Use a custom clock for devtools timestamps
    #[must_use]
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Validates the configuration, creates the store and bootstraps it
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Config`] for an invalid configuration, or the
    /// error of the bootstrap dispatch.
    pub fn build(self) -> Result<TodoStore, TodoError> {
        self.config.validate()?;

        let mut store = Store::with_clock(
            TodoState::new(),
            TodoReducer::new(),
            self.environment,
            self.config,
            self.clock,
        );
        store.send(TodoAction::Init)?;

        tracing::info!(
            store = %store.config().name,
            todos = store.current().len(),
            "Todo store bootstrapped"
        );

        Ok(TodoStore { store })
    }
}

impl Default for TodoStoreBuilder {
    fn default() -> Self {
        Self {
            config: StoreConfig::default().with_name(STORE_NAME),
            environment: TodoEnvironment::default(),
            clock: Box::new(SystemClock),
        }
    }
}

impl std::fmt::Debug for TodoStoreBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoStoreBuilder")
            .field("config", &self.config)
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}
