//! # Entity Store Runtime
//!
//! Synchronous Store runtime for reducer-driven state.
//!
//! ## Core Components
//!
//! - **Store**: Owns state, runs the reducer and the effects it returns
//! - **Observers**: Callbacks notified after every successful dispatch
//! - **Devtools**: Append-only log of labelled state snapshots
//!
//! The store is single-threaded. `send` takes `&mut self`, so dispatches are
//! totally ordered by the borrow checker and every dispatch (including the
//! effects it triggers) completes before `send` returns.
//!
//! ## Example
//!
//! ```ignore
//! use entity_store_runtime::Store;
//!
//! let mut store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething)?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field);
//! ```

use entity_store_core::{
    action::Action, effect::Effect, environment::Clock, environment::SystemClock, reducer::Reducer,
};
use serde::Serialize;

/// Store configuration
pub mod config;

/// Devtools recording
pub mod devtools;

/// Metric names and descriptions
pub mod metrics;

/// Observer list
pub mod observer;

pub use config::{ConfigError, StoreConfig};
pub use devtools::{DevtoolsEntry, DevtoolsLog};
pub use observer::{Observers, SubscriptionId};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during [`Store::send`](crate::Store::send)
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError<E>
    where
        E: std::error::Error + 'static,
    {
        /// The reducer refused an action
        ///
        /// Refusing the top-level action leaves state unchanged. When an
        /// action dispatched by an effect is refused, mutations accepted
        /// earlier in the same `send` stay applied.
        #[error(transparent)]
        Rejected(E),

        /// `Effect::Send` chains nested deeper than the configured maximum
        #[error("Effect chain exceeded maximum depth of {max}")]
        EffectDepthExceeded {
            /// The configured maximum
            max: usize,
        },
    }

    impl<E> StoreError<E>
    where
        E: std::error::Error + 'static,
    {
        /// The reducer error, if this is a rejection
        #[must_use]
        pub const fn rejection(&self) -> Option<&E> {
            match self {
                Self::Rejected(error) => Some(error),
                Self::EffectDepthExceeded { .. } => None,
            }
        }
    }
}

pub use error::StoreError;

/// The Store - runtime coordinator for a reducer
pub mod store {
    use super::{
        metrics, Action, Clock, DevtoolsLog, Effect, Observers, Reducer, Serialize, StoreConfig,
        StoreError, SubscriptionId, SystemClock,
    };

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (owned, mutated only through the reducer)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (synchronous feedback loop)
    /// 5. Observers and the devtools log
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mut store = Store::new(
    ///     TodoState::default(),
    ///     TodoReducer::new(),
    ///     TodoEnvironment::default(),
    /// );
    ///
    /// store.send(TodoAction::Init)?;
    /// ```
    pub struct Store<R>
    where
        R: Reducer,
    {
        state: R::State,
        reducer: R,
        environment: R::Environment,
        observers: Observers<R::State>,
        devtools: Option<DevtoolsLog>,
        config: StoreConfig,
    }

    impl<R> Store<R>
    where
        R: Reducer,
        R::Action: Action,
        R::State: Serialize,
        R::Error: 'static,
    {
        /// Create a new store with default configuration
        #[must_use]
        pub fn new(initial_state: R::State, reducer: R, environment: R::Environment) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new store with custom configuration
        #[must_use]
        pub fn with_config(
            initial_state: R::State,
            reducer: R,
            environment: R::Environment,
            config: StoreConfig,
        ) -> Self {
            Self::with_clock(initial_state, reducer, environment, config, Box::new(SystemClock))
        }

        /// Create a new store whose devtools timestamps come from `clock`
        #[must_use]
        pub fn with_clock(
            initial_state: R::State,
            reducer: R,
            environment: R::Environment,
            config: StoreConfig,
            clock: Box<dyn Clock>,
        ) -> Self {
            let devtools = config
                .devtools_enabled
                .then(|| DevtoolsLog::new(config.name.clone(), config.devtools_capacity, clock));

            Self {
                state: initial_state,
                reducer,
                environment,
                observers: Observers::new(),
                devtools,
                config,
            }
        }

        /// Send an action to the store
        ///
        /// Runs the reducer, then every effect it returned (depth first, in
        /// order), then notifies observers once if any action was accepted.
        ///
        /// Dispatch stops at the first error. Actions accepted before it keep
        /// their mutations and devtools entries, and observers still see the
        /// resulting state.
        ///
        /// # Errors
        ///
        /// - [`StoreError::Rejected`]: the reducer refused the action (or an
        ///   action dispatched by one of its effects).
        /// - [`StoreError::EffectDepthExceeded`]: an effect dispatched an
        ///   action nested deeper than `max_effect_depth`.
        #[tracing::instrument(skip_all, name = "store_send", fields(store = %self.config.name, action = action.label()))]
        pub fn send(&mut self, action: R::Action) -> Result<(), StoreError<R::Error>> {
            let mut accepted = 0;
            let result = self.dispatch(action, 0, &mut accepted);

            if accepted > 0 {
                let notified = self.observers.notify(&self.state);
                metrics::counter!(metrics::OBSERVERS_NOTIFIED).increment(notified as u64);
                tracing::trace!(accepted, notified, "Observers notified");
            }

            result
        }

        fn dispatch(
            &mut self,
            action: R::Action,
            depth: usize,
            accepted: &mut usize,
        ) -> Result<(), StoreError<R::Error>> {
            if depth > self.config.max_effect_depth {
                tracing::error!(depth, "Effect chain too deep, dropping action");
                return Err(StoreError::EffectDepthExceeded {
                    max: self.config.max_effect_depth,
                });
            }

            let label = action.label();
            tracing::debug!(label, depth, "Processing action");
            metrics::counter!(metrics::ACTIONS_TOTAL, "action" => label).increment(1);

            let start = std::time::Instant::now();
            let result = self.reducer.reduce(&mut self.state, action, &self.environment);
            metrics::histogram!(metrics::REDUCER_DURATION).record(start.elapsed().as_secs_f64());

            let effects = match result {
                Ok(effects) => effects,
                Err(error) => {
                    tracing::warn!(label, %error, "Reducer rejected action");
                    metrics::counter!(metrics::ACTIONS_REJECTED, "action" => label).increment(1);
                    return Err(StoreError::Rejected(error));
                },
            };

            *accepted += 1;
            self.record(label);

            tracing::trace!("Executing {} effects", effects.len());
            for effect in effects {
                self.run_effect(effect, depth, accepted)?;
            }

            Ok(())
        }

        fn run_effect(
            &mut self,
            effect: Effect<R::Action>,
            depth: usize,
            accepted: &mut usize,
        ) -> Result<(), StoreError<R::Error>> {
            match effect {
                Effect::None => Ok(()),
                Effect::Send(action) => self.dispatch(*action, depth + 1, accepted),
                Effect::Sequential(effects) => {
                    for effect in effects {
                        self.run_effect(effect, depth, accepted)?;
                    }
                    Ok(())
                },
            }
        }

        fn record(&mut self, label: &str) {
            let Some(devtools) = self.devtools.as_mut() else {
                return;
            };

            match devtools.record(label, &self.state) {
                Ok(sequence) => {
                    metrics::counter!(metrics::DEVTOOLS_ENTRIES).increment(1);
                    tracing::trace!(sequence, label, "Recorded devtools entry");
                },
                Err(error) => {
                    tracing::warn!(label, %error, "Failed to snapshot state for devtools");
                },
            }
        }
    }

    impl<R> Store<R>
    where
        R: Reducer,
    {
        /// Read current state via a closure
        ///
        /// ```ignore
        /// let count = store.state(|s| s.todos.len());
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&R::State) -> T,
        {
            f(&self.state)
        }

        /// Borrow the current state
        #[must_use]
        pub const fn current(&self) -> &R::State {
            &self.state
        }

        /// Register an observer called after every `send` that changed state
        pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
        where
            F: FnMut(&R::State) + 'static,
        {
            self.observers.subscribe(observer)
        }

        /// Remove an observer, returning `false` if it was not registered
        pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
            self.observers.unsubscribe(id)
        }

        /// The devtools log, if enabled
        #[must_use]
        pub const fn devtools(&self) -> Option<&DevtoolsLog> {
            self.devtools.as_ref()
        }

        /// The configuration the store was built with
        #[must_use]
        pub const fn config(&self) -> &StoreConfig {
            &self.config
        }
    }

    impl<R> std::fmt::Debug for Store<R>
    where
        R: Reducer,
        R::State: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Store")
                .field("state", &self.state)
                .field("observers", &self.observers)
                .field("devtools", &self.devtools)
                .field("config", &self.config)
                .finish_non_exhaustive()
        }
    }
}

// Re-export for convenience
pub use store::Store;
