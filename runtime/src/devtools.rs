//! Append-only devtools log.
//!
//! Every action a store accepts is recorded together with a JSON snapshot of
//! the state it produced. The log is read by tooling only; nothing in the
//! store consults it.

use chrono::{DateTime, Utc};
use entity_store_core::environment::Clock;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A single recorded action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevtoolsEntry {
    /// Position in the log, starting at 1 and never reused
    pub sequence: u64,
    /// The action label
    pub label: String,
    /// State right after the reducer accepted the action
    pub state: serde_json::Value,
    /// When the entry was recorded
    pub recorded_at: DateTime<Utc>,
}

/// Recorded history of a store
pub struct DevtoolsLog {
    name: String,
    capacity: Option<usize>,
    entries: VecDeque<DevtoolsEntry>,
    last_sequence: u64,
    clock: Box<dyn Clock>,
}

impl DevtoolsLog {
    /// Creates an empty log
    ///
    /// With a `capacity`, the oldest entries are dropped once the log is full.
    #[must_use]
    pub fn new(name: impl Into<String>, capacity: Option<usize>, clock: Box<dyn Clock>) -> Self {
        Self {
            name: name.into(),
            capacity,
            entries: VecDeque::new(),
            last_sequence: 0,
            clock,
        }
    }

    /// Appends an entry for `label` with a snapshot of `state`
    ///
    /// # Errors
    ///
    /// Returns the serialization error if `state` cannot be turned into JSON.
    /// Nothing is recorded in that case.
    pub fn record<S: Serialize>(&mut self, label: &str, state: &S) -> Result<u64, serde_json::Error> {
        let snapshot = serde_json::to_value(state)?;

        self.last_sequence += 1;
        self.entries.push_back(DevtoolsEntry {
            sequence: self.last_sequence,
            label: label.to_string(),
            state: snapshot,
            recorded_at: self.clock.now(),
        });

        if let Some(capacity) = self.capacity {
            while self.entries.len() > capacity {
                self.entries.pop_front();
            }
        }

        Ok(self.last_sequence)
    }

    /// The name the log was created with
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Retained entries, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &DevtoolsEntry> {
        self.entries.iter()
    }

    /// Most recent entry
    #[must_use]
    pub fn latest(&self) -> Option<&DevtoolsEntry> {
        self.entries.back()
    }

    /// Looks up a retained entry by sequence number
    #[must_use]
    pub fn get(&self, sequence: u64) -> Option<&DevtoolsEntry> {
        self.entries.iter().find(|entry| entry.sequence == sequence)
    }

    /// Number of retained entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is retained
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exports the log as a single JSON document
    #[must_use]
    pub fn export(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "entries": self.entries,
        })
    }
}

impl std::fmt::Debug for DevtoolsLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DevtoolsLog")
            .field("name", &self.name)
            .field("capacity", &self.capacity)
            .field("len", &self.entries.len())
            .field("last_sequence", &self.last_sequence)
            .finish_non_exhaustive()
    }
}
