//! Id-keyed entity collections.
//!
//! [`EntityState`] pairs an ordered map with the last id it handed out. Ids are
//! assigned by the collection, never by callers, and are never reused: removing
//! an entity does not roll the counter back.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Store-assigned identifier of an entity
///
/// Ids start at 1. `0` is never assigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates an `EntityId` from a raw value
    ///
    /// Only useful for lookups; the collection decides which ids exist.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for EntityId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// No entity exists under the requested id
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no entity with id {id}")]
pub struct LookupError {
    /// The id that was looked up
    pub id: EntityId,
}

/// Ordered entity map plus the id counter that feeds it
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EntityState<T> {
    entities: BTreeMap<EntityId, T>,
    last_id: u64,
}

impl<T> EntityState<T> {
    /// Creates an empty collection with the counter at 0
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entities: BTreeMap::new(),
            last_id: 0,
        }
    }

    /// Assigns the next id and inserts the entity built from it
    ///
    /// The builder receives the freshly assigned id so the stored entity can
    /// carry it.
    pub fn insert_with<F>(&mut self, build: F) -> EntityId
    where
        F: FnOnce(EntityId) -> T,
    {
        self.last_id += 1;
        let id = EntityId(self.last_id);
        self.entities.insert(id, build(id));
        id
    }

    /// Removes an entity, returning it if it was present
    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        self.entities.remove(&id)
    }

    /// Applies `change` to the entity stored under `id`
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if no entity has this id. `change` is not
    /// called in that case.
    pub fn update<F>(&mut self, id: EntityId, change: F) -> Result<(), LookupError>
    where
        F: FnOnce(&mut T),
    {
        let entity = self.entities.get_mut(&id).ok_or(LookupError { id })?;
        change(entity);
        Ok(())
    }

    /// Returns the entity stored under `id`
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.entities.get(&id)
    }

    /// Checks whether an entity exists
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Number of entities currently stored
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if the collection holds no entities
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// The last id handed out, `0` if none
    #[must_use]
    pub const fn last_id(&self) -> u64 {
        self.last_id
    }

    /// Entities in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entities.values()
    }

    /// Ids in ascending order
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys().copied()
    }
}

impl<T> Default for EntityState<T> {
    fn default() -> Self {
        Self::new()
    }
}
