//! Favorite conversion pairs
//!
//! Matching is pure tuple equality; storage sits behind [`FavoriteStore`].

use std::fmt;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Identity of a favorite: category id, source unit name, target unit name.
/// Order matters: Meters -> Feet is not Feet -> Meters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FavoriteKey {
    pub category_id: String,
    pub from_unit: String,
    pub to_unit: String,
}

impl FavoriteKey {
    pub fn new(category_id: impl Into<String>, from_unit: impl Into<String>, to_unit: impl Into<String>) -> Self {
        FavoriteKey {
            category_id: category_id.into(),
            from_unit: from_unit.into(),
            to_unit: to_unit.into(),
        }
    }

    /// The same pair in the other direction
    pub fn reversed(&self) -> Self {
        FavoriteKey {
            category_id: self.category_id.clone(),
            from_unit: self.to_unit.clone(),
            to_unit: self.from_unit.clone(),
        }
    }
}

impl fmt::Display for FavoriteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.category_id, self.from_unit, self.to_unit)
    }
}

/// Exact, case-sensitive, order-sensitive match
pub fn matches(key: &FavoriteKey, candidate: &FavoriteKey) -> bool {
    key.category_id == candidate.category_id
        && key.from_unit == candidate.from_unit
        && key.to_unit == candidate.to_unit
}

/// Persistence for favorites, owned by the caller
pub trait FavoriteStore: Send + Sync {
    fn list(&self) -> Vec<FavoriteKey>;
    fn insert(&self, key: FavoriteKey);
    fn remove(&self, key: &FavoriteKey);
    fn clear(&self);
}

/// Whether any stored favorite matches `key`
pub fn is_favorite(store: &dyn FavoriteStore, key: &FavoriteKey) -> bool {
    store.list().iter().any(|stored| matches(key, stored))
}

/// Remove `key` if stored, insert it otherwise. Returns the new state.
pub fn toggle_favorite(store: &dyn FavoriteStore, key: &FavoriteKey) -> bool {
    if is_favorite(store, key) {
        store.remove(key);
        false
    } else {
        store.insert(key.clone());
        true
    }
}

/// Process-local store; insertion order is kept and duplicates are ignored
#[derive(Debug, Default)]
pub struct InMemoryFavoriteStore {
    entries: Mutex<Vec<FavoriteKey>>,
}

impl InMemoryFavoriteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FavoriteStore for InMemoryFavoriteStore {
    fn list(&self) -> Vec<FavoriteKey> {
        self.entries.lock().clone()
    }

    fn insert(&self, key: FavoriteKey) {
        let mut entries = self.entries.lock();
        if !entries.iter().any(|stored| matches(&key, stored)) {
            entries.push(key);
        }
    }

    fn remove(&self, key: &FavoriteKey) {
        self.entries.lock().retain(|stored| !matches(key, stored));
    }

    fn clear(&self) {
        self.entries.lock().clear();
    }
}
