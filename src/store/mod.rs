//! In-memory candy store.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → CandyStore (single mutex around id → record map)
//!     → cloned Candy / Vec<Candy> handed back
//!     → serialization happens after the lock is released
//! ```
//!
//! # Design Decisions
//! - One `std::sync::Mutex`, no reader/writer split; critical sections are a
//!   map lookup, insert, or copy
//! - Ids are UUID v4, minted outside the lock
//! - Records are never mutated or removed

pub mod types;

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use rand::seq::SliceRandom;
use uuid::Uuid;

pub use types::{Candy, NewCandy, StoreError, StoreResult};

/// Thread-safe registry of candy records.
#[derive(Debug, Default)]
pub struct CandyStore {
    records: Mutex<HashMap<String, Candy>>,
}

impl CandyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // Records are immutable, so a panic while holding the lock cannot leave a
    // half-written entry behind.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Candy>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Copy every record. Order is unspecified.
    pub fn list_all(&self) -> Vec<Candy> {
        let records = self.lock();
        records.values().cloned().collect()
    }

    /// Look up a record by id.
    pub fn get_by_id(&self, id: &str) -> StoreResult<Candy> {
        let records = self.lock();
        records
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Pick the id of a uniformly random record.
    pub fn random_id(&self) -> StoreResult<String> {
        let ids: Vec<String> = {
            let records = self.lock();
            records.keys().cloned().collect()
        };

        match ids.len() {
            0 => Err(StoreError::Empty),
            1 => Ok(ids[0].clone()),
            _ => ids
                .choose(&mut rand::thread_rng())
                .cloned()
                .ok_or(StoreError::Empty),
        }
    }

    /// Insert a new record under a freshly minted id and return it.
    pub fn insert(&self, new: NewCandy) -> Candy {
        self.insert_counted(new).0
    }

    /// Like [`insert`](Self::insert), also returning the record count as
    /// observed inside the same critical section.
    pub fn insert_counted(&self, new: NewCandy) -> (Candy, usize) {
        let mut candy = Candy {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            kind: new.kind,
        };

        let mut records = self.lock();
        while records.contains_key(&candy.id) {
            tracing::warn!(candy_id = %candy.id, "Id collision, minting a new one");
            candy.id = Uuid::new_v4().to_string();
        }
        records.insert(candy.id.clone(), candy.clone());
        let count = records.len();
        (candy, count)
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True when no record has been inserted yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
