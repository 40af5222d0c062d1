//! In-memory record store shared by both API versions
//!
//! Every operation takes the lock exactly once, so lookup-then-mutate
//! sequences are atomic with respect to concurrent requests.

use tokio::sync::RwLock;
use uuid::Uuid;

use super::model::Identified;

/// Insertion-ordered collection guarded by a single lock
pub struct RecordStore<T> {
    records: RwLock<Vec<T>>,
}

impl<T> Default for RecordStore<T> {
    fn default() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Identified + Clone> RecordStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record as given and return it
    pub async fn insert(&self, record: T) -> T {
        self.records.write().await.push(record.clone());
        record
    }

    /// Copy of the current collection in insertion order
    pub async fn snapshot(&self) -> Vec<T> {
        self.records.read().await.clone()
    }

    pub async fn get(&self, id: Uuid) -> Option<T> {
        self.records
            .read()
            .await
            .iter()
            .find(|record| record.id() == id)
            .cloned()
    }

    /// Overwrite the record stored under `id`, keeping that identifier
    pub async fn replace(&self, id: Uuid, mut record: T) -> Option<T> {
        let mut records = self.records.write().await;
        let slot = records.iter_mut().find(|existing| existing.id() == id)?;

        record.set_id(id);
        *slot = record.clone();
        Some(record)
    }

    /// Mutate the record stored under `id` in place
    pub async fn update<F>(&self, id: Uuid, apply: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let mut records = self.records.write().await;
        let record = records.iter_mut().find(|existing| existing.id() == id)?;

        apply(record);
        Some(record.clone())
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        let mut records = self.records.write().await;
        match records.iter().position(|record| record.id() == id) {
            Some(index) => {
                records.remove(index);
                true
            }
            None => false,
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}
