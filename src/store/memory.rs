use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::cashflow::Entry;

use super::{EntryStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<Vec<Entry>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    pub fn with_entries(entries: Vec<Entry>) -> MemoryStore {
        MemoryStore {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Entry>, StoreError> {
        Ok(self.entries.read().await.clone())
    }

    async fn create(&self, entry: &Entry) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        if entries.iter().any(|existing| existing.id == entry.id) {
            return Err(StoreError::DuplicateId(entry.id.clone()));
        }
        entries.push(entry.clone());
        Ok(())
    }

    async fn update(&self, entry: &Entry) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        match entries.iter_mut().find(|existing| existing.id == entry.id) {
            Some(slot) => {
                *slot = entry.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(entry.id.clone())),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|existing| existing.id != id);
        if entries.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
