//! Persistence for cashflow entries.
//!
//! The aggregation code never talks to a store; handlers fetch the full list
//! and hand it over.

pub mod memory;
pub mod postgres;
pub mod row;
pub mod sheet;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::cashflow::Entry;

pub use self::memory::MemoryStore;
pub use self::postgres::PgStore;
pub use self::sheet::SheetStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("entry '{0}' not found")]
    NotFound(String),

    #[error("entry '{0}' already exists")]
    DuplicateId(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("sheet file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("sheet format error: {0}")]
    Csv(#[from] csv::Error),

    #[error("stored row is unreadable: {0}")]
    Corrupt(String),
}

#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Every entry, in insertion order.
    async fn list(&self) -> Result<Vec<Entry>, StoreError>;

    /// Fails with [`StoreError::DuplicateId`] if the id is taken.
    async fn create(&self, entry: &Entry) -> Result<(), StoreError>;

    /// Replaces the entry with the same id. Fails with [`StoreError::NotFound`].
    async fn update(&self, entry: &Entry) -> Result<(), StoreError>;

    /// Fails with [`StoreError::NotFound`].
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    async fn find(&self, id: &str) -> Result<Option<Entry>, StoreError> {
        Ok(self.list().await?.into_iter().find(|entry| entry.id == id))
    }
}
