use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use tokio::sync::Mutex;

use crate::models::cashflow::Entry;

use super::row::{self, HEADERS};
use super::{EntryStore, StoreError};

/// A spreadsheet kept as a CSV file: one header row, then one row per entry.
///
/// Rows are matched by the ID column, so rows this crate cannot decode are
/// still carried along untouched on update and delete.
#[derive(Debug)]
pub struct SheetStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl SheetStore {
    /// Opens the sheet, creating it with the header row if it does not exist.
    pub async fn open(path: impl Into<PathBuf>) -> Result<SheetStore, StoreError> {
        let store = SheetStore {
            path: path.into(),
            lock: Mutex::new(()),
        };
        store.ensure_exists().await?;
        Ok(store)
    }

    async fn ensure_exists(&self) -> Result<(), StoreError> {
        if tokio::fs::try_exists(&self.path).await? {
            return Ok(());
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        self.write_records(&[]).await?;
        tracing::info!(path = %self.path.display(), "created cashflow sheet");
        Ok(())
    }

    async fn read_records(&self) -> Result<Vec<StringRecord>, StoreError> {
        self.ensure_exists().await?;
        let bytes = tokio::fs::read(&self.path).await?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes.as_slice());

        let mut records = Vec::new();
        for record in reader.records() {
            records.push(record?);
        }
        Ok(records)
    }

    /// Rewrites the whole sheet through a temp file so readers never see half a file.
    async fn write_records(&self, records: &[StringRecord]) -> Result<(), StoreError> {
        let mut writer = WriterBuilder::new().flexible(true).from_writer(Vec::new());
        writer.write_record(HEADERS)?;
        for record in records {
            writer.write_record(record)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|err| StoreError::Io(err.into_error()))?;

        let tmp = self.path.with_extension("csv.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    fn position(records: &[StringRecord], id: &str) -> Option<usize> {
        records
            .iter()
            .position(|record| record.get(0).map(str::trim) == Some(id))
    }
}

#[async_trait]
impl EntryStore for SheetStore {
    async fn list(&self) -> Result<Vec<Entry>, StoreError> {
        let _guard = self.lock.lock().await;
        let records = self.read_records().await?;
        let now = Utc::now();

        let mut entries = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            match row::decode(index, record, now) {
                Ok(entry) => entries.push(entry),
                Err(err) => tracing::warn!(path = %self.path.display(), "skipping sheet row: {err}"),
            }
        }
        Ok(entries)
    }

    async fn create(&self, entry: &Entry) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut records = self.read_records().await?;
        if Self::position(&records, &entry.id).is_some() {
            return Err(StoreError::DuplicateId(entry.id.clone()));
        }
        records.push(row::encode(entry));
        self.write_records(&records).await
    }

    async fn update(&self, entry: &Entry) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut records = self.read_records().await?;
        let index = Self::position(&records, &entry.id)
            .ok_or_else(|| StoreError::NotFound(entry.id.clone()))?;
        records[index] = row::encode(entry);
        self.write_records(&records).await
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut records = self.read_records().await?;
        let index = Self::position(&records, id).ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        records.remove(index);
        self.write_records(&records).await
    }
}
