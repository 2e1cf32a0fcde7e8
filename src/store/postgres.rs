use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::error::ErrorKind;
use sqlx::FromRow;

use crate::database::Database;
use crate::models::cashflow::{Entry, EntryType};

use super::{EntryStore, StoreError};

const SELECT_ENTRIES: &str = r#"
    SELECT
        id,
        name,
        date,
        period,
        type AS entry_type,
        category,
        is_ketengan,
        qty,
        price,
        total,
        notes,
        created_at,
        updated_at
    FROM cashflow
"#;

#[derive(Debug, Clone, FromRow)]
pub struct CashflowRow {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    pub period: String,
    pub entry_type: String,
    pub category: String,
    pub is_ketengan: bool,
    pub qty: i64,
    pub price: i64,
    pub total: i64,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<CashflowRow> for Entry {
    type Error = StoreError;

    fn try_from(row: CashflowRow) -> Result<Self, Self::Error> {
        let entry_type = EntryType::parse(&row.entry_type).ok_or_else(|| {
            StoreError::Corrupt(format!("entry '{}' has type '{}'", row.id, row.entry_type))
        })?;
        Ok(Entry {
            id: row.id,
            name: row.name,
            date: row.date,
            period: row.period,
            entry_type,
            category: row.category,
            is_ketengan: row.is_ketengan,
            qty: row.qty,
            price: row.price,
            total: row.total,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Entries in the `cashflow` table.
#[derive(Debug, Clone)]
pub struct PgStore {
    db: Database,
}

impl PgStore {
    pub fn new(db: Database) -> PgStore {
        PgStore { db }
    }
}

fn duplicate_or(err: sqlx::Error, id: &str) -> StoreError {
    match err.as_database_error().map(|db_err| db_err.kind()) {
        Some(ErrorKind::UniqueViolation) => StoreError::DuplicateId(id.to_string()),
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl EntryStore for PgStore {
    async fn list(&self) -> Result<Vec<Entry>, StoreError> {
        let sql = format!("{SELECT_ENTRIES} ORDER BY created_at ASC, id ASC");
        let rows = sqlx::query_as::<_, CashflowRow>(&sql)
            .fetch_all(&self.db)
            .await?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            match Entry::try_from(row) {
                Ok(entry) => entries.push(entry),
                Err(err) => tracing::warn!("skipping cashflow row: {err}"),
            }
        }
        Ok(entries)
    }

    async fn find(&self, id: &str) -> Result<Option<Entry>, StoreError> {
        let sql = format!("{SELECT_ENTRIES} WHERE id = $1");
        let row = sqlx::query_as::<_, CashflowRow>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;
        row.map(Entry::try_from).transpose()
    }

    async fn create(&self, entry: &Entry) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO cashflow
               (id, name, date, period, type, category, is_ketengan, qty, price, total, notes, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)"#,
        )
        .bind(&entry.id)
        .bind(&entry.name)
        .bind(entry.date)
        .bind(&entry.period)
        .bind(entry.entry_type.as_str())
        .bind(&entry.category)
        .bind(entry.is_ketengan)
        .bind(entry.qty)
        .bind(entry.price)
        .bind(entry.total)
        .bind(&entry.notes)
        .bind(entry.created_at)
        .bind(entry.updated_at)
        .execute(&self.db)
        .await
        .map_err(|err| duplicate_or(err, &entry.id))?;

        Ok(())
    }

    async fn update(&self, entry: &Entry) -> Result<(), StoreError> {
        // created_at sengaja tidak ikut diupdate
        let result = sqlx::query(
            r#"UPDATE cashflow SET
               name = $1,
               date = $2,
               period = $3,
               type = $4,
               category = $5,
               is_ketengan = $6,
               qty = $7,
               price = $8,
               total = $9,
               notes = $10,
               updated_at = $11
               WHERE id = $12"#,
        )
        .bind(&entry.name)
        .bind(entry.date)
        .bind(&entry.period)
        .bind(entry.entry_type.as_str())
        .bind(&entry.category)
        .bind(entry.is_ketengan)
        .bind(entry.qty)
        .bind(entry.price)
        .bind(entry.total)
        .bind(&entry.notes)
        .bind(entry.updated_at)
        .bind(&entry.id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(entry.id.clone()));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM cashflow WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
