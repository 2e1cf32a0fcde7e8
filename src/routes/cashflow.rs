use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::aggregation::filter::{CategoryFilter, DateRange, TypeFilter};
use crate::aggregation::page::PageSize;
use crate::aggregation::sort::{SortDirection, SortField, SortSpec};
use crate::aggregation::{aggregate, CashflowQuery};
use crate::error::AppError;
use crate::models::cashflow::{parse_date, Entry, EntryRequest, Period};
use crate::routes::{jakarta_today, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct CashflowParams {
    pub month: Option<String>,
    pub year: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<String>, // Format: "YYYY-MM-DD"
    pub end_date: Option<String>,
    pub tab: Option<String>,
    pub sort: Option<SortField>,
    pub direction: Option<SortDirection>,
    pub page_size: Option<i64>,
    pub page: Option<usize>,
}

/// Resolves month/year, falling back to `today` for whichever is missing.
pub fn resolve_period(
    month: Option<&str>,
    year: Option<&str>,
    today: NaiveDate,
) -> Result<Period, AppError> {
    let month = month.map(str::to_string).unwrap_or_else(|| format!("{:02}", today.month()));
    let year = year.map(str::to_string).unwrap_or_else(|| format!("{:04}", today.year()));
    Period::from_parts(month.trim(), year.trim()).ok_or_else(|| {
        AppError::BadRequest("Periode tidak valid. Bulan harus 2 digit dan tahun 4 digit.".to_string())
    })
}

/// Unreadable bounds are dropped rather than rejected.
fn date_bound(value: Option<&str>) -> Option<NaiveDate> {
    let value = value?;
    let parsed = parse_date(value);
    if parsed.is_none() {
        tracing::debug!(value, "ignoring unreadable date bound");
    }
    parsed
}

impl CashflowParams {
    pub fn into_query(self, today: NaiveDate) -> Result<CashflowQuery, AppError> {
        let period = resolve_period(self.month.as_deref(), self.year.as_deref(), today)?;

        let tab = TypeFilter::parse(self.tab.as_deref().unwrap_or_default())
            .ok_or_else(|| AppError::BadRequest("Tab harus all, income, atau expense.".to_string()))?;

        let page_size = match self.page_size {
            Some(raw) => PageSize::from_raw(raw).ok_or_else(|| {
                AppError::BadRequest("page_size harus lebih dari 0 atau -1 untuk semua.".to_string())
            })?,
            None => PageSize::default(),
        };

        let mut query = CashflowQuery::for_period(period);
        query.filters.category = CategoryFilter::parse(self.category.as_deref().unwrap_or_default());
        query.filters.date_range = DateRange::new(
            date_bound(self.start_date.as_deref()),
            date_bound(self.end_date.as_deref()),
        );
        query.filters.tab = tab;
        query.sort = SortSpec::new(
            self.sort.unwrap_or(query.sort.field),
            self.direction.unwrap_or(query.sort.direction),
        );
        query.page_size = page_size;
        query.page = self.page.unwrap_or(1).max(1);
        Ok(query)
    }
}

// Filtered, sorted and paginated cashflow for the table view
pub async fn get_cashflow(
    State(state): State<AppState>,
    Query(params): Query<CashflowParams>,
) -> Result<Json<Value>, AppError> {
    let query = params.into_query(jakarta_today())?;
    let entries = state.store.list().await?;
    let view = aggregate(&entries, &query);

    Ok(Json(json!({
        "status": "success",
        "period": query.filters.period.as_str(),
        "sort": query.sort,
        "data": view
    })))
}

pub async fn get_all_cashflow(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let entries = state.store.list().await?;

    Ok(Json(json!({
        "status": "success",
        "data": entries
    })))
}

pub async fn get_cashflow_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let entry = state.store.find(&id).await?.ok_or(AppError::NotFound)?;

    Ok(Json(json!({
        "status": "success",
        "data": entry
    })))
}

pub async fn create_cashflow(
    State(state): State<AppState>,
    Json(payload): Json<EntryRequest>,
) -> Result<Json<Value>, AppError> {
    let valid = payload.validate(&state.categories)?;
    let entry = Entry::create(valid, Utc::now());

    state.store.create(&entry).await?;
    tracing::info!(id = %entry.id, period = %entry.period, total = entry.total, "cashflow entry created");

    Ok(Json(json!({
        "status": "success",
        "message": "Transaksi berhasil dibuat!",
        "data": entry
    })))
}

pub async fn update_cashflow(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<EntryRequest>,
) -> Result<Json<Value>, AppError> {
    let existing = state.store.find(&id).await?.ok_or(AppError::NotFound)?;
    let valid = payload.validate(&state.categories)?;
    let updated = existing.replace_with(valid, Utc::now());

    state.store.update(&updated).await?;
    tracing::info!(id = %updated.id, total = updated.total, "cashflow entry updated");

    Ok(Json(json!({
        "status": "success",
        "message": "Transaksi berhasil diupdate!",
        "data": updated
    })))
}

pub async fn delete_cashflow(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    state.store.delete(&id).await?;
    tracing::info!(id = %id, "cashflow entry deleted");

    Ok(Json(json!({
        "status": "success",
        "message": "Transaksi berhasil dihapus!"
    })))
}
