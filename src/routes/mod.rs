pub mod cashflow;
pub mod kategori;
pub mod statistik;

use std::sync::Arc;

use axum::{routing::get, Router};
use chrono::{Duration, NaiveDate, Utc};

use crate::models::kategori::CategorySet;
use crate::store::EntryStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EntryStore>,
    pub categories: Arc<CategorySet>,
}

impl AppState {
    pub fn new(store: Arc<dyn EntryStore>, categories: CategorySet) -> AppState {
        AppState {
            store,
            categories: Arc::new(categories),
        }
    }
}

pub async fn health() -> &'static str {
    "OK"
}

/// Today in Asia/Jakarta (UTC+7, no DST). Default month/year for the selectors.
pub fn jakarta_today() -> NaiveDate {
    (Utc::now() + Duration::hours(7)).date_naive()
}

pub fn app() -> Router<AppState> {
    Router::new()
        // Cashflow
        .route(
            "/api/cashflow",
            get(cashflow::get_cashflow).post(cashflow::create_cashflow),
        )
        .route("/api/cashflow/all", get(cashflow::get_all_cashflow))
        .route(
            "/api/cashflow/:id",
            get(cashflow::get_cashflow_by_id)
                .put(cashflow::update_cashflow)
                .delete(cashflow::delete_cashflow),
        )
        // Kategori & statistik
        .route("/api/kategori", get(kategori::get_all_kategori))
        .route("/api/statistik", get(statistik::get_statistik))
        .route("/health", get(health))
}
