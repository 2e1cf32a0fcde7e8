use axum::{
    extract::{Query, State},
    response::Json,
};
use serde_json::{json, Value};

use crate::aggregation::dashboard::{
    category_breakdown, category_share, income_vs_expense, monthly_series, summary,
};
use crate::aggregation::filter::CategoryFilter;
use crate::error::AppError;
use crate::models::statistik::{DashboardResponse, StatistikQuery};
use crate::routes::cashflow::resolve_period;
use crate::routes::{jakarta_today, AppState};

// Dashboard cards and charts for the selected month/year
pub async fn get_statistik(
    State(state): State<AppState>,
    Query(query): Query<StatistikQuery>,
) -> Result<Json<Value>, AppError> {
    let period = resolve_period(query.month.as_deref(), query.year.as_deref(), jakarta_today())?;
    let category = CategoryFilter::parse(query.category.as_deref().unwrap_or_default());
    // Grafik tahunan ikut tahun terpilih kalau chart_year tidak diisi
    let chart_year = query.chart_year.unwrap_or(period.year());

    let entries = state.store.list().await?;

    let response = DashboardResponse {
        period: period.to_string(),
        ringkasan: summary(&entries, period, &category),
        grafik_bulanan: monthly_series(&entries, chart_year, &category),
        per_kategori: category_breakdown(&entries, period, &state.categories),
        porsi_kategori: category_share(&entries, period, &state.categories),
        pemasukan_vs_pengeluaran: income_vs_expense(&entries, period),
    };

    Ok(Json(json!({
        "status": "success",
        "data": response
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::aggregation::tests::scenario_entries;
    use crate::models::kategori::CategorySet;
    use crate::store::MemoryStore;

    fn state() -> AppState {
        AppState::new(
            Arc::new(MemoryStore::with_entries(scenario_entries())),
            CategorySet::default(),
        )
    }

    #[tokio::test]
    async fn dashboard_for_january() {
        let query = StatistikQuery {
            month: Some("01".to_string()),
            year: Some("2025".to_string()),
            ..StatistikQuery::default()
        };
        let Json(body) = get_statistik(State(state()), Query(query)).await.unwrap();
        let data = &body["data"];

        assert_eq!(data["period"], "01/2025");
        assert_eq!(data["ringkasan"]["income"], 1000);
        assert_eq!(data["ringkasan"]["profit"], 600);
        assert_eq!(data["grafik_bulanan"]["year"], 2025);
        assert_eq!(data["grafik_bulanan"]["points"][1]["income"], 500);
        assert_eq!(data["grafik_bulanan"]["total_income"], 1500);
        assert_eq!(data["per_kategori"].as_array().map(Vec::len), Some(4));
        assert_eq!(data["pemasukan_vs_pengeluaran"][1]["value"], 400);
    }

    #[tokio::test]
    async fn category_filter_applies_to_cards_and_chart() {
        let query = StatistikQuery {
            month: Some("01".to_string()),
            year: Some("2025".to_string()),
            category: Some("Belanja".to_string()),
            chart_year: Some(2025),
        };
        let Json(body) = get_statistik(State(state()), Query(query)).await.unwrap();
        let data = &body["data"];

        assert_eq!(data["ringkasan"]["income"], 0);
        assert_eq!(data["ringkasan"]["expense"], 400);
        assert_eq!(data["grafik_bulanan"]["total_income"], 0);
    }
}
