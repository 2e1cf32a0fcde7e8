use serde::{Deserialize, Serialize};

use crate::aggregation::dashboard::{CategoryTotals, MonthlySeries, Slice};
use crate::aggregation::totals::Totals;

#[derive(Debug, Default, Deserialize)]
pub struct StatistikQuery {
    pub month: Option<String>,
    pub year: Option<String>,
    pub category: Option<String>, // "all" atau nama kategori
    pub chart_year: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub period: String,
    pub ringkasan: Totals,
    pub grafik_bulanan: MonthlySeries,
    pub per_kategori: Vec<CategoryTotals>,
    pub porsi_kategori: Vec<Slice>,
    pub pemasukan_vs_pengeluaran: Vec<Slice>,
}
