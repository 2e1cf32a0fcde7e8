//! Period based figures for the dashboard cards and charts.

use serde::Serialize;

use crate::models::cashflow::{Entry, EntryType, Period};
use crate::models::kategori::CategorySet;

use super::filter::CategoryFilter;
use super::totals::Totals;

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyPoint {
    pub month: &'static str,
    #[serde(flatten)]
    pub totals: Totals,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySeries {
    pub year: i32,
    pub points: Vec<MonthlyPoint>,
    pub total_income: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotals {
    pub category: String,
    #[serde(flatten)]
    pub totals: Totals,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slice {
    pub name: String,
    pub value: i64,
}

fn in_period(entry: &Entry, period: Period) -> bool {
    Period::parse(&entry.period) == Some(period)
}

/// Card totals for one period.
pub fn summary(entries: &[Entry], period: Period, category: &CategoryFilter) -> Totals {
    Totals::from_entries(
        entries
            .iter()
            .filter(|e| in_period(e, period) && category.matches(e)),
    )
}

/// Twelve points for `year`, one per month, zero-filled.
pub fn monthly_series(entries: &[Entry], year: i32, category: &CategoryFilter) -> MonthlySeries {
    let mut months = [Totals::default(); 12];
    for entry in entries.iter().filter(|e| category.matches(e)) {
        let Some(period) = Period::parse(&entry.period) else {
            continue;
        };
        if period.year() != year {
            continue;
        }
        // bulan 1..=12 dijamin oleh Period
        months[(period.month() - 1) as usize].add(entry);
    }

    let total_income = months
        .iter()
        .fold(0i64, |acc, t| acc.saturating_add(t.income));
    let points = MONTH_LABELS
        .into_iter()
        .zip(months)
        .map(|(month, totals)| MonthlyPoint { month, totals })
        .collect();

    MonthlySeries {
        year,
        points,
        total_income,
    }
}

/// Every configured category, including ones with nothing recorded.
pub fn category_breakdown(
    entries: &[Entry],
    period: Period,
    categories: &CategorySet,
) -> Vec<CategoryTotals> {
    categories
        .iter()
        .map(|category| CategoryTotals {
            category: category.to_string(),
            totals: Totals::from_entries(
                entries
                    .iter()
                    .filter(|e| in_period(e, period) && e.category == category),
            ),
        })
        .collect()
}

/// Share of each category regardless of type. Empty categories are left out.
pub fn category_share(entries: &[Entry], period: Period, categories: &CategorySet) -> Vec<Slice> {
    categories
        .iter()
        .map(|category| Slice {
            name: category.to_string(),
            value: entries
                .iter()
                .filter(|e| in_period(e, period) && e.category == category)
                .fold(0i64, |acc, e| acc.saturating_add(e.total)),
        })
        .filter(|slice| slice.value > 0)
        .collect()
}

pub fn income_vs_expense(entries: &[Entry], period: Period) -> Vec<Slice> {
    let totals = summary(entries, period, &CategoryFilter::All);
    [(EntryType::Income, totals.income), (EntryType::Expense, totals.expense)]
        .into_iter()
        .filter(|(_, value)| *value > 0)
        .map(|(kind, value)| Slice {
            name: match kind {
                EntryType::Income => "Income".to_string(),
                EntryType::Expense => "Expense".to_string(),
            },
            value,
        })
        .collect()
}
