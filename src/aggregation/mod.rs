//! Filtering, sorting, pagination and totals over an in-memory entry set.
//!
//! Everything here is pure: callers own the entries and the selected
//! parameters and pass both in on every call.

pub mod dashboard;
pub mod filter;
pub mod page;
pub mod sort;
pub mod totals;

use serde::Serialize;

use crate::models::cashflow::{Entry, Period};

use self::filter::{CategoryFilter, DateRange, Filters, PeriodFilter, TypeFilter};
use self::page::PageSize;
use self::sort::SortSpec;
use self::totals::Totals;

/// Everything the table view has selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashflowQuery {
    pub filters: Filters,
    pub sort: SortSpec,
    pub page_size: PageSize,
    /// 1-based.
    pub page: usize,
}

impl CashflowQuery {
    /// Defaults for a period: every category and type, total descending, 25 per page.
    pub fn for_period(period: Period) -> CashflowQuery {
        CashflowQuery {
            filters: Filters {
                period: PeriodFilter::new(period),
                category: CategoryFilter::All,
                date_range: DateRange::default(),
                tab: TypeFilter::All,
            },
            sort: SortSpec::default(),
            page_size: PageSize::default(),
            page: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashflowView<'a> {
    pub entries: Vec<&'a Entry>,
    pub total_matching: usize,
    pub total_pages: usize,
    pub page: usize,
    pub page_size: PageSize,
    /// Row number of the first entry on this page, 1-based.
    pub first_row: usize,
    pub totals: Totals,
}

pub fn aggregate<'a>(entries: &'a [Entry], query: &CashflowQuery) -> CashflowView<'a> {
    let mut matched = query.filters.apply(entries);
    // Totals cover every match, not just the visible page
    let totals = Totals::from_entries(matched.iter().copied());

    query.sort.sort(&mut matched);

    let page = query.page.max(1);
    let total_pages = query.page_size.total_pages(matched.len());
    let visible = query.page_size.slice(&matched, page).to_vec();

    CashflowView {
        total_matching: matched.len(),
        total_pages,
        page,
        page_size: query.page_size,
        first_row: query.page_size.offset(page).saturating_add(1),
        entries: visible,
        totals,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::aggregation::sort::{SortDirection, SortField};
    use crate::models::cashflow::{parse_date, EntryType};
    use chrono::{NaiveDate, TimeZone, Utc};

    /// Ketengan entry whose price equals `total`.
    pub(crate) fn entry(
        id: &str,
        entry_type: EntryType,
        category: &str,
        period: &str,
        date: &str,
        total: i64,
    ) -> Entry {
        let timestamp = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Entry {
            id: id.to_string(),
            name: format!("entry {id}"),
            date: parse_date(date).unwrap(),
            period: period.to_string(),
            entry_type,
            category: category.to_string(),
            is_ketengan: true,
            qty: 1,
            price: total,
            total,
            notes: String::new(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    pub(crate) fn scenario_entries() -> Vec<Entry> {
        vec![
            entry("1", EntryType::Income, "Gaji", "01/2025", "2025-01-05", 1000),
            entry("2", EntryType::Expense, "Belanja", "01/2025", "2025-01-10", 400),
            entry("3", EntryType::Income, "Hasil", "02/2025", "2025-02-01", 500),
        ]
    }

    fn january() -> CashflowQuery {
        CashflowQuery::for_period(Period::new(1, 2025).unwrap())
    }

    fn ids(view: &CashflowView<'_>) -> Vec<String> {
        view.entries.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn month_filter_scenario() {
        let entries = scenario_entries();
        let view = aggregate(&entries, &january());

        assert_eq!(ids(&view), vec!["1", "2"]);
        assert_eq!(view.total_matching, 2);
        assert_eq!(view.total_pages, 1);
        assert_eq!(
            view.totals,
            Totals {
                income: 1000,
                expense: 400,
                profit: 600
            }
        );
    }

    #[test]
    fn second_page_of_one_sorted_by_total_desc() {
        let entries = scenario_entries();
        let mut query = january();
        query.sort = SortSpec::new(SortField::Total, SortDirection::Desc);
        query.page_size = PageSize::from_raw(1).unwrap();
        query.page = 2;

        let view = aggregate(&entries, &query);
        assert_eq!(ids(&view), vec!["2"]);
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.first_row, 2);
        // totals are not paginated
        assert_eq!(view.totals.profit, 600);
    }

    #[test]
    fn date_range_on_top_of_month() {
        let entries = scenario_entries();
        let mut query = january();
        query.filters.date_range = DateRange::new(
            NaiveDate::from_ymd_opt(2025, 1, 6),
            NaiveDate::from_ymd_opt(2025, 1, 31),
        );

        let view = aggregate(&entries, &query);
        assert_eq!(ids(&view), vec!["2"]);
        assert_eq!(
            view.totals,
            Totals {
                income: 0,
                expense: 400,
                profit: -400
            }
        );
    }

    #[test]
    fn show_all_is_a_single_page() {
        let entries: Vec<Entry> = (0..60)
            .map(|i| entry(&i.to_string(), EntryType::Expense, "Belanja", "01/2025", "2025-01-15", i))
            .collect();
        let mut query = january();
        query.page_size = PageSize::All;
        query.page = 3;

        let view = aggregate(&entries, &query);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.entries.len(), 60);
        assert_eq!(view.first_row, 1);
        assert_eq!(view.entries.first().map(|e| e.total), Some(59));
    }

    #[test]
    fn tab_filter_narrows_totals() {
        let entries = scenario_entries();
        let mut query = january();
        query.filters.tab = TypeFilter::Only(EntryType::Income);

        let view = aggregate(&entries, &query);
        assert_eq!(ids(&view), vec!["1"]);
        assert_eq!(view.totals.expense, 0);
        assert_eq!(view.totals.income, 1000);
    }

    #[test]
    fn pages_concatenate_to_full_sequence() {
        let entries: Vec<Entry> = (0..17)
            .map(|i| {
                let kind = if i % 3 == 0 { EntryType::Income } else { EntryType::Expense };
                entry(&format!("e{i}"), kind, "Lain-Lain", "01/2025", "2025-01-15", (i * 7) % 5)
            })
            .collect();
        let mut query = january();
        query.sort = SortSpec::new(SortField::Total, SortDirection::Asc);
        query.page_size = PageSize::from_raw(4).unwrap();

        let mut everything = january();
        everything.sort = query.sort;
        everything.page_size = PageSize::All;
        let full = ids(&aggregate(&entries, &everything));

        let first = aggregate(&entries, &query);
        let mut joined = Vec::new();
        for page in 1..=first.total_pages {
            query.page = page;
            joined.extend(ids(&aggregate(&entries, &query)));
        }
        assert_eq!(first.total_pages, 5);
        assert_eq!(joined, full);
    }

    #[test]
    fn totals_reconcile_with_filtered_entries() {
        let entries = scenario_entries();
        let view = aggregate(&entries, &january());
        let income: i64 = entries[..2]
            .iter()
            .filter(|e| e.entry_type == EntryType::Income)
            .map(|e| e.total)
            .sum();
        assert_eq!(view.totals.income, income);
        assert_eq!(view.totals.income - view.totals.expense, view.totals.profit);
    }

    #[test]
    fn empty_input_and_out_of_range_page() {
        let view = aggregate(&[], &january());
        assert!(view.entries.is_empty());
        assert_eq!(view.total_pages, 0);
        assert_eq!(view.totals, Totals::default());

        let entries = scenario_entries();
        let mut query = january();
        query.page = 40;
        let view = aggregate(&entries, &query);
        assert!(view.entries.is_empty());
        assert_eq!(view.total_matching, 2);
    }

    #[test]
    fn huge_page_number_is_an_empty_page() {
        let entries = scenario_entries();
        let mut query = january();
        query.page_size = PageSize::from_raw(1).unwrap();
        query.page = usize::MAX;

        let view = aggregate(&entries, &query);
        assert!(view.entries.is_empty());
        assert_eq!(view.page, usize::MAX);
        assert_eq!(view.first_row, usize::MAX);
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.totals.profit, 600);
    }

    #[test]
    fn same_input_same_output() {
        let entries = scenario_entries();
        let query = january();
        assert_eq!(aggregate(&entries, &query), aggregate(&entries, &query));
    }
}
