use chrono::NaiveDate;

use crate::models::cashflow::{Entry, EntryType, Period};

/// Sentinel accepted by both the category and the tab selector.
pub const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn parse(value: &str) -> CategoryFilter {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ALL) {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => entry.category == *category,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFilter {
    All,
    Only(EntryType),
}

impl TypeFilter {
    /// `None` for anything that is neither the sentinel nor an entry type.
    pub fn parse(value: &str) -> Option<TypeFilter> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ALL) {
            return Some(TypeFilter::All);
        }
        EntryType::parse(value).map(TypeFilter::Only)
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(entry_type) => entry.entry_type == *entry_type,
        }
    }
}

/// Inclusive date bounds. Either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> DateRange {
        DateRange { start, end }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

/// Exact match against the stored period string. Malformed periods never match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodFilter(String);

impl PeriodFilter {
    pub fn new(period: Period) -> PeriodFilter {
        PeriodFilter(period.to_string())
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        entry.period == self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The four narrowing stages, applied in order: period, category, date range, tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filters {
    pub period: PeriodFilter,
    pub category: CategoryFilter,
    pub date_range: DateRange,
    pub tab: TypeFilter,
}

impl Filters {
    /// Keeps input order, which is what sort ties fall back to.
    pub fn apply<'a>(&self, entries: &'a [Entry]) -> Vec<&'a Entry> {
        let mut matched: Vec<&Entry> = entries.iter().filter(|e| self.period.matches(e)).collect();

        if self.category != CategoryFilter::All {
            matched.retain(|e| self.category.matches(e));
        }
        if !self.date_range.is_unbounded() {
            matched.retain(|e| self.date_range.contains(e.date));
        }
        if self.tab != TypeFilter::All {
            matched.retain(|e| self.tab.matches(e));
        }

        matched
    }
}
