use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::cashflow::Entry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Type,
    Price,
    Total,
    Qty,
    Date,
    Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        SortSpec {
            field: SortField::Total,
            direction: SortDirection::Desc,
        }
    }
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> SortSpec {
        SortSpec { field, direction }
    }

    pub fn compare(&self, a: &Entry, b: &Entry) -> Ordering {
        let ordering = match self.field {
            SortField::Type => a.entry_type.as_str().cmp(b.entry_type.as_str()),
            SortField::Price => a.price.cmp(&b.price),
            SortField::Total => a.total.cmp(&b.total),
            SortField::Qty => a.qty.cmp(&b.qty),
            SortField::Date => a.date.cmp(&b.date),
            SortField::Category => a.category.cmp(&b.category),
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Stable: equal keys keep their input order in either direction.
    pub fn sort(&self, entries: &mut [&Entry]) {
        entries.sort_by(|a, b| self.compare(a, b));
    }
}
