use serde::Serialize;

use crate::models::cashflow::{Entry, EntryType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: i64,
    pub expense: i64,
    pub profit: i64,
}

impl Totals {
    /// Adds one entry. An entry that would overflow any of the three sums is
    /// skipped with a warning, so `profit == income - expense` always holds.
    pub fn add(&mut self, entry: &Entry) {
        let (income, expense) = match entry.entry_type {
            EntryType::Income => (self.income.checked_add(entry.total), Some(self.expense)),
            EntryType::Expense => (Some(self.income), self.expense.checked_add(entry.total)),
        };
        let next = income.zip(expense).and_then(|(income, expense)| {
            income
                .checked_sub(expense)
                .map(|profit| Totals { income, expense, profit })
        });
        match next {
            Some(next) => *self = next,
            None => tracing::warn!(id = %entry.id, total = entry.total, "entry total overflows totals, skipped"),
        }
    }

    pub fn from_entries<'a, I>(entries: I) -> Totals
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        entries.into_iter().fold(Totals::default(), |mut acc, entry| {
            acc.add(entry);
            acc
        })
    }
}
