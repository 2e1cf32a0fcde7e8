//! Column layout of the cashflow sheet and the strict decode step from loose
//! text cells into [`Entry`].

use chrono::{DateTime, Utc};
use csv::StringRecord;
use thiserror::Error;

use crate::models::cashflow::{parse_date, Entry, EntryType};
use crate::models::kategori::FALLBACK_CATEGORY;

pub const HEADERS: [&str; 13] = [
    "ID",
    "Period",
    "Date",
    "Nama",
    "Type",
    "Category",
    "Ketengan",
    "Qty",
    "Price",
    "Total",
    "Notes",
    "Created At",
    "Updated At",
];

const ID: usize = 0;
const PERIOD: usize = 1;
const DATE: usize = 2;
const NAME: usize = 3;
const TYPE: usize = 4;
const CATEGORY: usize = 5;
const KETENGAN: usize = 6;
const QTY: usize = 7;
const PRICE: usize = 8;
const TOTAL: usize = 9;
const NOTES: usize = 10;
const CREATED_AT: usize = 11;
const UPDATED_AT: usize = 12;

#[derive(Debug, Error, PartialEq)]
pub enum RowError {
    #[error("row {row} is empty")]
    Empty { row: usize },

    #[error("row {row}: unreadable date '{value}'")]
    Date { row: usize, value: String },

    #[error("row {row}: unknown entry type '{value}'")]
    Type { row: usize, value: String },
}

fn cell(record: &StringRecord, column: usize) -> &str {
    record.get(column).map(str::trim).unwrap_or("")
}

/// Non-numeric cells count as zero.
fn number(record: &StringRecord, column: usize) -> i64 {
    cell(record, column).parse().unwrap_or(0)
}

fn timestamp(record: &StringRecord, column: usize, now: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(cell(record, column))
        .map(|ts| ts.with_timezone(&Utc))
        .unwrap_or(now)
}

fn text_or(record: &StringRecord, column: usize, fallback: &str) -> String {
    match cell(record, column) {
        "" => fallback.to_string(),
        value => value.to_string(),
    }
}

/// Decodes data row `index` (0-based, header excluded).
///
/// Missing cells fall back to defaults; only rows without a readable date or
/// with an unknown type are rejected.
pub fn decode(index: usize, record: &StringRecord, now: DateTime<Utc>) -> Result<Entry, RowError> {
    if record.iter().all(|value| value.trim().is_empty()) {
        return Err(RowError::Empty { row: index });
    }

    let date = parse_date(cell(record, DATE)).ok_or_else(|| RowError::Date {
        row: index,
        value: cell(record, DATE).to_string(),
    })?;

    let entry_type = match cell(record, TYPE) {
        "" => EntryType::Income,
        value => EntryType::parse(value).ok_or_else(|| RowError::Type {
            row: index,
            value: value.to_string(),
        })?,
    };

    let entry = Entry {
        id: text_or(record, ID, &format!("temp-{index}")),
        name: cell(record, NAME).to_string(),
        date,
        period: cell(record, PERIOD).to_string(),
        entry_type,
        category: text_or(record, CATEGORY, FALLBACK_CATEGORY),
        is_ketengan: cell(record, KETENGAN) == "Yes",
        qty: number(record, QTY),
        price: number(record, PRICE),
        total: number(record, TOTAL),
        notes: cell(record, NOTES).to_string(),
        created_at: timestamp(record, CREATED_AT, now),
        updated_at: timestamp(record, UPDATED_AT, now),
    };

    if !entry.has_consistent_total() {
        tracing::warn!(
            id = %entry.id,
            total = entry.total,
            qty = entry.qty,
            price = entry.price,
            "stored total does not match qty/price"
        );
    }

    Ok(entry)
}

pub fn encode(entry: &Entry) -> StringRecord {
    let ketengan = if entry.is_ketengan { "Yes" } else { "No" };
    StringRecord::from(vec![
        entry.id.clone(),
        entry.period.clone(),
        entry.date.format("%Y-%m-%d").to_string(),
        entry.name.clone(),
        entry.entry_type.as_str().to_string(),
        entry.category.clone(),
        ketengan.to_string(),
        entry.qty.to_string(),
        entry.price.to_string(),
        entry.total.to_string(),
        entry.notes.clone(),
        entry.created_at.to_rfc3339(),
        entry.updated_at.to_rfc3339(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn full_row_decodes() {
        let record = StringRecord::from(vec![
            "abc",
            "01/2025",
            "2025-01-10",
            "Beras",
            "expense",
            "Belanja",
            "No",
            "3",
            "12000",
            "36000",
            "pasar",
            "2025-01-10T01:00:00+00:00",
            "2025-01-11T01:00:00+00:00",
        ]);
        let entry = decode(0, &record, now()).unwrap();

        assert_eq!(entry.id, "abc");
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
        assert_eq!(entry.entry_type, EntryType::Expense);
        assert!(!entry.is_ketengan);
        assert_eq!((entry.qty, entry.price, entry.total), (3, 12_000, 36_000));
        assert_eq!(entry.updated_at, Utc.with_ymd_and_hms(2025, 1, 11, 1, 0, 0).unwrap());
    }

    #[test]
    fn short_row_uses_fallbacks() {
        let record = StringRecord::from(vec!["", "", "05/01/2025", "", "", "", "", "x", "1.5"]);
        let entry = decode(7, &record, now()).unwrap();

        assert_eq!(entry.id, "temp-7");
        assert_eq!(entry.period, "");
        assert_eq!(entry.entry_type, EntryType::Income);
        assert_eq!(entry.category, "Lain-Lain");
        assert_eq!((entry.qty, entry.price, entry.total), (0, 0, 0));
        assert_eq!(entry.notes, "");
        assert_eq!(entry.created_at, now());
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
    }

    #[test]
    fn unreadable_rows_are_rejected() {
        let blank = StringRecord::from(vec!["", " ", ""]);
        assert_eq!(decode(2, &blank, now()), Err(RowError::Empty { row: 2 }));

        let no_date = StringRecord::from(vec!["id", "01/2025", "besok"]);
        assert!(matches!(decode(0, &no_date, now()), Err(RowError::Date { .. })));

        let bad_type = StringRecord::from(vec!["id", "01/2025", "2025-01-01", "x", "transfer"]);
        assert!(matches!(decode(0, &bad_type, now()), Err(RowError::Type { .. })));
    }

    #[test]
    fn encode_then_decode_keeps_entry() {
        let record = StringRecord::from(vec![
            "abc", "01/2025", "2025-01-10", "Gaji Jan", "income", "Gaji", "Yes", "1", "5000000",
            "5000000", "", "2025-01-10T01:00:00+00:00", "2025-01-10T01:00:00+00:00",
        ]);
        let entry = decode(0, &record, now()).unwrap();
        assert_eq!(decode(0, &encode(&entry), now()).unwrap(), entry);
        assert_eq!(encode(&entry).len(), HEADERS.len());
    }
}
