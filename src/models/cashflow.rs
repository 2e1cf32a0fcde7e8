use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::kategori::CategorySet;

/// Date formats accepted for the `date` field. The first one is canonical.
pub const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    #[serde(alias = "in")]
    Income,
    #[serde(alias = "out")]
    Expense,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Income => "income",
            EntryType::Expense => "expense",
        }
    }

    /// Accepts the stored names as well as the form shorthands `in` / `out`.
    pub fn parse(value: &str) -> Option<EntryType> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" | "in" => Some(EntryType::Income),
            "expense" | "out" => Some(EntryType::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded income or expense.
///
/// `period` is kept as the raw stored string so that entries with a malformed
/// period survive decoding; they just never match a period filter. It is
/// chosen independently from `date` when the entry is saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    pub period: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub category: String,
    pub is_ketengan: bool,
    pub qty: i64,
    pub price: i64,
    pub total: i64,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ketengan entries are priced flat, quantity is ignored.
///
/// `None` when `qty * price` does not fit in an `i64`.
pub fn compute_total(is_ketengan: bool, qty: i64, price: i64) -> Option<i64> {
    if is_ketengan {
        Some(price)
    } else {
        qty.checked_mul(price)
    }
}

impl Entry {
    pub fn has_consistent_total(&self) -> bool {
        compute_total(self.is_ketengan, self.qty, self.price) == Some(self.total)
    }

    /// Builds a brand new entry from a validated request.
    pub fn create(request: ValidEntry, now: DateTime<Utc>) -> Entry {
        Entry::from_valid(Uuid::new_v4().to_string(), request, now, now)
    }

    /// Full-record update: everything but `id` and `created_at` is replaced.
    pub fn replace_with(&self, request: ValidEntry, now: DateTime<Utc>) -> Entry {
        Entry::from_valid(self.id.clone(), request, self.created_at, now)
    }

    fn from_valid(
        id: String,
        request: ValidEntry,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Entry {
        Entry {
            id,
            name: request.name,
            date: request.date,
            period: request.period.to_string(),
            entry_type: request.entry_type,
            category: request.category,
            is_ketengan: request.is_ketengan,
            qty: request.qty,
            price: request.price,
            total: request.total,
            notes: request.notes,
            created_at,
            updated_at,
        }
    }
}

/// A `MM/YYYY` bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(month: u32, year: i32) -> Option<Period> {
        if (1..=12).contains(&month) && (0..=9999).contains(&year) {
            Some(Period { year, month })
        } else {
            None
        }
    }

    /// Strict parse of the two selector values: two-digit month, four-digit year.
    pub fn from_parts(month: &str, year: &str) -> Option<Period> {
        if month.len() != 2 || year.len() != 4 {
            return None;
        }
        if !month.bytes().chain(year.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }
        Period::new(month.parse().ok()?, year.parse().ok()?)
    }

    /// Parses a stored `MM/YYYY` string. Anything else yields `None`.
    pub fn parse(value: &str) -> Option<Period> {
        let (month, year) = value.split_once('/')?;
        Period::from_parts(month, year)
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

#[derive(Debug, Error, PartialEq)]
pub enum EntryError {
    #[error("Nama tidak boleh kosong.")]
    EmptyName,

    #[error("Format tanggal tidak valid. Gunakan format YYYY-MM-DD.")]
    InvalidDate,

    #[error("Periode tidak valid. Bulan harus 2 digit dan tahun 4 digit.")]
    InvalidPeriod,

    #[error("Qty harus minimal 1.")]
    InvalidQty,

    #[error("Harga tidak boleh negatif.")]
    NegativePrice,

    #[error("Kategori '{0}' tidak ditemukan.")]
    UnknownCategory(String),

    #[error("Total terlalu besar.")]
    TotalOverflow,
}

fn default_ketengan() -> bool {
    true
}

fn default_qty() -> i64 {
    1
}

/// Form payload for both create and update.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryRequest {
    pub name: String,
    pub date: String, // Format: "YYYY-MM-DD"
    pub month: String,
    pub year: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub category: String,
    #[serde(default = "default_ketengan")]
    pub is_ketengan: bool,
    #[serde(default = "default_qty")]
    pub qty: i64,
    pub price: i64,
    #[serde(default)]
    pub notes: String,
}

/// An `EntryRequest` that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidEntry {
    pub name: String,
    pub date: NaiveDate,
    pub period: Period,
    pub entry_type: EntryType,
    pub category: String,
    pub is_ketengan: bool,
    pub qty: i64,
    pub price: i64,
    pub total: i64,
    pub notes: String,
}

impl EntryRequest {
    pub fn validate(self, categories: &CategorySet) -> Result<ValidEntry, EntryError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(EntryError::EmptyName);
        }

        let date = parse_date(&self.date).ok_or(EntryError::InvalidDate)?;
        let period =
            Period::from_parts(self.month.trim(), self.year.trim()).ok_or(EntryError::InvalidPeriod)?;

        // Qty hanya relevan kalau bukan ketengan
        let qty = if self.is_ketengan { self.qty.max(1) } else { self.qty };
        if qty < 1 {
            return Err(EntryError::InvalidQty);
        }
        if self.price < 0 {
            return Err(EntryError::NegativePrice);
        }
        let total =
            compute_total(self.is_ketengan, qty, self.price).ok_or(EntryError::TotalOverflow)?;

        let category = self.category.trim();
        if !categories.contains(category) {
            return Err(EntryError::UnknownCategory(category.to_string()));
        }

        Ok(ValidEntry {
            name: name.to_string(),
            date,
            period,
            entry_type: self.entry_type,
            category: category.to_string(),
            is_ketengan: self.is_ketengan,
            qty,
            price: self.price,
            total,
            notes: self.notes.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn request() -> EntryRequest {
        EntryRequest {
            name: "Beras".to_string(),
            date: "2025-01-10".to_string(),
            month: "01".to_string(),
            year: "2025".to_string(),
            entry_type: EntryType::Expense,
            category: "Belanja".to_string(),
            is_ketengan: false,
            qty: 3,
            price: 12_000,
            notes: String::new(),
        }
    }

    #[test]
    fn total_follows_ketengan_flag() {
        assert_eq!(compute_total(true, 5, 700), Some(700));
        assert_eq!(compute_total(false, 5, 700), Some(3_500));
        assert_eq!(compute_total(false, 3, i64::MAX / 2), None);
    }

    #[test]
    fn create_derives_total_and_timestamps() {
        let now = Utc.with_ymd_and_hms(2025, 1, 10, 8, 0, 0).unwrap();
        let valid = request().validate(&CategorySet::default()).unwrap();
        let entry = Entry::create(valid, now);

        assert_eq!(entry.total, 36_000);
        assert_eq!(entry.period, "01/2025");
        assert_eq!(entry.created_at, now);
        assert_eq!(entry.updated_at, now);
        assert!(entry.has_consistent_total());
        assert!(Uuid::parse_str(&entry.id).is_ok());
    }

    #[test]
    fn update_keeps_id_and_created_at() {
        let created = Utc.with_ymd_and_hms(2025, 1, 10, 8, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2025, 1, 12, 9, 30, 0).unwrap();
        let original = Entry::create(request().validate(&CategorySet::default()).unwrap(), created);

        let mut changed = request();
        changed.is_ketengan = true;
        changed.price = 50_000;
        let updated = original.replace_with(changed.validate(&CategorySet::default()).unwrap(), later);

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, created);
        assert_eq!(updated.updated_at, later);
        assert_eq!(updated.total, 50_000);
    }

    #[test]
    fn period_is_taken_from_selectors_not_date() {
        let mut req = request();
        req.month = "02".to_string();
        let valid = req.validate(&CategorySet::default()).unwrap();
        assert_eq!(valid.period.to_string(), "02/2025");
        assert_eq!(valid.date, NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
    }

    #[test]
    fn validation_rejects_bad_input() {
        let categories = CategorySet::default();

        let mut req = request();
        req.name = "   ".to_string();
        assert_eq!(req.validate(&categories), Err(EntryError::EmptyName));

        let mut req = request();
        req.qty = 0;
        assert_eq!(req.validate(&categories), Err(EntryError::InvalidQty));

        let mut req = request();
        req.price = -1;
        assert_eq!(req.validate(&categories), Err(EntryError::NegativePrice));

        let mut req = request();
        req.category = "Hiburan".to_string();
        assert_eq!(
            req.validate(&categories),
            Err(EntryError::UnknownCategory("Hiburan".to_string()))
        );

        let mut req = request();
        req.month = "1".to_string();
        assert_eq!(req.validate(&categories), Err(EntryError::InvalidPeriod));

        let mut req = request();
        req.date = "kemarin".to_string();
        assert_eq!(req.validate(&categories), Err(EntryError::InvalidDate));
    }

    #[test]
    fn overflowing_total_is_rejected() {
        let mut req = request();
        req.qty = 3;
        req.price = i64::MAX / 2;
        assert_eq!(req.validate(&CategorySet::default()), Err(EntryError::TotalOverflow));

        // ketengan ignores qty, so the same price is fine
        let mut req = request();
        req.is_ketengan = true;
        req.qty = 3;
        req.price = i64::MAX / 2;
        let valid = req.validate(&CategorySet::default()).unwrap();
        assert_eq!(valid.total, i64::MAX / 2);
    }

    #[test]
    fn clamped_total_is_not_consistent() {
        let now = Utc.with_ymd_and_hms(2025, 1, 10, 8, 0, 0).unwrap();
        let mut entry = Entry::create(request().validate(&CategorySet::default()).unwrap(), now);
        entry.qty = 3;
        entry.price = i64::MAX / 2;
        entry.total = i64::MAX;
        assert!(!entry.has_consistent_total());
    }

    #[test]
    fn ketengan_ignores_zero_qty() {
        let mut req = request();
        req.is_ketengan = true;
        req.qty = 0;
        let valid = req.validate(&CategorySet::default()).unwrap();
        assert_eq!(valid.qty, 1);
    }

    #[test]
    fn period_parsing() {
        assert_eq!(Period::parse("01/2025"), Period::new(1, 2025));
        assert_eq!(Period::parse("13/2025"), None);
        assert_eq!(Period::parse("012025"), None);
        assert_eq!(Period::parse("ab/2025"), None);
        assert_eq!(Period::parse(""), None);
        assert_eq!(Period::new(3, 2024).unwrap().to_string(), "03/2024");
    }

    #[test]
    fn both_date_formats_are_accepted() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 5);
        assert_eq!(parse_date("2025-01-05"), expected);
        assert_eq!(parse_date("05/01/2025"), expected);
        assert_eq!(parse_date("5 Jan 2025"), None);
    }

    #[test]
    fn entry_type_accepts_form_shorthand() {
        let parsed: EntryType = serde_json::from_str("\"out\"").unwrap();
        assert_eq!(parsed, EntryType::Expense);
        assert_eq!(EntryType::parse("Income"), Some(EntryType::Income));
        assert_eq!(EntryType::parse("transfer"), None);
    }
}
