use std::num::NonZeroUsize;

use serde::{Serialize, Serializer};

/// Raw value the selector sends for "show everything".
pub const SHOW_ALL: i64 = -1;

pub const DEFAULT_PAGE_SIZE: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    All,
    Size(NonZeroUsize),
}

impl PageSize {
    /// `-1` means unpaginated; zero and other negatives are rejected.
    pub fn from_raw(raw: i64) -> Option<PageSize> {
        if raw == SHOW_ALL {
            return Some(PageSize::All);
        }
        usize::try_from(raw)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(PageSize::Size)
    }

    pub fn as_raw(&self) -> i64 {
        match self {
            PageSize::All => SHOW_ALL,
            PageSize::Size(size) => i64::try_from(size.get()).unwrap_or(i64::MAX),
        }
    }

    pub fn total_pages(&self, len: usize) -> usize {
        match self {
            PageSize::All => 1,
            PageSize::Size(size) => len.div_ceil(size.get()),
        }
    }

    /// Slice for the 1-based `page`. Pages past the end come back empty.
    pub fn slice<'s, T>(&self, items: &'s [T], page: usize) -> &'s [T] {
        match self {
            PageSize::All => items,
            PageSize::Size(size) => {
                let size = size.get();
                let start = page.saturating_sub(1).saturating_mul(size);
                if start >= items.len() {
                    return &[];
                }
                let end = start.saturating_add(size).min(items.len());
                &items[start..end]
            }
        }
    }

    /// Zero-based offset of the first item on `page`, for row numbering.
    pub fn offset(&self, page: usize) -> usize {
        match self {
            PageSize::All => 0,
            PageSize::Size(size) => page.saturating_sub(1).saturating_mul(size.get()),
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::Size(NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN))
    }
}

impl Serialize for PageSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_raw())
    }
}
