use serde::Serialize;

pub const DEFAULT_CATEGORIES: [&str; 4] = ["Gaji", "Hasil", "Belanja", "Lain-Lain"];

/// Category used when a stored row has none.
pub const FALLBACK_CATEGORY: &str = "Lain-Lain";

/// The closed set of categories an entry may use. Order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategorySet(Vec<String>);

impl CategorySet {
    /// Builds a set from a list, trimming names and dropping blanks and duplicates.
    pub fn new<I, S>(names: I) -> CategorySet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set: Vec<String> = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            if !name.is_empty() && !set.iter().any(|existing| existing == name) {
                set.push(name.to_string());
            }
        }
        CategorySet(set)
    }

    /// Parses a comma separated list, e.g. `Gaji,Hasil,Belanja`.
    pub fn parse_list(value: &str) -> CategorySet {
        CategorySet::new(value.split(','))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|existing| existing == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        CategorySet::new(DEFAULT_CATEGORIES)
    }
}
