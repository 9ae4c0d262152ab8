use std::collections::HashMap;

const ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Month names the disruption dataset may use, mapped to their number (1-12).
/// Lookups are exact, so `"jan"` does not resolve against the default table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthTable(HashMap<String, u32>);

impl Default for MonthTable {
    fn default() -> Self {
        ABBREVIATIONS
            .iter()
            .enumerate()
            .map(|(i, name)| (*name, i as u32 + 1))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for MonthTable {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, number)| (name.into(), number))
                .collect(),
        )
    }
}

impl MonthTable {
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds (or replaces) an alias, e.g. `"Sept"` for 9.
    pub fn with<S: Into<String>>(mut self, name: S, number: u32) -> Self {
        self.0.insert(name.into(), number);
        self
    }

    pub fn resolve(&self, name: &str) -> Option<u32> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[test]
fn default_table_has_twelve_months() {
    let table = MonthTable::default();
    assert_eq!(table.len(), 12);
    assert_eq!(table.resolve("Jan"), Some(1));
    assert_eq!(table.resolve("Sep"), Some(9));
    assert_eq!(table.resolve("Dec"), Some(12));
}

#[test]
fn unknown_month_does_not_resolve() {
    let table = MonthTable::default();
    assert_eq!(table.resolve("Sept"), None);
    assert_eq!(table.resolve("jan"), None);
    assert_eq!(table.with("Sept", 9).resolve("Sept"), Some(9));
}
