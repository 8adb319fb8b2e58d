use crate::types::VehicleTable;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// How a year's table ended up in the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearStatus {
    /// The page was fetched and parsed (the table may still be empty).
    Fetched,
    /// Fetching or parsing failed; the table is empty for the rest of the run.
    Failed,
}

/// A cached year: its launch table and how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearEntry {
    pub status: YearStatus,
    pub table: VehicleTable,
}

impl YearEntry {
    pub fn fetched(table: VehicleTable) -> Self {
        Self {
            status: YearStatus::Fetched,
            table,
        }
    }

    pub fn failed() -> Self {
        Self {
            status: YearStatus::Failed,
            table: VehicleTable::new(),
        }
    }

    /// Exact-match lookup of a designator.
    pub fn lookup(&self, designator: &str) -> Option<&str> {
        self.table.get(designator).map(String::as_str)
    }
}

/// Per-run memo of year tables. Each year is filled at most once.
#[derive(Debug, Default)]
pub struct YearCache {
    entries: HashMap<i32, YearEntry>,
}

impl YearCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, year: i32) -> Option<&YearEntry> {
        self.entries.get(&year)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of cached years with the given status.
    pub fn count(&self, status: YearStatus) -> usize {
        self.entries.values().filter(|e| e.status == status).count()
    }

    /// Cached years with the given status, ascending.
    pub fn years(&self, status: YearStatus) -> Vec<i32> {
        let mut years: Vec<i32> = self
            .entries
            .iter()
            .filter(|(_, e)| e.status == status)
            .map(|(y, _)| *y)
            .collect();
        years.sort_unstable();
        years
    }

    pub(crate) fn entry(&mut self, year: i32) -> Entry<'_, i32, YearEntry> {
        self.entries.entry(year)
    }
}
