//! Flat input rows: one optional value per hierarchy level.

use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;

/// A single input row.
///
/// Levels are 1-based. Only non-empty values are stored, so a record without
/// any entries is a blank line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    levels: BTreeMap<usize, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from positional fields (`level1`, `level2`, ...).
    /// Empty fields are dropped.
    pub fn from_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut record = Self::new();
        for (i, field) in fields.into_iter().enumerate() {
            record.set(i + 1, field);
        }
        record
    }

    /// Record with a single value at `level`.
    pub fn at(level: usize, value: impl Into<String>) -> Self {
        let mut record = Self::new();
        record.set(level, value);
        record
    }

    /// Set the value for `level`; empty values clear the slot.
    pub fn set(&mut self, level: usize, value: impl Into<String>) {
        let value = value.into();
        if level == 0 || value.is_empty() {
            self.levels.remove(&level);
        } else {
            self.levels.insert(level, value);
        }
    }

    pub fn value_at(&self, level: usize) -> Option<&str> {
        self.levels.get(&level).map(String::as_str)
    }

    pub fn has(&self, level: usize) -> bool {
        self.levels.contains_key(&level)
    }

    /// Highest populated level, `None` for blank records.
    pub fn declared_depth(&self) -> Option<usize> {
        self.levels.keys().next_back().copied()
    }

    pub fn is_blank(&self) -> bool {
        self.levels.is_empty()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let depth = self.declared_depth().unwrap_or(0);
        let fields = (1..=depth).map(|l| self.value_at(l).unwrap_or(""));
        write!(f, "{}", fields.format("|"))
    }
}
