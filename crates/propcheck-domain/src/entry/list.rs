use super::DailyEntry;
use crate::shared::{DomainError, EntryId};

/// Ordered, editable list of daily entries
///
/// Invariants: never empty, and `day` numbers are always `1..=len` in
/// list order.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryList {
    entries: Vec<DailyEntry>,
}

impl Default for EntryList {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryList {
    /// A list holding a single, not yet entered day
    pub fn new() -> Self {
        Self {
            entries: vec![DailyEntry::new(1, None)],
        }
    }

    /// Rebuild a list from a snapshot, restoring the day numbering invariant
    pub fn from_entries(entries: Vec<DailyEntry>) -> Self {
        if entries.is_empty() {
            return Self::new();
        }
        let mut list = Self { entries };
        list.renumber();
        list
    }

    /// Parse a profit typed into the form
    ///
    /// Blank text means "not yet entered".
    pub fn parse_profit(raw: &str) -> Result<Option<f64>, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Some(value)),
            _ => Err(DomainError::InvalidInput(format!(
                "Profit must be a number, got '{}'",
                raw
            ))),
        }
    }

    pub fn append(&mut self) -> &DailyEntry {
        let day = self.entries.len() as u32 + 1;
        self.entries.push(DailyEntry::new(day, None));
        &self.entries[self.entries.len() - 1]
    }

    /// Remove an entry and renumber the rest
    ///
    /// Returns `false` when nothing was removed: the id is unknown or it
    /// is the only remaining entry.
    pub fn remove(&mut self, id: &EntryId) -> bool {
        if self.entries.len() <= 1 {
            return false;
        }
        let before = self.entries.len();
        self.entries.retain(|entry| &entry.id != id);
        if self.entries.len() == before {
            return false;
        }
        self.renumber();
        true
    }

    pub fn update(&mut self, id: &EntryId, profit: Option<f64>) -> Result<(), DomainError> {
        if let Some(value) = profit {
            if !value.is_finite() {
                return Err(DomainError::InvalidInput(format!(
                    "Profit must be a finite number, got {}",
                    value
                )));
            }
        }
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| &entry.id == id)
            .ok_or_else(|| DomainError::EntryNotFound(format!("Entry {} not found", id)))?;
        entry.profit = profit;
        Ok(())
    }

    pub fn update_raw(&mut self, id: &EntryId, raw: &str) -> Result<(), DomainError> {
        let profit = Self::parse_profit(raw)?;
        self.update(id, profit)
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn entries(&self) -> &[DailyEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<DailyEntry> {
        self.entries
    }

    /// Entries with a profit value, in list order
    pub fn valid_entries(&self) -> impl Iterator<Item = &DailyEntry> {
        self.entries.iter().filter(|entry| entry.is_entered())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn renumber(&mut self) {
        for (index, entry) in self.entries.iter_mut().enumerate() {
            entry.day = index as u32 + 1;
        }
    }
}
