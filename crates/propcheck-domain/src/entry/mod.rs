mod list;


use serde::{Deserialize, Serialize};

use crate::shared::EntryId;

pub use list::EntryList;

/// One trading day
///
/// `profit` is `None` until the trader enters a value; such days are
/// ignored by the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    pub id: EntryId,
    pub day: u32,
    pub profit: Option<f64>,
}

impl DailyEntry {
    pub fn new(day: u32, profit: Option<f64>) -> Self {
        Self {
            id: EntryId::new(),
            day,
            profit,
        }
    }

    pub fn is_entered(&self) -> bool {
        self.profit.is_some()
    }
}
