//! In-memory roster store. The snapshot is an ordered `Vec`, never a keyed
//! map, so duplicate ids coming from an import survive exactly as entered.

mod action;
mod reducer;

use std::mem;

use tracing::{debug, info};

use crate::error::{RosterError, RosterResult};
use crate::models::{Counts, IdCounter, Status, StudentRecord};

pub use action::RosterAction;
pub use reducer::{Reducer, RosterReducer};

/// Owns the current snapshot and installs the reducer's output on every
/// dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    records: Vec<StudentRecord>,
}

impl Roster {
    pub fn new(records: Vec<StudentRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Run `action` through the reducer and replace the snapshot with the
    /// result.
    pub fn dispatch(&mut self, action: RosterAction) {
        let kind = action.kind();
        let before = self.records.len();
        let current = mem::take(&mut self.records);
        self.records = RosterReducer::reduce(current, action);
        debug!(action = kind, before, after = self.records.len(), "roster updated");
    }

    /// Trim `name`, allocate the next id and append an unmarked record.
    /// Blank names are rejected before the counter is touched.
    pub fn add_named(&mut self, name: &str, counter: &mut IdCounter) -> RosterResult<StudentRecord> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RosterError::EmptyName);
        }
        let record = StudentRecord::new(counter.allocate(), name, Status::Unmarked);
        info!(id = record.id, name = %record.name, "student added");
        self.dispatch(RosterAction::Add(record.clone()));
        Ok(record)
    }

    pub fn get(&self, id: i64) -> Option<&StudentRecord> {
        self.records.iter().find(|s| s.id == id)
    }

    /// Records matching `query` by name (case-insensitive) or id digits, in
    /// roster order.
    pub fn filter(&self, query: &str) -> Vec<StudentRecord> {
        self.records
            .iter()
            .filter(|s| s.matches(query))
            .cloned()
            .collect()
    }

    pub fn counts(&self) -> Counts {
        self.records.iter().fold(
            Counts {
                total: self.records.len(),
                ..Counts::default()
            },
            |mut counts, s| {
                match s.status {
                    Status::Present => counts.present += 1,
                    Status::Absent => counts.absent += 1,
                    Status::Unmarked => counts.unmarked += 1,
                }
                counts
            },
        )
    }
}
