//! Domain models shared by the roster store, the CSV transcoder and the TUI.
//! These stay light-weight data holders; the transition rules live in
//! `roster` and the text formats in `transcode`.

use std::fmt;

/// Attendance marker for a single student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Unmarked,
    Present,
    Absent,
}

impl Status {
    /// Canonical text used in exports and in the status badge.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Unmarked => "Unmarked",
            Status::Present => "Present",
            Status::Absent => "Absent",
        }
    }

    /// Parse a status from user or CSV text. Matching ignores case and
    /// surrounding whitespace; anything else is not a status.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        [Status::Unmarked, Status::Present, Status::Absent]
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
    }

    /// Present flips to Absent; everything else becomes Present.
    pub fn toggled(self) -> Self {
        match self {
            Status::Absent => Status::Present,
            Status::Present => Status::Absent,
            Status::Unmarked => Status::Present,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    /// Identifier shown in the `#` column. Not guaranteed unique when ids
    /// come from an import.
    pub id: i64,
    pub name: String,
    pub status: Status,
}

impl StudentRecord {
    pub fn new(id: i64, name: impl Into<String>, status: Status) -> Self {
        Self {
            id,
            name: name.into(),
            status,
        }
    }

    /// Case-insensitive substring match on the name, or substring match on
    /// the decimal id.
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
            || self.id.to_string().contains(query)
    }
}

/// Monotonic source of ids for records created interactively or imported
/// without an explicit id. Values are handed out once and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdCounter {
    next: i64,
}

impl IdCounter {
    pub fn starting_at(next: i64) -> Self {
        Self { next }
    }

    /// Value the next call to [`IdCounter::allocate`] will return.
    pub fn peek(&self) -> i64 {
        self.next
    }

    pub fn allocate(&mut self) -> i64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for IdCounter {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

/// Aggregate status counts over the whole roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    pub total: usize,
    pub present: usize,
    pub absent: usize,
    pub unmarked: usize,
}

const SEED_NAMES: &[&str] = &[
    "Alice Johnson",
    "Bob Martinez",
    "Carla Singh",
    "Daniel Kim",
    "Eve Zhao",
];

/// Starter roster shown on first launch, paired with a counter positioned
/// just past the seeded ids.
pub fn seed_roster() -> (Vec<StudentRecord>, IdCounter) {
    let mut counter = IdCounter::default();
    let records = SEED_NAMES
        .iter()
        .map(|name| StudentRecord::new(counter.allocate(), *name, Status::Unmarked))
        .collect();
    (records, counter)
}
