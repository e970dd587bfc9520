use crate::models::{Status, StudentRecord};

/// Every transition the roster accepts. Actions carry their full payload so
/// the reducer never has to consult anything outside `(state, action)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterAction {
    Add(StudentRecord),
    Remove(i64),
    Mark { id: i64, status: Status },
    Toggle(i64),
    MarkAll(Status),
    Reset,
    Replace(Vec<StudentRecord>),
}

impl RosterAction {
    /// Short name used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            RosterAction::Add(_) => "add",
            RosterAction::Remove(_) => "remove",
            RosterAction::Mark { .. } => "mark",
            RosterAction::Toggle(_) => "toggle",
            RosterAction::MarkAll(_) => "mark_all",
            RosterAction::Reset => "reset",
            RosterAction::Replace(_) => "replace",
        }
    }
}
