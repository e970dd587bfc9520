use crate::models::{Status, StudentRecord};

use super::action::RosterAction;

/// Reducers are the only place state transitions happen.
///
/// `reduce` must be a pure function: `(State, Action) -> State`.
pub trait Reducer {
    type State;
    type Action;

    fn reduce(state: Self::State, action: Self::Action) -> Self::State;
}

pub struct RosterReducer;

impl Reducer for RosterReducer {
    type State = Vec<StudentRecord>;
    type Action = RosterAction;

    fn reduce(state: Self::State, action: Self::Action) -> Self::State {
        match action {
            RosterAction::Add(record) => {
                let mut state = state;
                state.push(record);
                state
            }
            RosterAction::Remove(id) => state.into_iter().filter(|s| s.id != id).collect(),
            RosterAction::Mark { id, status } => map_matching(state, id, |_| status),
            RosterAction::Toggle(id) => map_matching(state, id, Status::toggled),
            RosterAction::MarkAll(status) => map_all(state, |_| status),
            RosterAction::Reset => map_all(state, |_| Status::Unmarked),
            RosterAction::Replace(records) => records,
        }
    }
}

// Ids are not unique after an import, so every record sharing `id` is updated.
fn map_matching(
    state: Vec<StudentRecord>,
    id: i64,
    next: impl Fn(Status) -> Status,
) -> Vec<StudentRecord> {
    state
        .into_iter()
        .map(|mut s| {
            if s.id == id {
                s.status = next(s.status);
            }
            s
        })
        .collect()
}

fn map_all(state: Vec<StudentRecord>, next: impl Fn(Status) -> Status) -> Vec<StudentRecord> {
    state
        .into_iter()
        .map(|mut s| {
            s.status = next(s.status);
            s
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<StudentRecord> {
        vec![
            StudentRecord::new(1, "Alice", Status::Present),
            StudentRecord::new(2, "Bob", Status::Absent),
            StudentRecord::new(3, "Carla", Status::Unmarked),
        ]
    }

    #[test]
    fn mark_unknown_id_is_noop() {
        let state = RosterReducer::reduce(
            roster(),
            RosterAction::Mark {
                id: 99,
                status: Status::Absent,
            },
        );
        assert_eq!(state, roster());
    }

    #[test]
    fn toggle_only_touches_matching_id() {
        let state = RosterReducer::reduce(roster(), RosterAction::Toggle(3));
        let statuses: Vec<Status> = state.iter().map(|s| s.status).collect();
        assert_eq!(statuses, [Status::Present, Status::Absent, Status::Present]);
    }

    #[test]
    fn duplicate_ids_are_all_updated_and_all_removed() {
        let mut state = roster();
        state.push(StudentRecord::new(2, "Bobby", Status::Unmarked));

        let marked = RosterReducer::reduce(
            state.clone(),
            RosterAction::Mark {
                id: 2,
                status: Status::Present,
            },
        );
        assert_eq!(
            marked.iter().filter(|s| s.id == 2 && s.status == Status::Present).count(),
            2
        );

        let removed = RosterReducer::reduce(state, RosterAction::Remove(2));
        assert_eq!(removed.len(), 2);
        assert!(removed.iter().all(|s| s.id != 2));
    }

    #[test]
    fn replace_discards_previous_records() {
        let incoming = vec![StudentRecord::new(7, "Grace", Status::Present)];
        let state = RosterReducer::reduce(roster(), RosterAction::Replace(incoming.clone()));
        assert_eq!(state, incoming);
    }
}
