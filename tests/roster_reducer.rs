use attendance_roster::{
    seed_roster, Reducer, Roster, RosterAction, RosterReducer, Status, StudentRecord,
};

fn seeded() -> Vec<StudentRecord> {
    seed_roster().0
}

fn statuses(state: &[StudentRecord]) -> Vec<Status> {
    state.iter().map(|s| s.status).collect()
}

#[test]
fn add_then_remove_restores_previous_roster() {
    let before = seeded();
    let added = RosterReducer::reduce(
        before.clone(),
        RosterAction::Add(StudentRecord::new(6, "Frank Ocean", Status::Present)),
    );
    assert_eq!(added.len(), 6);
    assert_eq!(added.last().map(|s| s.name.as_str()), Some("Frank Ocean"));

    let after = RosterReducer::reduce(added, RosterAction::Remove(6));
    assert_eq!(after, before);
}

#[test]
fn remove_unknown_id_is_noop() {
    let state = RosterReducer::reduce(seeded(), RosterAction::Remove(42));
    assert_eq!(state, seeded());
}

#[test]
fn toggle_unknown_id_is_noop() {
    let state = RosterReducer::reduce(seeded(), RosterAction::Toggle(42));
    assert_eq!(state, seeded());
}

#[test]
fn reset_clears_every_status() {
    let mut state = RosterReducer::reduce(seeded(), RosterAction::MarkAll(Status::Present));
    state = RosterReducer::reduce(
        state,
        RosterAction::Mark {
            id: 2,
            status: Status::Absent,
        },
    );
    let state = RosterReducer::reduce(state, RosterAction::Reset);
    assert!(state.iter().all(|s| s.status == Status::Unmarked));
}

#[test]
fn last_mark_all_wins() {
    let state = RosterReducer::reduce(seeded(), RosterAction::MarkAll(Status::Present));
    let state = RosterReducer::reduce(state, RosterAction::MarkAll(Status::Absent));
    assert_eq!(statuses(&state), vec![Status::Absent; 5]);
}

#[test]
fn mark_preserves_order_and_other_records() {
    let state = RosterReducer::reduce(
        seeded(),
        RosterAction::Mark {
            id: 4,
            status: Status::Present,
        },
    );
    let ids: Vec<i64> = state.iter().map(|s| s.id).collect();
    assert_eq!(ids, [1, 2, 3, 4, 5]);
    assert_eq!(
        statuses(&state),
        [
            Status::Unmarked,
            Status::Unmarked,
            Status::Unmarked,
            Status::Present,
            Status::Unmarked,
        ]
    );
}

#[test]
fn toggling_twice_from_present_returns_to_present() {
    let state = RosterReducer::reduce(
        seeded(),
        RosterAction::Mark {
            id: 1,
            status: Status::Present,
        },
    );
    let once = RosterReducer::reduce(state, RosterAction::Toggle(1));
    assert_eq!(once[0].status, Status::Absent);
    let twice = RosterReducer::reduce(once, RosterAction::Toggle(1));
    assert_eq!(twice[0].status, Status::Present);
}

// Unmarked is not a stop in a three-way cycle: it toggles straight to Present,
// and from there plain Present/Absent alternation takes over.
#[test]
fn toggling_from_unmarked_yields_present() {
    let once = RosterReducer::reduce(seeded(), RosterAction::Toggle(3));
    assert_eq!(once[2].status, Status::Present);
    let twice = RosterReducer::reduce(once, RosterAction::Toggle(3));
    assert_eq!(twice[2].status, Status::Absent);
    let thrice = RosterReducer::reduce(twice, RosterAction::Toggle(3));
    assert_eq!(thrice[2].status, Status::Present);
}

#[test]
fn duplicate_ids_are_kept_side_by_side() {
    let mut roster = Roster::new(seeded());
    roster.dispatch(RosterAction::Add(StudentRecord::new(
        3,
        "Another Three",
        Status::Unmarked,
    )));
    assert_eq!(roster.len(), 6);
    assert_eq!(roster.records().iter().filter(|s| s.id == 3).count(), 2);
    assert_eq!(roster.get(3).map(|s| s.name.as_str()), Some("Carla Singh"));
}

#[test]
fn filter_by_digit_returns_matching_id() {
    let roster = Roster::new(seeded());
    let hits = roster.filter("3");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 3);
}

#[test]
fn filter_by_name_is_case_insensitive() {
    let roster = Roster::new(seeded());
    let hits: Vec<i64> = roster.filter("AN").iter().map(|s| s.id).collect();
    assert_eq!(hits, [4]);
}
