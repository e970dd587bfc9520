use crate::models::StudentRecord;
use crate::roster::Roster;

/// Filtered, selectable view over the roster. The roster stays the source of
/// truth; this only caches what the table shows.
pub(crate) struct RosterScreen {
    pub(crate) visible: Vec<StudentRecord>,
    pub(crate) filter: Option<String>,
    pub(crate) selected: usize,
}

impl RosterScreen {
    pub(crate) fn new(roster: &Roster) -> Self {
        let mut screen = Self {
            visible: Vec::new(),
            filter: None,
            selected: 0,
        };
        screen.refresh(roster);
        screen
    }

    /// Recompute the visible rows after the roster or the filter changed,
    /// keeping the cursor on the same student when it is still visible.
    pub(crate) fn refresh(&mut self, roster: &Roster) {
        let focus_id = self.current().map(|s| s.id);
        self.visible = match &self.filter {
            Some(q) if !q.is_empty() => roster.filter(q),
            _ => roster.records().to_vec(),
        };

        if let Some(pos) = focus_id.and_then(|id| self.visible.iter().position(|s| s.id == id)) {
            self.selected = pos;
        }
        self.ensure_in_bounds();
    }

    pub(crate) fn set_filter(&mut self, filter: Option<String>, roster: &Roster) {
        self.filter = filter;
        self.refresh(roster);
    }

    pub(crate) fn has_filter(&self) -> bool {
        self.filter
            .as_ref()
            .map(|q| !q.is_empty())
            .unwrap_or(false)
    }

    pub(crate) fn current(&self) -> Option<&StudentRecord> {
        self.visible.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.visible.is_empty() {
            return;
        }
        let len = self.visible.len() as isize;
        let new = (self.selected as isize + offset).clamp(0, len - 1);
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.visible.len().saturating_sub(1);
    }

    /// Move the cursor onto `id` if it is visible.
    pub(crate) fn focus(&mut self, id: i64) {
        if let Some(pos) = self.visible.iter().position(|s| s.id == id) {
            self.selected = pos;
        }
    }

    fn ensure_in_bounds(&mut self) {
        if self.visible.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.visible.len() {
            self.selected = self.visible.len() - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{seed_roster, Status};
    use crate::roster::RosterAction;

    fn seeded() -> Roster {
        Roster::new(seed_roster().0)
    }

    #[test]
    fn digit_filter_matches_id_only() {
        let roster = seeded();
        let mut screen = RosterScreen::new(&roster);
        screen.set_filter(Some("3".into()), &roster);
        let ids: Vec<i64> = screen.visible.iter().map(|s| s.id).collect();
        assert_eq!(ids, [3]);
    }

    #[test]
    fn empty_filter_shows_everything() {
        let roster = seeded();
        let mut screen = RosterScreen::new(&roster);
        screen.set_filter(Some(String::new()), &roster);
        assert_eq!(screen.visible.len(), 5);
        assert!(!screen.has_filter());
    }

    #[test]
    fn whitespace_filter_is_a_literal_substring() {
        let mut roster = seeded();
        roster.dispatch(RosterAction::Add(StudentRecord::new(
            6,
            "Madonna",
            Status::Unmarked,
        )));
        let mut screen = RosterScreen::new(&roster);
        screen.set_filter(Some(" ".into()), &roster);
        assert!(screen.has_filter());
        let ids: Vec<i64> = screen.visible.iter().map(|s| s.id).collect();
        assert_eq!(ids, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn selection_follows_student_across_refresh() {
        let mut roster = seeded();
        let mut screen = RosterScreen::new(&roster);
        screen.move_selection(2);
        assert_eq!(screen.current().map(|s| s.id), Some(3));

        roster.dispatch(RosterAction::Remove(1));
        screen.refresh(&roster);
        assert_eq!(screen.current().map(|s| s.id), Some(3));
    }

    #[test]
    fn selection_clamps_when_rows_disappear() {
        let mut roster = seeded();
        let mut screen = RosterScreen::new(&roster);
        screen.select_last();
        roster.dispatch(RosterAction::Replace(vec![StudentRecord::new(
            9,
            "Solo",
            Status::Unmarked,
        )]));
        screen.refresh(&roster);
        assert_eq!(screen.selected, 0);
        screen.move_selection(5);
        assert_eq!(screen.selected, 0);
    }
}
