use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

use crate::models::{Counts, Status};

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

/// Colored badge for the status column.
pub(crate) fn status_badge(status: Status) -> Span<'static> {
    let color = match status {
        Status::Present => Color::Green,
        Status::Absent => Color::Red,
        Status::Unmarked => Color::DarkGray,
    };
    Span::styled(
        status.as_str(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

/// `Present: 2 • Absent: 1 • Unmarked: 3`
pub(crate) fn summary_text(counts: &Counts) -> String {
    format!(
        "Present: {} • Absent: {} • Unmarked: {}",
        counts.present, counts.absent, counts.unmarked
    )
}

pub(crate) fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
