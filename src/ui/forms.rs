use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::StudentRecord;

/// Placeholder shown in an empty import buffer.
pub(crate) const IMPORT_PLACEHOLDER: &str = "Paste CSV (id,name,status or name,status)";

/// Single-field form used to add a student.
#[derive(Default, Clone)]
pub(crate) struct NameForm {
    pub(crate) name: String,
    pub(crate) error: Option<String>,
}

impl NameForm {
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.name.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.name.pop();
    }

    /// Validate the name before it reaches the roster.
    pub(crate) fn parse_input(&self) -> Result<String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(anyhow!("Student name is required."));
        }
        Ok(name.to_string())
    }

    pub(crate) fn build_line(&self, field_name: &str) -> Line<'static> {
        let (display, style) = if self.name.is_empty() {
            ("<required>".to_string(), Style::default().fg(Color::DarkGray))
        } else {
            (self.name.clone(), Style::default().fg(Color::Yellow))
        };
        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }

    pub(crate) fn value_len(&self) -> usize {
        self.name.chars().count()
    }
}

/// Multi-line paste buffer for the replace-import dialog.
#[derive(Default, Clone)]
pub(crate) struct ImportForm {
    pub(crate) text: String,
}

impl ImportForm {
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.text.push(ch);
        true
    }

    pub(crate) fn newline(&mut self) {
        self.text.push('\n');
    }

    /// Append pasted text verbatim; line endings are normalized by the parser.
    pub(crate) fn paste(&mut self, pasted: &str) {
        self.text.push_str(pasted);
    }

    pub(crate) fn backspace(&mut self) {
        self.text.pop();
    }

    pub(crate) fn clear(&mut self) {
        self.text.clear();
    }

    pub(crate) fn lines(&self) -> Vec<Line<'static>> {
        if self.text.is_empty() {
            return vec![Line::from(Span::styled(
                IMPORT_PLACEHOLDER,
                Style::default().fg(Color::DarkGray),
            ))];
        }
        self.text
            .split('\n')
            .map(|line| Line::from(line.trim_end_matches('\r').to_string()))
            .collect()
    }

    /// Row and column of the insertion point, relative to the text origin.
    pub(crate) fn cursor(&self) -> (u16, u16) {
        let row = self.text.matches('\n').count();
        let col = self
            .text
            .rsplit('\n')
            .next()
            .map(|last| last.chars().count())
            .unwrap_or(0);
        (col as u16, row as u16)
    }
}

#[derive(Clone)]
pub(crate) struct ConfirmRemove {
    pub(crate) id: i64,
    pub(crate) name: String,
}

impl ConfirmRemove {
    pub(crate) fn from(record: &StudentRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
        }
    }
}
