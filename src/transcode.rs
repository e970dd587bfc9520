//! CSV export and paste-import for the roster.
//!
//! Export always quotes the name and doubles embedded quotes. Import is a
//! deliberately naive line parser: it splits on every comma and strips one
//! layer of surrounding quotes per field, so names containing commas do not
//! survive a round-trip. Lines that do not fit a known shape are dropped
//! without reporting.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{RosterError, RosterResult};
use crate::models::{IdCounter, Status, StudentRecord};
use crate::roster::{Roster, RosterAction};

pub const CSV_HEADER: &str = "Id,Name,Status";

/// Result of a paste-import that got past the empty-input check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The roster was replaced with this many records.
    Replaced(usize),
    /// No line parsed; the roster was left alone.
    NothingParsed,
}

/// Render the roster as CSV text. Lines are joined with `\n` and there is no
/// trailing newline.
pub fn export_csv(records: &[StudentRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADER.to_string());
    lines.extend(
        records
            .iter()
            .map(|s| format!("{},\"{}\",{}", s.id, s.name.replace('"', "\"\""), s.status)),
    );
    lines.join("\n")
}

/// Write the export to `dir/file_name`, creating `dir` when missing, and
/// return the full path.
pub fn write_export(dir: &Path, file_name: &str, records: &[StudentRecord]) -> RosterResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    fs::write(&path, export_csv(records))?;
    info!(path = %path.display(), rows = records.len(), "roster exported");
    Ok(path)
}

/// Parse pasted CSV text into records.
///
/// Accepted line shapes are `id,name,status` (exactly three fields with a
/// whole-number or blank id) and `name,status[,...]` (id taken from
/// `counter`). An empty status means unmarked.
pub fn parse_import(text: &str, counter: &mut IdCounter) -> RosterResult<Vec<StudentRecord>> {
    if text.trim().is_empty() {
        return Err(RosterError::EmptyImport);
    }

    let mut parsed = Vec::new();
    for line in text.split('\n').map(|l| l.trim()).filter(|l| !l.is_empty()) {
        match parse_line(line, counter) {
            Some(record) => parsed.push(record),
            None => debug!(line, "skipped import line"),
        }
    }
    Ok(parsed)
}

/// Parse `text` and, if anything parsed, replace the whole roster with it.
pub fn import_replace(
    roster: &mut Roster,
    text: &str,
    counter: &mut IdCounter,
) -> RosterResult<ImportOutcome> {
    let parsed = parse_import(text, counter)?;
    if parsed.is_empty() {
        info!("import produced no records; roster unchanged");
        return Ok(ImportOutcome::NothingParsed);
    }
    let count = parsed.len();
    roster.dispatch(RosterAction::Replace(parsed));
    info!(count, "roster replaced from import");
    Ok(ImportOutcome::Replaced(count))
}

/// What the first of three fields says about the id.
enum IdField {
    Given(i64),
    Blank,
}

// `\r\n` endings are handled by the caller's trim.
fn parse_line(line: &str, counter: &mut IdCounter) -> Option<StudentRecord> {
    let fields: Vec<&str> = line.split(',').map(strip_field).collect();

    if fields.len() == 3 {
        if let Some(id_field) = parse_id(fields[0]) {
            let (name, status) = name_and_status(fields[1], Some(fields[2]))?;
            let id = match id_field {
                IdField::Given(id) => id,
                IdField::Blank => counter.allocate(),
            };
            return Some(StudentRecord::new(id, name, status));
        }
    }

    if fields.len() >= 2 {
        let (name, status) = name_and_status(fields[0], Some(fields[1]))?;
        return Some(StudentRecord::new(counter.allocate(), name, status));
    }

    None
}

/// Numeric text such as `7`, `7.0` or `1e1` is an id when it is a whole
/// number. A blank field still marks the `id,name,status` shape but leaves the
/// id to the counter. Anything else is not an id.
fn parse_id(raw: &str) -> Option<IdField> {
    if raw.is_empty() {
        return Some(IdField::Blank);
    }
    if let Ok(id) = raw.parse::<i64>() {
        return Some(IdField::Given(id));
    }
    let value = raw.parse::<f64>().ok()?;
    let whole = value.is_finite()
        && value.fract() == 0.0
        && value >= i64::MIN as f64
        && value <= i64::MAX as f64;
    whole.then_some(IdField::Given(value as i64))
}

fn name_and_status(name: &str, status: Option<&str>) -> Option<(String, Status)> {
    if name.is_empty() {
        return None;
    }
    let status = match status {
        None | Some("") => Status::Unmarked,
        Some(raw) => Status::parse(raw)?,
    };
    Some((name.to_string(), status))
}

/// Drop one `"` right after leading whitespace and one right before trailing
/// whitespace, then trim.
fn strip_field(raw: &str) -> &str {
    let mut field = raw;
    if let Some(rest) = field.trim_start().strip_prefix('"') {
        field = rest;
    }
    if let Some(rest) = field.trim_end().strip_suffix('"') {
        field = rest;
    }
    field.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_quotes_names_and_doubles_quotes() {
        let records = vec![
            StudentRecord::new(1, "Alice Johnson", Status::Present),
            StudentRecord::new(2, "Anne \"AJ\" Lee", Status::Unmarked),
        ];
        assert_eq!(
            export_csv(&records),
            "Id,Name,Status\n1,\"Alice Johnson\",Present\n2,\"Anne \"\"AJ\"\" Lee\",Unmarked"
        );
    }

    #[test]
    fn export_of_empty_roster_is_header_only() {
        assert_eq!(export_csv(&[]), CSV_HEADER);
    }

    #[test]
    fn strip_field_removes_one_layer_of_quotes() {
        assert_eq!(strip_field(" \"Grace\" "), "Grace");
        assert_eq!(strip_field("\"\"Grace\"\""), "\"Grace\"");
        assert_eq!(strip_field("\""), "");
        assert_eq!(strip_field("plain"), "plain");
    }

    #[test]
    fn blank_lines_and_crlf_are_ignored() {
        let mut counter = IdCounter::starting_at(10);
        let parsed = parse_import("\r\n1,Ann,Present\r\n\r\n   \n2,Ben,Absent\r\n", &mut counter)
            .unwrap();
        assert_eq!(
            parsed,
            vec![
                StudentRecord::new(1, "Ann", Status::Present),
                StudentRecord::new(2, "Ben", Status::Absent),
            ]
        );
        assert_eq!(counter.peek(), 10);
    }

    #[test]
    fn three_fields_with_text_first_fall_back_to_name_status() {
        let mut counter = IdCounter::starting_at(10);
        let parsed = parse_import("Ivy,Present,extra", &mut counter).unwrap();
        assert_eq!(parsed, vec![StudentRecord::new(10, "Ivy", Status::Present)]);
    }

    #[test]
    fn empty_status_defaults_to_unmarked() {
        let mut counter = IdCounter::starting_at(10);
        let parsed = parse_import("4,Dana,\nEli,", &mut counter).unwrap();
        assert_eq!(
            parsed,
            vec![
                StudentRecord::new(4, "Dana", Status::Unmarked),
                StudentRecord::new(10, "Eli", Status::Unmarked),
            ]
        );
    }

    #[test]
    fn single_field_and_unknown_status_lines_are_dropped() {
        let mut counter = IdCounter::starting_at(10);
        let parsed =
            parse_import("Id,Name,Status\nJustAName\n5,Fay,Late\n,Absent\nGus,Absent", &mut counter)
                .unwrap();
        assert_eq!(parsed, vec![StudentRecord::new(10, "Gus", Status::Absent)]);
        assert_eq!(counter.peek(), 11);
    }

    #[test]
    fn integral_numeric_text_is_accepted_as_id() {
        let mut counter = IdCounter::starting_at(10);
        let parsed =
            parse_import("7.0,Grace,Present\n 1e1 ,Hal,Absent\n+3,Ida,", &mut counter).unwrap();
        assert_eq!(
            parsed,
            vec![
                StudentRecord::new(7, "Grace", Status::Present),
                StudentRecord::new(10, "Hal", Status::Absent),
                StudentRecord::new(3, "Ida", Status::Unmarked),
            ]
        );
        assert_eq!(counter.peek(), 10);
    }

    #[test]
    fn blank_id_field_takes_next_counter_value() {
        let mut counter = IdCounter::starting_at(10);
        let parsed = parse_import(",Grace,Present\n\"\",Jo,Absent", &mut counter).unwrap();
        assert_eq!(
            parsed,
            vec![
                StudentRecord::new(10, "Grace", Status::Present),
                StudentRecord::new(11, "Jo", Status::Absent),
            ]
        );
    }

    #[test]
    fn fractional_or_infinite_id_is_not_an_id() {
        let mut counter = IdCounter::starting_at(10);
        // Both lines fall back to `name,status` and then fail the status check.
        let parsed = parse_import("1.5,Grace,Present\ninf,Hal,Absent", &mut counter).unwrap();
        assert!(parsed.is_empty());
        assert_eq!(counter.peek(), 10);
    }

    #[test]
    fn whitespace_only_text_is_rejected() {
        let mut counter = IdCounter::default();
        let err = parse_import(" \n\t\r\n", &mut counter).unwrap_err();
        assert!(matches!(err, RosterError::EmptyImport));
    }
}
