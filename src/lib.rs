//! Core library surface for the attendance roster.
//!
//! The roster store and the CSV transcoder are plain data transforms and can
//! be used without the terminal front-end; the `bin` target wires them to the
//! Ratatui UI.
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod roster;
pub mod transcode;
pub mod ui;

pub use config::AppConfig;
pub use error::{RosterError, RosterResult};
pub use models::{seed_roster, Counts, IdCounter, Status, StudentRecord};
pub use roster::{Reducer, Roster, RosterAction, RosterReducer};
pub use transcode::{export_csv, import_replace, parse_import, write_export, ImportOutcome};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
