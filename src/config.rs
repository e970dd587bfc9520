//! Runtime settings resolved once at startup.

use std::env;
use std::path::PathBuf;

use directories::{BaseDirs, UserDirs};

use crate::error::{RosterError, RosterResult};

/// Folder name used beneath the user's home directory when no download
/// directory is known.
const DATA_DIR_NAME: &str = ".attendance-roster";
/// File name for the CSV export.
pub const EXPORT_FILE_NAME: &str = "attendance.csv";
/// Environment variable naming the log file. Logging stays off without it.
pub const LOG_ENV_VAR: &str = "ATTENDANCE_ROSTER_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub export_dir: PathBuf,
    pub export_file_name: String,
    pub log_path: Option<PathBuf>,
}

impl AppConfig {
    /// Export into the user's download directory when the platform has one,
    /// otherwise into `~/.attendance-roster`.
    pub fn resolve() -> RosterResult<Self> {
        let download_dir =
            UserDirs::new().and_then(|dirs| dirs.download_dir().map(PathBuf::from));
        let export_dir = match download_dir {
            Some(dir) => dir,
            None => BaseDirs::new()
                .map(|dirs| dirs.home_dir().join(DATA_DIR_NAME))
                .ok_or_else(|| RosterError::Config("could not locate home directory".into()))?,
        };

        let log_path = env::var_os(LOG_ENV_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Ok(Self::with_export_dir(export_dir).with_log_path(log_path))
    }

    pub fn with_export_dir(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
            export_file_name: EXPORT_FILE_NAME.to_string(),
            log_path: None,
        }
    }

    pub fn with_log_path(mut self, log_path: Option<PathBuf>) -> Self {
        self.log_path = log_path;
        self
    }
}
