//! Binary entry point: resolve settings, optionally start file logging, seed
//! the roster and drive the Ratatui event loop until the user exits.
use anyhow::Context;
use attendance_roster::logging::init_logging;
use attendance_roster::{run_app, seed_roster, App, AppConfig, Roster};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::resolve().context("failed to resolve configuration")?;
    init_logging(config.log_path.as_deref());
    tracing::info!(export_dir = %config.export_dir.display(), "starting attendance roster");

    let (records, counter) = seed_roster();
    let mut app = App::new(Roster::new(records), counter, config);
    run_app(&mut app)
}
