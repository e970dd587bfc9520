//! Ratatui front-end: a single roster table with modal dialogs for adding,
//! removing, searching and importing.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
