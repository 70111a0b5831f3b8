//! Interactive terminal UI
//!
//! Bucket management, lecture search, simulation results and the
//! reaction-time test, drawn with ratatui.

mod app;
mod event;
mod ui;
mod views;

use std::panic::{self, AssertUnwindSafe};

use anyhow::{anyhow, Result};

use super::app::Env;
use app::App;
use event::EventHandler;

/// Event thread tick in milliseconds
const TICK_RATE_MS: u64 = 250;

/// Top-level TUI screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum View {
    #[default]
    Buckets,
    Lectures,
    Results,
    Reaction,
}

impl View {
    pub const ALL: [View; 4] = [View::Buckets, View::Lectures, View::Results, View::Reaction];

    pub fn title(self) -> &'static str {
        match self {
            View::Buckets => "Buckets",
            View::Lectures => "Lectures",
            View::Results => "Results",
            View::Reaction => "Reaction",
        }
    }

    /// Maps the number keys 1-4 to views
    pub fn from_key(c: char) -> Option<Self> {
        let index = c.to_digit(10)?.checked_sub(1)? as usize;
        View::ALL.get(index).copied()
    }
}

/// Launch the TUI
pub fn run(env: &Env, view: View) -> Result<()> {
    env.output.verbose_ctx("tui", "Initializing TUI application");

    let mut session = env.load_session()?;
    let backend = env.backend(&session)?;

    let mut terminal = ui::init_terminal()?;

    let mut app = App::new(backend.as_ref(), std::mem::take(&mut session.buckets), view);
    let event_handler = EventHandler::new(TICK_RATE_MS);

    // Restore the terminal even if the app panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        app.run(&mut terminal, event_handler)
    }));

    let restore_result = ui::restore_terminal();

    // Keep an unsaved reorder for the next command
    session.buckets = app.into_bucket_state();
    env.save_session(&session)?;

    match result {
        Ok(inner_result) => {
            restore_result?;
            inner_result
        }
        Err(panic_payload) => {
            let _ = restore_result;
            if let Some(s) = panic_payload.downcast_ref::<&str>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else {
                Err(anyhow!("TUI panicked with unknown error"))
            }
        }
    }
}
