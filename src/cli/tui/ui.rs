//! Terminal initialization and restoration

use std::io::{self, stdout, Stdout};

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

pub type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

/// Switches to raw mode on the alternate screen
pub fn init_terminal() -> Result<Terminal> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }
    let terminal = ratatui::Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

/// Leaves the alternate screen and raw mode
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
