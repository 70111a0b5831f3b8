//! Reaction view: signal panel + recorded samples

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use super::panel;
use crate::cli::tui::app::App;
use crate::sync::reaction::{Phase, ROUNDS};

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Signal
            Constraint::Length(3), // Samples
        ])
        .split(area);

    let test = app.reaction();
    let (text, color) = match test.phase() {
        Phase::Idle => ("Press Space to start. Click as soon as the panel turns green.".to_string(), Color::Reset),
        Phase::Waiting => (format!("Wait... (round {}/{})", test.samples().len() + 1, ROUNDS), Color::Red),
        Phase::Armed { .. } => ("CLICK!".to_string(), Color::Green),
        Phase::Finished { average_ms, persisted } => (
            format!(
                "Average: {} ms{}\n\nPress Space to try again.",
                average_ms,
                if persisted { " (saved)" } else { " (not saved)" }
            ),
            Color::Blue,
        ),
    };

    let signal = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().bg(color).add_modifier(Modifier::BOLD))
        .block(Block::default().title("Reaction test").borders(Borders::ALL));
    frame.render_widget(signal, chunks[0]);

    let samples = test
        .samples()
        .iter()
        .enumerate()
        .map(|(i, ms)| format!("{}: {} ms", i + 1, ms))
        .collect::<Vec<_>>()
        .join("   ");
    frame.render_widget(Paragraph::new(samples).block(panel("Samples".to_string(), false)), chunks[1]);
}
