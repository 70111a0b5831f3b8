//! Screen layouts: a tab bar, the active view and a status bar

pub mod buckets;
pub mod lectures;
pub mod reaction;
pub mod results;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Tabs},
};

use super::app::{App, InputMode};
use super::View;

/// Draw the whole screen
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(5),    // Active view
            Constraint::Length(3), // Status bar
        ])
        .split(frame.area());

    draw_tabs(frame, app, chunks[0]);
    match app.view() {
        View::Buckets => buckets::draw(frame, app, chunks[1]),
        View::Lectures => lectures::draw(frame, app, chunks[1]),
        View::Results => results::draw(frame, app, chunks[1]),
        View::Reaction => reaction::draw(frame, app, chunks[1]),
    }
    draw_status_bar(frame, app, chunks[2]);
}

/// Bordered panel, cyan when focused
pub fn panel(title: String, focused: bool) -> Block<'static> {
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(style)
}

/// Highlight style for the selected list row
pub fn highlight(focused: bool) -> Style {
    Style::default()
        .bg(if focused { Color::DarkGray } else { Color::Black })
        .add_modifier(Modifier::BOLD)
}

fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<String> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| format!("{}:{}", i + 1, view.title()))
        .collect();
    let selected = View::ALL.iter().position(|v| *v == app.view()).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(Block::default().title("regsim").borders(Borders::ALL))
        .select(selected)
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    frame.render_widget(tabs, area);
}

fn key_help(view: View) -> &'static str {
    match view {
        View::Buckets => "[Tab]panel [Enter]open [K/J]move [s]ave [d]iscard [b]est [n]ew [r]efresh [q]uit",
        View::Lectures => "[/]search [Tab]name/professor [g]rade [m]ore [a]dd to bucket [q]uit",
        View::Results => "[Enter]open [Esc]back [r]efresh [q]uit",
        View::Reaction => "[Space]start/click [Esc]cancel [q]uit",
    }
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (content, style) = match app.input_mode() {
        InputMode::Normal => (
            app.status_message().unwrap_or(key_help(app.view())).to_string(),
            Style::default(),
        ),
        InputMode::Search => (
            format!(
                "Search {}: {}_",
                app.lectures().query().field.label(),
                app.lectures().input()
            ),
            Style::default().fg(Color::Yellow),
        ),
        InputMode::NewBucket(name) => (
            format!("New bucket: {}_", name),
            Style::default().fg(Color::Green),
        ),
    };

    let paragraph = Paragraph::new(content)
        .style(style)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}
