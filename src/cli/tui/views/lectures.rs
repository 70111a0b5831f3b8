//! Lectures view: search box + paginated results

use ratatui::{
    prelude::*,
    widgets::{List, ListItem, ListState, Paragraph},
};

use super::{highlight, panel};
use crate::cli::tui::app::{App, InputMode};
use crate::cli::utils::truncate_str;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search box
            Constraint::Min(3),    // Results
        ])
        .split(area);

    draw_search(frame, app, chunks[0]);
    draw_results(frame, app, chunks[1]);
}

fn draw_search(frame: &mut Frame, app: &App, area: Rect) {
    let browser = app.lectures();
    let query = browser.query();
    let searching = *app.input_mode() == InputMode::Search;

    let grade = query
        .grade
        .map_or_else(|| "all".to_string(), |g| g.to_string());
    let text = format!("{}   grade: {}", browser.input(), grade);

    let search = Paragraph::new(text).block(panel(format!("Search by {}", query.field.label()), searching));
    frame.render_widget(search, area);
}

fn draw_results(frame: &mut Frame, app: &App, area: Rect) {
    let browser = app.lectures();

    let mut title = format!("Lectures ({})", browser.lectures().len());
    if browser.has_next() {
        title.push_str(" - m for more");
    }
    if browser.source().is_fixture() {
        title.push_str(" (demo)");
    }

    if browser.lectures().is_empty() {
        let empty = Paragraph::new("No lectures found").block(panel(title, true));
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = browser
        .lectures()
        .iter()
        .map(|lecture| {
            let type_style = if lecture.is_major() {
                Style::default().fg(Color::Magenta)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!(
                    "{:<6} {:<28} {:<12} {}cr ",
                    lecture.teach_id,
                    truncate_str(&lecture.course_name, 28),
                    truncate_str(&lecture.professor_name, 12),
                    lecture.credit
                )),
                Span::styled(format!("{:<8} ", truncate_str(lecture.type_label(), 8)), type_style),
                Span::raw(lecture.schedule_text()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(panel(title, true))
        .highlight_style(highlight(true))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.lecture_index()));
    frame.render_stateful_widget(list, area, &mut state);
}
