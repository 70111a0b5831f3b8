//! Buckets view: bucket list + courses in priority order

use ratatui::{
    prelude::*,
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
};

use super::{highlight, panel};
use crate::cli::tui::app::{App, Focus};
use crate::cli::utils::{or_dash, truncate_str};

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30), // Buckets
            Constraint::Percentage(70), // Courses
        ])
        .split(area);

    draw_bucket_list(frame, app, chunks[0]);
    draw_elements(frame, app, chunks[1]);
}

fn draw_bucket_list(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus() == Focus::Buckets;
    let sync = app.buckets();

    let items: Vec<ListItem> = sync
        .buckets()
        .iter()
        .map(|bucket| {
            let marker = if sync.selected() == Some(bucket.id) { "*" } else { " " };
            let best = if bucket.is_best { " [best]" } else { "" };
            ListItem::new(format!("{}{}{}", marker, truncate_str(&bucket.name, 20), best))
        })
        .collect();

    let title = if sync.state().buckets_source.is_fixture() {
        "Buckets (demo)".to_string()
    } else {
        "Buckets".to_string()
    };

    if items.is_empty() {
        let empty = Paragraph::new("No buckets yet. Press n to create one.")
            .block(panel(title, focused))
            .wrap(Wrap { trim: true });
        frame.render_widget(empty, area);
        return;
    }

    let list = List::new(items)
        .block(panel(title, focused))
        .highlight_style(highlight(focused))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.bucket_index()));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_elements(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus() == Focus::Elements;
    let sync = app.buckets();

    let name = sync
        .selected_bucket()
        .map(|b| b.name.clone())
        .unwrap_or_else(|| "no bucket".to_string());
    let mut title = format!("Courses - {}", name);
    if sync.is_dirty() {
        title.push_str(" [unsaved]");
    }
    if sync.state().elements_source.is_fixture() {
        title.push_str(" (demo)");
    }

    if sync.selected().is_none() {
        let empty = Paragraph::new("Select a bucket with Enter.").block(panel(title, focused));
        frame.render_widget(empty, area);
        return;
    }

    if sync.elements().is_empty() {
        let empty = Paragraph::new("This bucket is empty. Add lectures from the Lectures view (2, then a).")
            .block(panel(title, focused))
            .wrap(Wrap { trim: true });
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = sync
        .elements()
        .iter()
        .map(|element| {
            let line = Line::from(vec![
                Span::styled(format!("{:>2}. ", element.priority), Style::default().fg(Color::Yellow)),
                Span::raw(format!(
                    "{:<28} {:<12} ",
                    truncate_str(&element.course_name, 28),
                    truncate_str(&element.professor_name, 12)
                )),
                Span::styled(
                    if element.is_major() { "major " } else { "      " },
                    Style::default().fg(Color::Magenta),
                ),
                Span::styled(
                    format!("alt: {}", or_dash(element.alternate_label())),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(panel(title, focused))
        .highlight_style(highlight(focused))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.element_index()));
    frame.render_stateful_widget(list, area, &mut state);
}
