//! Results view: run list, or the report of one run

use ratatui::{
    prelude::*,
    widgets::{List, ListItem, ListState, Paragraph},
};

use super::{highlight, panel};
use crate::cli::tui::app::App;
use crate::cli::utils::truncate_str;
use crate::domain::TestDetail;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    match app.results().detail() {
        Some(detail) => draw_detail(frame, detail, area),
        None => draw_list(frame, app, area),
    }
}

fn draw_list(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.results();

    let items: Vec<ListItem> = view
        .summaries()
        .iter()
        .map(|summary| {
            let rate_style = if summary.is_clean() {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Yellow)
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!(
                    "#{:<5} {}  {}/{} registered  ",
                    summary.test_id,
                    summary.test_date.format("%Y-%m-%d %H:%M"),
                    summary.success_count,
                    summary.total_courses
                )),
                Span::styled(format!("{}%", summary.success_rate()), rate_style),
            ]))
        })
        .collect();

    let title = if view.source().is_fixture() {
        "Simulation runs (demo)".to_string()
    } else {
        "Simulation runs".to_string()
    };

    if items.is_empty() {
        let empty = Paragraph::new("No simulation runs yet").block(panel(title, true));
        frame.render_widget(empty, area);
        return;
    }

    let list = List::new(items)
        .block(panel(title, true))
        .highlight_style(highlight(true))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.result_index()));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_detail(frame: &mut Frame, detail: &TestDetail, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Summary
            Constraint::Min(3),    // Courses
        ])
        .split(area);

    let summary = vec![
        format!("Bucket:  {}", detail.bucket_name),
        format!(
            "Result:  {}/{} registered ({}%), {} failed",
            detail.success_count,
            detail.total_courses,
            detail.success_rate(),
            detail.fail_count
        ),
        format!("Credits: {}/{}", detail.earned_credit, detail.planned_credit),
    ]
    .join("\n");
    let title = format!("Run #{} - {}", detail.test_id, detail.test_date.format("%Y-%m-%d %H:%M"));
    frame.render_widget(Paragraph::new(summary).block(panel(title, false)), chunks[0]);

    let mut courses: Vec<_> = detail.courses.iter().collect();
    courses.sort_by_key(|c| c.priority);

    let items: Vec<ListItem> = courses
        .into_iter()
        .map(|course| {
            let style = if course.is_success {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Red)
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!(
                    "{:>2}. {:<28} {:<12} ",
                    course.priority,
                    truncate_str(&course.course_name, 28),
                    truncate_str(&course.professor_name, 12)
                )),
                Span::styled(course.message().to_string(), style),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(panel("Courses (Esc to go back)".to_string(), true)), chunks[1]);
}
