//! Lecture search command

use anyhow::Result;

use super::app::Env;
use super::utils::truncate_str;
use crate::domain::{Lecture, LectureQuery, SearchField};
use crate::sync::LectureBrowser;

pub fn search(
    env: &Env,
    name: Option<String>,
    professor: Option<String>,
    grade: Option<u8>,
    cursor: Option<i64>,
    pages: u32,
) -> Result<()> {
    let output = &env.output;
    let (term, field) = match (name, professor) {
        (_, Some(professor)) => (professor, SearchField::Professor),
        (Some(name), None) => (name, SearchField::Name),
        (None, None) => (String::new(), SearchField::Name),
    };
    let query = LectureQuery::new(term.trim(), field, grade).at(cursor);
    output.verbose_ctx("lectures", &format!("query {:?}", query.params()));

    let session = env.load_session()?;
    let backend = env.backend(&session)?;
    let mut browser = LectureBrowser::with_query(backend.as_ref(), query);

    let source = browser.reset();
    for _ in 1..pages.max(1) {
        if browser.load_more() == 0 {
            break;
        }
    }

    if output.is_json() {
        output.data(&serde_json::json!({
            "lectures": browser.lectures(),
            "hasNext": browser.has_next(),
            "source": source,
        }));
        return Ok(());
    }

    output.source_notice(source);
    if browser.lectures().is_empty() {
        println!("No lectures found");
        return Ok(());
    }

    println!(
        "{:<8} {:<28} {:<14} {:>3} {:<10} SCHEDULE",
        "TEACH", "COURSE", "PROFESSOR", "CR", "TYPE"
    );
    println!("{}", "-".repeat(90));
    for lecture in browser.lectures() {
        print_lecture(lecture);
    }

    println!();
    println!("{} lecture(s)", browser.lectures().len());
    if let Some(next) = browser.next_cursor().filter(|_| browser.has_next()) {
        println!("More available: --cursor {}", next);
    }

    Ok(())
}

fn print_lecture(lecture: &Lecture) {
    println!(
        "{:<8} {:<28} {:<14} {:>3} {:<10} {}",
        lecture.teach_id,
        truncate_str(&lecture.course_name, 28),
        truncate_str(&lecture.professor_name, 14),
        lecture.credit,
        truncate_str(lecture.type_label(), 10),
        lecture.schedule_text()
    );
}
