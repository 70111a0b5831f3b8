//! Simulation results command

use anyhow::Result;

use super::app::Env;
use super::output::Output;
use super::utils::truncate_str;
use crate::domain::{TestDetail, TestId, TestSummary};
use crate::sync::ResultsView;

pub fn show(env: &Env, test_id: Option<TestId>) -> Result<()> {
    let session = env.load_session()?;
    let backend = env.backend(&session)?;
    let mut view = ResultsView::new(backend.as_ref());

    match test_id {
        Some(id) => {
            let source = view.open(id);
            if let Some(detail) = view.detail() {
                if env.output.is_json() {
                    env.output.data(&serde_json::json!({
                        "detail": detail,
                        "successRate": detail.success_rate(),
                        "source": source,
                    }));
                } else {
                    env.output.source_notice(source);
                    print_detail(detail);
                }
            }
        }
        None => {
            let source = view.fetch_summaries();
            if env.output.is_json() {
                env.output.data(&serde_json::json!({
                    "results": view.summaries(),
                    "source": source,
                }));
            } else {
                env.output.source_notice(source);
                print_summaries(&env.output, view.summaries());
            }
        }
    }

    Ok(())
}

fn print_summaries(output: &Output, summaries: &[TestSummary]) {
    println!(
        "{:<6} {:<17} {:>7} {:>7} {:>6} {:>6}",
        "ID", "DATE", "COURSES", "SUCCESS", "FAIL", "RATE"
    );
    println!("{}", "-".repeat(55));
    for summary in summaries {
        println!(
            "{:<6} {:<17} {:>7} {:>7} {:>6} {:>5}%",
            summary.test_id,
            summary.test_date.format("%Y-%m-%d %H:%M"),
            summary.total_courses,
            summary.success_count,
            summary.fail_count,
            summary.success_rate()
        );
    }
    output.verbose_ctx("results", &format!("{} run(s)", summaries.len()));
}

fn print_detail(detail: &TestDetail) {
    println!("Run {} ({})", detail.test_id, detail.test_date.format("%Y-%m-%d %H:%M"));
    if !detail.bucket_name.is_empty() {
        println!("Bucket:   {}", detail.bucket_name);
    }
    println!(
        "Result:   {}/{} registered ({}%), {} failed",
        detail.success_count,
        detail.total_courses,
        detail.success_rate(),
        detail.fail_count
    );
    println!("Credits:  {}/{}", detail.earned_credit, detail.planned_credit);
    println!();

    let mut courses: Vec<_> = detail.courses.iter().collect();
    courses.sort_by_key(|c| c.priority);

    println!(
        "{:>3} {:<28} {:<14} {:>3}  RESULT",
        "#", "COURSE", "PROFESSOR", "CR"
    );
    println!("{}", "-".repeat(70));
    for course in courses {
        println!(
            "{:>3} {:<28} {:<14} {:>3}  {}",
            course.priority,
            truncate_str(&course.course_name, 28),
            truncate_str(&course.professor_name, 14),
            course.credit,
            course.message()
        );
    }
}
