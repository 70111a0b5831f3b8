//! Simulation results
//!
//! A simulation replays the registration race with a bucket's priorities
//! and reports which courses the student got.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Backend identifier of a simulation run
pub type TestId = i64;

/// Reason shown for a failed course when the backend gives none
pub const DEFAULT_FAIL_REASON: &str = "registration failed";

/// Overview of one simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSummary {
    pub test_id: TestId,
    pub test_date: NaiveDateTime,
    pub total_courses: u32,
    pub success_count: u32,
    pub fail_count: u32,
}

/// Outcome for one course of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResult {
    pub course_name: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub professor_name: String,
    #[serde(default)]
    pub credit: u32,
    pub is_success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_reason: Option<String>,
    pub priority: u32,
}

impl CourseResult {
    /// Returns the result message for display
    pub fn message(&self) -> &str {
        if self.is_success {
            "registered"
        } else {
            self.failed_reason.as_deref().unwrap_or(DEFAULT_FAIL_REASON)
        }
    }
}

/// Full report of one simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestDetail {
    pub test_id: TestId,
    pub test_date: NaiveDateTime,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub bucket_name: String,
    pub total_courses: u32,
    pub success_count: u32,
    pub fail_count: u32,
    #[serde(default)]
    pub planned_credit: u32,
    #[serde(default)]
    pub earned_credit: u32,
    #[serde(default)]
    pub courses: Vec<CourseResult>,
}

impl TestDetail {
    /// Success rate as a whole percentage, 0 when no courses were tried
    pub fn success_rate(&self) -> u32 {
        success_rate(self.success_count, self.total_courses)
    }
}

impl TestSummary {
    pub fn success_rate(&self) -> u32 {
        success_rate(self.success_count, self.total_courses)
    }

    /// Returns true if every course succeeded
    pub fn is_clean(&self) -> bool {
        self.fail_count == 0
    }
}

fn success_rate(success: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    // Half-up rounding of success * 100 / total
    (success * 200 + total) / (total * 2)
}
