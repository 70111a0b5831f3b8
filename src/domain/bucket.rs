//! Bucket domain model
//!
//! A bucket is a named, student-owned set of course selections. Each
//! element carries a 1-based priority rank and an optional alternate
//! lecture used when the primary one fills up.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Backend identifier of a bucket
pub type BucketId = i64;

/// Backend identifier of a bucket element
pub type ElementId = i64;

/// Backend identifier of a lecture offering
pub type TeachId = i64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Bucket name cannot be empty")]
    EmptyBucketName,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Student number must be 8 digits, got '{0}'")]
    InvalidStudentNumber(String),

    #[error("Grade must be between 1 and 4, got {0}")]
    InvalidGrade(u8),

    #[error("Department {department} does not belong to college {college}")]
    DepartmentMismatch { college: i64, department: i64 },
}

/// Summary of a bucket as listed by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    #[serde(rename = "bucketId")]
    pub id: BucketId,

    pub name: String,

    /// Whether this is the bucket used for simulation runs.
    /// Only the backend decides which bucket is best.
    #[serde(default)]
    pub is_best: bool,

    pub created_at: DateTime<Utc>,
}

/// One course entry inside a bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketElement {
    #[serde(rename = "bucketElementId", alias = "elementId")]
    pub element_id: ElementId,

    pub teach_id: TeachId,

    /// 1-based dense rank within the bucket
    pub priority: u32,

    #[serde(default)]
    pub course_name: String,

    #[serde(default)]
    pub professor_name: String,

    #[serde(default)]
    pub time_place: String,

    #[serde(default)]
    pub major_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_teach_id: Option<TeachId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_subject_name: Option<String>,
}

impl BucketElement {
    /// Returns a display label for the alternate lecture, if any
    pub fn alternate_label(&self) -> Option<String> {
        match (&self.alternate_subject_name, self.alternate_teach_id) {
            (Some(name), _) => Some(name.clone()),
            (None, Some(id)) => Some(format!("#{}", id)),
            (None, None) => None,
        }
    }

    /// Returns true if the element is a major course
    pub fn is_major(&self) -> bool {
        super::lecture::is_major_type(&self.major_type)
    }
}

/// One entry of a bulk priority update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityUpdate {
    pub element_id: ElementId,
    pub priority: u32,
}

impl From<&BucketElement> for PriorityUpdate {
    fn from(element: &BucketElement) -> Self {
        Self {
            element_id: element.element_id,
            priority: element.priority,
        }
    }
}

/// Validates and normalizes a new bucket name
pub fn validate_bucket_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyBucketName);
    }
    Ok(trimmed.to_string())
}

/// Sorts elements ascending by priority
pub fn sort_by_priority(elements: &mut [BucketElement]) {
    elements.sort_by_key(|e| e.priority);
}
