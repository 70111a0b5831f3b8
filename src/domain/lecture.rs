//! Lecture listings
//!
//! Lectures are course offerings that can be added to a bucket. The
//! backend pages them with a cursor.

use serde::{Deserialize, Serialize};

use super::bucket::TeachId;

/// Number of lectures requested per page
pub const PAGE_SIZE: u32 = 20;

/// Markers that identify a major course type
const MAJOR_MARKERS: &[&str] = &["전공", "major"];

/// Returns true if the course type denotes a major course
pub fn is_major_type(major_type: &str) -> bool {
    let lower = major_type.to_lowercase();
    MAJOR_MARKERS.iter().any(|m| lower.contains(m))
}

/// One meeting slot of a lecture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub day: String,
    pub start_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default)]
    pub classroom: String,
}

/// A course offering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lecture {
    pub teach_id: TeachId,
    pub course_name: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub professor_name: String,
    #[serde(default)]
    pub credit: u32,
    #[serde(default)]
    pub target_grade: Option<u8>,
    #[serde(rename = "type", default)]
    pub major_type: Option<String>,
    #[serde(default)]
    pub schedules: Vec<Schedule>,
}

impl Lecture {
    /// Formats the schedule list for display
    pub fn schedule_text(&self) -> String {
        if self.schedules.is_empty() {
            return "TBA".to_string();
        }
        self.schedules
            .iter()
            .map(|s| format!("{} {} ({})", s.day, s.start_time, s.classroom))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Returns the course type label, "other" when unknown
    pub fn type_label(&self) -> &str {
        self.major_type.as_deref().unwrap_or("other")
    }

    /// Returns true if this is a major course
    pub fn is_major(&self) -> bool {
        self.major_type.as_deref().is_some_and(is_major_type)
    }
}

/// One page of lecture search results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LecturePage {
    #[serde(default)]
    pub lectures: Vec<Lecture>,
    #[serde(default)]
    pub next_cursor: Option<i64>,
    #[serde(default)]
    pub has_next: bool,
}

/// Which field a search term applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    #[default]
    Name,
    Professor,
}

impl SearchField {
    pub fn toggle(self) -> Self {
        match self {
            SearchField::Name => SearchField::Professor,
            SearchField::Professor => SearchField::Name,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SearchField::Name => "course",
            SearchField::Professor => "professor",
        }
    }
}

/// Filters for a lecture search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LectureQuery {
    pub term: String,
    pub field: SearchField,
    pub grade: Option<u8>,
    pub cursor: Option<i64>,
    pub size: u32,
}

impl LectureQuery {
    pub fn new(term: impl Into<String>, field: SearchField, grade: Option<u8>) -> Self {
        Self {
            term: term.into(),
            field,
            grade,
            cursor: None,
            size: PAGE_SIZE,
        }
    }

    /// Returns this query positioned at the given cursor
    pub fn at(&self, cursor: Option<i64>) -> Self {
        Self {
            cursor,
            ..self.clone()
        }
    }

    /// Builds the query-string pairs sent to the backend
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(cursor) = self.cursor {
            params.push(("cursorId", cursor.to_string()));
        }
        params.push(("size", self.size.to_string()));

        let term = self.term.trim();
        if !term.is_empty() {
            let key = match self.field {
                SearchField::Name => "name",
                SearchField::Professor => "professor",
            };
            params.push((key, term.to_string()));
        }

        if let Some(grade) = self.grade {
            params.push(("grade", grade.to_string()));
        }
        params
    }

    /// Returns true if the lecture satisfies the filters (used offline)
    pub fn matches(&self, lecture: &Lecture) -> bool {
        let term = self.term.trim().to_lowercase();
        let term_ok = term.is_empty()
            || match self.field {
                SearchField::Name => lecture.course_name.to_lowercase().contains(&term),
                SearchField::Professor => lecture.professor_name.to_lowercase().contains(&term),
            };
        let grade_ok = self.grade.is_none() || self.grade == lecture.target_grade;
        term_ok && grade_ok
    }
}
