//! Bundled demo data
//!
//! Read paths fall back to these records when the backend is unreachable
//! or answers without a result, so the client stays usable offline.
//! The college/department catalog is also used to validate onboarding.

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};

use super::bucket::{Bucket, BucketElement, BucketId};
use super::lecture::{Lecture, LecturePage, LectureQuery, Schedule};
use super::simulation::{CourseResult, TestDetail, TestId, TestSummary};
use super::student::{College, Department};

/// Bucket whose fixture elements are non-empty
pub const DEMO_BUCKET_ID: BucketId = 1;

const COLLEGES: &[College] = &[
    College { id: 1, name: "College of IT" },
    College { id: 2, name: "College of Engineering" },
    College { id: 3, name: "College of Business" },
    College { id: 4, name: "College of Humanities" },
];

const DEPARTMENTS: &[Department] = &[
    Department { id: 1, college_id: 1, name: "Software" },
    Department { id: 2, college_id: 1, name: "AI Convergence" },
    Department { id: 3, college_id: 1, name: "Computer Science" },
    Department { id: 4, college_id: 1, name: "Global Media" },
    Department { id: 5, college_id: 1, name: "Electronic Engineering" },
    Department { id: 6, college_id: 2, name: "Mechanical Engineering" },
    Department { id: 7, college_id: 2, name: "Electrical Engineering" },
    Department { id: 8, college_id: 2, name: "Industrial Systems" },
    Department { id: 9, college_id: 3, name: "Business Administration" },
    Department { id: 10, college_id: 3, name: "International Trade" },
    Department { id: 11, college_id: 4, name: "Korean Literature" },
    Department { id: 12, college_id: 4, name: "English Literature" },
];

pub fn colleges() -> &'static [College] {
    COLLEGES
}

pub fn departments() -> &'static [Department] {
    DEPARTMENTS
}

/// Departments belonging to a college
pub fn departments_of(college_id: i64) -> impl Iterator<Item = &'static Department> {
    DEPARTMENTS.iter().filter(move |d| d.college_id == college_id)
}

pub fn department(id: i64) -> Option<&'static Department> {
    DEPARTMENTS.iter().find(|d| d.id == id)
}

fn naive(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, 0))
        .unwrap_or_default()
}

pub fn buckets() -> Vec<Bucket> {
    vec![
        Bucket {
            id: DEMO_BUCKET_ID,
            name: "Default bucket".to_string(),
            is_best: true,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).single().unwrap_or_default(),
        },
        Bucket {
            id: 2,
            name: "Plan B".to_string(),
            is_best: false,
            created_at: Utc.with_ymd_and_hms(2024, 3, 2, 15, 30, 0).single().unwrap_or_default(),
        },
    ]
}

fn element(id: i64, teach_id: i64, priority: u32, major: &str, course: &str, professor: &str, time_place: &str) -> BucketElement {
    BucketElement {
        element_id: id,
        teach_id,
        priority,
        course_name: course.to_string(),
        professor_name: professor.to_string(),
        time_place: time_place.to_string(),
        major_type: major.to_string(),
        alternate_teach_id: None,
        alternate_subject_name: None,
    }
}

/// Elements of a fixture bucket; only the demo bucket has any
pub fn elements(bucket_id: BucketId) -> Vec<BucketElement> {
    if bucket_id != DEMO_BUCKET_ID {
        return Vec::new();
    }

    let mut first = element(101, 2001, 1, "Major", "Data Structures", "Prof. Kim", "Mon 10:30-12:00 (IT-101)");
    first.alternate_teach_id = Some(2005);
    first.alternate_subject_name = Some("Algorithms".to_string());

    vec![
        first,
        element(102, 2002, 2, "General", "Ethics in Modern Society", "Prof. Lee", "Tue 13:30-15:00 (Truth-204)"),
        element(103, 2003, 3, "Major", "Operating Systems", "Prof. Park", "Wed 09:00-10:30 (IT-103)"),
    ]
}

fn lecture(teach_id: i64, course: &str, professor: &str, grade: u8, major: &str, day: &str, start: &str, end: &str, room: &str) -> Lecture {
    Lecture {
        teach_id,
        course_name: course.to_string(),
        class_name: "A".to_string(),
        professor_name: professor.to_string(),
        credit: 3,
        target_grade: Some(grade),
        major_type: Some(major.to_string()),
        schedules: vec![Schedule {
            day: day.to_string(),
            start_time: start.to_string(),
            end_time: Some(end.to_string()),
            classroom: room.to_string(),
        }],
    }
}

pub fn lectures() -> Vec<Lecture> {
    vec![
        lecture(2001, "Data Structures", "Prof. Kim", 2, "Major Required", "Mon", "10:30", "12:00", "IT-101"),
        lecture(2002, "Ethics in Modern Society", "Prof. Lee", 1, "General Elective", "Tue", "13:30", "15:00", "Truth-204"),
        lecture(2003, "Operating Systems", "Prof. Park", 3, "Major Elective", "Wed", "09:00", "10:30", "IT-103"),
        lecture(2004, "Databases", "Prof. Choi", 3, "Major Elective", "Thu", "15:00", "16:30", "IT-104"),
        lecture(2005, "Algorithms", "Prof. Lee", 2, "Major Required", "Tue", "10:30", "12:00", "IT-102"),
        lecture(2006, "Calculus I", "Prof. Jung", 1, "General Required", "Fri", "09:00", "10:30", "Science-201"),
    ]
}

/// A single fixture page containing the lectures that match `query`
pub fn lecture_page(query: &LectureQuery) -> LecturePage {
    LecturePage {
        lectures: lectures().into_iter().filter(|l| query.matches(l)).collect(),
        next_cursor: None,
        has_next: false,
    }
}

pub fn test_summaries() -> Vec<TestSummary> {
    vec![
        TestSummary {
            test_id: 1,
            test_date: naive(2024, 3, 15, 10, 0),
            total_courses: 6,
            success_count: 5,
            fail_count: 1,
        },
        TestSummary {
            test_id: 2,
            test_date: naive(2024, 3, 16, 14, 30),
            total_courses: 6,
            success_count: 6,
            fail_count: 0,
        },
    ]
}

fn course(priority: u32, name: &str, class_name: &str, professor: &str, failed: Option<&str>) -> CourseResult {
    CourseResult {
        course_name: name.to_string(),
        class_name: class_name.to_string(),
        professor_name: professor.to_string(),
        credit: 3,
        is_success: failed.is_none(),
        failed_reason: failed.map(str::to_string),
        priority,
    }
}

/// The fixture report, stamped with the requested test id
pub fn test_detail(test_id: TestId) -> TestDetail {
    TestDetail {
        test_id,
        test_date: naive(2024, 3, 15, 10, 0),
        student_name: "Kim Student".to_string(),
        bucket_name: "Default bucket".to_string(),
        total_courses: 6,
        success_count: 5,
        fail_count: 1,
        planned_credit: 18,
        earned_credit: 15,
        courses: vec![
            course(1, "Data Structures", "A", "Prof. Kim", None),
            course(2, "Algorithms", "A", "Prof. Lee", None),
            course(3, "Operating Systems", "A", "Prof. Park", None),
            course(4, "Databases", "A", "Prof. Choi", Some("Class full")),
            course(5, "Computer Networks", "A", "Prof. Jung", None),
            course(6, "Calculus I", "B", "Prof. Math", None),
        ],
    }
}
