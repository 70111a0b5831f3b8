//! Domain models for regsim
//!
//! Records exchanged with the registration backend and the pure logic
//! built on them, without any I/O.

mod bucket;
mod reorder;
mod lecture;
mod student;
mod simulation;
pub mod fixtures;

pub use bucket::{
    sort_by_priority, validate_bucket_name, Bucket, BucketElement, BucketId, ElementId,
    PriorityUpdate, TeachId, ValidationError,
};
pub use reorder::{can_move, is_dense, renumber, reorder, Direction};
pub use lecture::{is_major_type, Lecture, LecturePage, LectureQuery, Schedule, SearchField, PAGE_SIZE};
pub use student::{
    College, Department, LoginRequest, LoginResult, OnboardingRequest, SignUpRequest, Student,
    StudentId, STUDENT_NUMBER_LEN,
};
pub use simulation::{CourseResult, TestDetail, TestId, TestSummary, DEFAULT_FAIL_REASON};
