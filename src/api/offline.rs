//! Offline backend used for demos and `--offline`

use super::{ApiError, Backend};
use crate::domain::{
    Bucket, BucketElement, BucketId, ElementId, LecturePage, LectureQuery, LoginRequest,
    LoginResult, OnboardingRequest, PriorityUpdate, SignUpRequest, Student, StudentId, TeachId,
    TestDetail, TestId, TestSummary,
};

/// A backend where every call fails with [`ApiError::Offline`].
///
/// Read paths then serve fixtures and write paths report the failure.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineBackend;

impl Backend for OfflineBackend {
    fn login(&self, _request: &LoginRequest) -> Result<LoginResult, ApiError> {
        Err(ApiError::Offline)
    }

    fn student(&self, _id: StudentId) -> Result<Student, ApiError> {
        Err(ApiError::Offline)
    }

    fn sign_up(&self, _request: &SignUpRequest) -> Result<(), ApiError> {
        Err(ApiError::Offline)
    }

    fn onboard(&self, _id: StudentId, _request: &OnboardingRequest) -> Result<(), ApiError> {
        Err(ApiError::Offline)
    }

    fn update_reaction_time(&self, _avg_ms: u32) -> Result<(), ApiError> {
        Err(ApiError::Offline)
    }

    fn send_verification(&self, _email: &str) -> Result<(), ApiError> {
        Err(ApiError::Offline)
    }

    fn verify_email(&self, _email: &str, _code: &str) -> Result<(), ApiError> {
        Err(ApiError::Offline)
    }

    fn lectures(&self, _query: &LectureQuery) -> Result<LecturePage, ApiError> {
        Err(ApiError::Offline)
    }

    fn buckets(&self) -> Result<Vec<Bucket>, ApiError> {
        Err(ApiError::Offline)
    }

    fn create_bucket(&self, _name: &str) -> Result<(), ApiError> {
        Err(ApiError::Offline)
    }

    fn select_best(&self, _bucket: BucketId) -> Result<(), ApiError> {
        Err(ApiError::Offline)
    }

    fn elements(&self, _bucket: BucketId) -> Result<Vec<BucketElement>, ApiError> {
        Err(ApiError::Offline)
    }

    fn update_priorities(&self, _bucket: BucketId, _updates: &[PriorityUpdate]) -> Result<(), ApiError> {
        Err(ApiError::Offline)
    }

    fn add_element(&self, _bucket: BucketId, _teach_id: TeachId) -> Result<(), ApiError> {
        Err(ApiError::Offline)
    }

    fn set_alternate(&self, _bucket: BucketId, _element: ElementId, _alternate: TeachId) -> Result<(), ApiError> {
        Err(ApiError::Offline)
    }

    fn test_results(&self) -> Result<Vec<TestSummary>, ApiError> {
        Err(ApiError::Offline)
    }

    fn test_result(&self, _id: TestId) -> Result<TestDetail, ApiError> {
        Err(ApiError::Offline)
    }
}
