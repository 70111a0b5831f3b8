//! # Backend API
//!
//! The registration backend is an external REST service. Everything the
//! client needs from it goes through the [`Backend`] trait, so views and
//! tests can swap the HTTP implementation for an offline or fake one.
//!
//! ## Response Envelope
//!
//! Every endpoint answers with `{ isSuccess?, message?, result? }`:
//!
//! | Call kind | Success when |
//! |-----------|--------------|
//! | Read | 2xx status and `result` present |
//! | Write | 2xx status and `isSuccess` is not `false` |
//!
//! ## Implementations
//!
//! - [`HttpBackend`] - blocking `reqwest` client with optional bearer token
//! - [`OfflineBackend`] - fails every call, forcing fixture fallbacks

mod http;
mod offline;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{
    Bucket, BucketElement, BucketId, ElementId, LecturePage, LectureQuery, LoginRequest,
    LoginResult, OnboardingRequest, PriorityUpdate, SignUpRequest, Student, StudentId, TeachId,
    TestDetail, TestId, TestSummary,
};

pub use http::HttpBackend;
pub use offline::OfflineBackend;

/// Failure kinds at the client boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Backend unreachable: {0}")]
    Transport(String),

    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Backend rejected the request: {0}")]
    Rejected(String),

    #[error("Backend response has no result ({})", .message.as_deref().unwrap_or("no message"))]
    MissingResult { message: Option<String> },

    #[error("Failed to decode backend response: {0}")]
    Decode(String),

    #[error("Offline mode: backend calls are disabled")]
    Offline,
}

impl ApiError {
    /// Returns true if the error came from the network rather than the backend
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::Offline)
    }
}

/// Response envelope shared by all endpoints
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    #[serde(default)]
    pub is_success: Option<bool>,

    #[serde(default)]
    pub message: Option<String>,

    pub result: Option<T>,
}

impl<T> Envelope<T> {
    /// An envelope for an empty response body
    pub fn empty() -> Self {
        Self {
            is_success: None,
            message: None,
            result: None,
        }
    }

    /// Unwraps the result of a read call
    pub fn into_result(self) -> Result<T, ApiError> {
        if self.is_success == Some(false) {
            return Err(ApiError::Rejected(self.message.unwrap_or_default()));
        }
        self.result
            .ok_or(ApiError::MissingResult { message: self.message })
    }

    /// Checks the outcome of a write call
    pub fn check(self) -> Result<(), ApiError> {
        match self.is_success {
            Some(false) => Err(ApiError::Rejected(self.message.unwrap_or_default())),
            _ => Ok(()),
        }
    }
}

/// Operations offered by the registration backend
pub trait Backend {
    // Student account
    fn login(&self, request: &LoginRequest) -> Result<LoginResult, ApiError>;
    fn student(&self, id: StudentId) -> Result<Student, ApiError>;
    fn sign_up(&self, request: &SignUpRequest) -> Result<(), ApiError>;
    fn onboard(&self, id: StudentId, request: &OnboardingRequest) -> Result<(), ApiError>;
    fn update_reaction_time(&self, avg_ms: u32) -> Result<(), ApiError>;
    fn send_verification(&self, email: &str) -> Result<(), ApiError>;
    fn verify_email(&self, email: &str, code: &str) -> Result<(), ApiError>;

    // Lectures
    fn lectures(&self, query: &LectureQuery) -> Result<LecturePage, ApiError>;

    // Buckets
    fn buckets(&self) -> Result<Vec<Bucket>, ApiError>;
    fn create_bucket(&self, name: &str) -> Result<(), ApiError>;
    fn select_best(&self, bucket: BucketId) -> Result<(), ApiError>;
    fn elements(&self, bucket: BucketId) -> Result<Vec<BucketElement>, ApiError>;
    fn update_priorities(&self, bucket: BucketId, updates: &[PriorityUpdate]) -> Result<(), ApiError>;
    fn add_element(&self, bucket: BucketId, teach_id: TeachId) -> Result<(), ApiError>;
    fn set_alternate(&self, bucket: BucketId, element: ElementId, alternate: TeachId) -> Result<(), ApiError>;

    // Simulation results
    fn test_results(&self) -> Result<Vec<TestSummary>, ApiError>;
    fn test_result(&self, id: TestId) -> Result<TestDetail, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_requires_result() {
        let env: Envelope<u32> = serde_json::from_str(r#"{"isSuccess":true,"message":"ok"}"#).unwrap();
        assert_eq!(
            env.into_result(),
            Err(ApiError::MissingResult { message: Some("ok".to_string()) })
        );

        let env: Envelope<u32> = serde_json::from_str(r#"{"result":7}"#).unwrap();
        assert_eq!(env.into_result(), Ok(7));
    }

    #[test]
    fn explicit_failure_is_rejected() {
        let env: Envelope<u32> =
            serde_json::from_str(r#"{"isSuccess":false,"message":"duplicate","result":1}"#).unwrap();
        assert_eq!(env.into_result(), Err(ApiError::Rejected("duplicate".to_string())));

        let env: Envelope<serde_json::Value> =
            serde_json::from_str(r#"{"isSuccess":false,"message":"nope"}"#).unwrap();
        assert!(env.check().is_err());
    }

    #[test]
    fn write_accepts_missing_result() {
        let env: Envelope<serde_json::Value> = serde_json::from_str(r#"{"isSuccess":true}"#).unwrap();
        assert!(env.check().is_ok());
        assert!(Envelope::<serde_json::Value>::empty().check().is_ok());
    }

    #[test]
    fn missing_result_message() {
        let err = ApiError::MissingResult { message: None };
        assert_eq!(err.to_string(), "Backend response has no result (no message)");
        assert!(!err.is_transport());
        assert!(ApiError::Offline.is_transport());
    }
}
