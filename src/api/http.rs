//! Blocking HTTP implementation of the backend

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::{ApiError, Backend, Envelope};
use crate::domain::{
    Bucket, BucketElement, BucketId, ElementId, LecturePage, LectureQuery, LoginRequest,
    LoginResult, OnboardingRequest, PriorityUpdate, SignUpRequest, Student, StudentId, TeachId,
    TestDetail, TestId, TestSummary,
};

/// Talks to the registration backend over HTTP
pub struct HttpBackend {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBackend {
    /// Creates a client for the backend at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Sends `token` as a bearer token on every request
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Returns the backend base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.get(self.url(path)))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.post(self.url(path)))
    }

    fn patch(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.patch(self.url(path)))
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Envelope<T>, ApiError> {
        let response = request
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), url = %response.url(), "backend response");

        let body = response
            .text()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            // Error bodies usually still carry the envelope message
            let message = serde_json::from_str::<Envelope<Value>>(&body)
                .ok()
                .and_then(|env| env.message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        if body.trim().is_empty() {
            return Ok(Envelope::empty());
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Performs a read call and unwraps its result
    fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        self.send::<T>(request)?.into_result()
    }

    /// Performs a write call and checks its outcome
    fn execute(&self, request: RequestBuilder) -> Result<(), ApiError> {
        self.send::<Value>(request)?.check()
    }
}

impl Backend for HttpBackend {
    fn login(&self, request: &LoginRequest) -> Result<LoginResult, ApiError> {
        self.fetch(self.post("/api/student/login").json(request))
    }

    fn student(&self, id: StudentId) -> Result<Student, ApiError> {
        self.fetch(self.get(&format!("/api/student/{}", id)))
    }

    fn sign_up(&self, request: &SignUpRequest) -> Result<(), ApiError> {
        self.execute(self.post("/api/student/sign-up").json(request))
    }

    fn onboard(&self, id: StudentId, request: &OnboardingRequest) -> Result<(), ApiError> {
        self.execute(self.patch(&format!("/api/student/{}/onboarding", id)).json(request))
    }

    fn update_reaction_time(&self, avg_ms: u32) -> Result<(), ApiError> {
        self.execute(
            self.patch("/api/student/reaction-time")
                .json(&json!({ "avgReactionTime": avg_ms })),
        )
    }

    fn send_verification(&self, email: &str) -> Result<(), ApiError> {
        self.execute(self.post("/api/email/send").json(&json!({ "email": email })))
    }

    fn verify_email(&self, email: &str, code: &str) -> Result<(), ApiError> {
        self.execute(
            self.post("/api/email/verify")
                .json(&json!({ "email": email, "code": code })),
        )
    }

    fn lectures(&self, query: &LectureQuery) -> Result<LecturePage, ApiError> {
        self.fetch(self.get("/api/lectures").query(&query.params()))
    }

    fn buckets(&self) -> Result<Vec<Bucket>, ApiError> {
        self.fetch(self.get("/api/buckets"))
    }

    fn create_bucket(&self, name: &str) -> Result<(), ApiError> {
        self.execute(self.post("/api/buckets").json(&json!({ "name": name })))
    }

    fn select_best(&self, bucket: BucketId) -> Result<(), ApiError> {
        self.execute(self.patch(&format!("/api/buckets/{}/select", bucket)))
    }

    fn elements(&self, bucket: BucketId) -> Result<Vec<BucketElement>, ApiError> {
        self.fetch(self.get(&format!("/api/buckets/{}/elements", bucket)))
    }

    fn update_priorities(&self, bucket: BucketId, updates: &[PriorityUpdate]) -> Result<(), ApiError> {
        self.execute(
            self.patch(&format!("/api/buckets/{}/elements/priorities", bucket))
                .json(updates),
        )
    }

    fn add_element(&self, bucket: BucketId, teach_id: TeachId) -> Result<(), ApiError> {
        self.execute(
            self.post(&format!("/api/buckets/{}/elements", bucket))
                .json(&json!({ "teachId": teach_id })),
        )
    }

    fn set_alternate(&self, bucket: BucketId, element: ElementId, alternate: TeachId) -> Result<(), ApiError> {
        self.execute(
            self.patch(&format!("/api/buckets/{}/elements/{}/alternate", bucket, element))
                .json(&json!({ "alternateTeachId": alternate })),
        )
    }

    fn test_results(&self) -> Result<Vec<TestSummary>, ApiError> {
        self.fetch(self.get("/api/test/results"))
    }

    fn test_result(&self, id: TestId) -> Result<TestDetail, ApiError> {
        self.fetch(self.get(&format!("/api/test/results/{}", id)))
    }
}
