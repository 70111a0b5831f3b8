//! In-memory backend for view-model tests

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use chrono::Utc;

use crate::api::{ApiError, Backend};
use crate::domain::{
    Bucket, BucketElement, BucketId, ElementId, Lecture, LecturePage, LectureQuery, LoginRequest,
    LoginResult, OnboardingRequest, PriorityUpdate, SignUpRequest, Student, StudentId, TeachId,
    TestDetail, TestId, TestSummary,
};

/// Backend double with failure toggles and call recording
#[derive(Default)]
pub struct FakeBackend {
    pub buckets: RefCell<Vec<Bucket>>,
    pub elements: RefCell<HashMap<BucketId, Vec<BucketElement>>>,
    pub lectures: RefCell<Vec<Lecture>>,
    pub summaries: RefCell<Vec<TestSummary>>,
    pub fail_reads: Cell<bool>,
    pub fail_writes: Cell<bool>,
    pub calls: RefCell<Vec<String>>,
    pub reaction_times: RefCell<Vec<u32>>,
}

pub fn bucket(id: BucketId, name: &str, is_best: bool) -> Bucket {
    Bucket {
        id,
        name: name.to_string(),
        is_best,
        created_at: Utc::now(),
    }
}

pub fn element(id: ElementId, priority: u32) -> BucketElement {
    BucketElement {
        element_id: id,
        teach_id: 1000 + id,
        priority,
        course_name: format!("Course {}", id),
        professor_name: "Prof".to_string(),
        time_place: "Mon 09:00".to_string(),
        major_type: "Major".to_string(),
        alternate_teach_id: None,
        alternate_subject_name: None,
    }
}

pub fn lecture(teach_id: TeachId, name: &str) -> Lecture {
    Lecture {
        teach_id,
        course_name: name.to_string(),
        class_name: "A".to_string(),
        professor_name: "Prof".to_string(),
        credit: 3,
        target_grade: Some(1),
        major_type: None,
        schedules: vec![],
    }
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend with two buckets; bucket 1 holds three elements stored out of order
    pub fn seeded() -> Self {
        let backend = Self::new();
        backend
            .buckets
            .replace(vec![bucket(1, "Main", true), bucket(2, "Empty", false)]);
        backend
            .elements
            .borrow_mut()
            .insert(1, vec![element(12, 2), element(13, 3), element(11, 1)]);
        backend
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.as_str() == call).count()
    }

    fn record(&self, call: &str) {
        self.calls.borrow_mut().push(call.to_string());
    }

    fn read(&self, call: &str) -> Result<(), ApiError> {
        self.record(call);
        if self.fail_reads.get() {
            Err(ApiError::Transport("connection refused".to_string()))
        } else {
            Ok(())
        }
    }

    fn write(&self, call: &str) -> Result<(), ApiError> {
        self.record(call);
        if self.fail_writes.get() {
            Err(ApiError::Status {
                status: 500,
                message: "internal error".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

impl Backend for FakeBackend {
    fn login(&self, _request: &LoginRequest) -> Result<LoginResult, ApiError> {
        self.write("login")?;
        Ok(LoginResult {
            id: 1,
            access_token: Some("token".to_string()),
        })
    }

    fn student(&self, id: StudentId) -> Result<Student, ApiError> {
        self.read("student")?;
        Ok(Student {
            id,
            student_number: None,
            department_id: None,
            nickname: "fast".to_string(),
            student_name: "Kim".to_string(),
            avg_reaction_time: None,
        })
    }

    fn sign_up(&self, _request: &SignUpRequest) -> Result<(), ApiError> {
        self.write("sign_up")
    }

    fn onboard(&self, _id: StudentId, _request: &OnboardingRequest) -> Result<(), ApiError> {
        self.write("onboard")
    }

    fn update_reaction_time(&self, avg_ms: u32) -> Result<(), ApiError> {
        self.write("update_reaction_time")?;
        self.reaction_times.borrow_mut().push(avg_ms);
        Ok(())
    }

    fn send_verification(&self, _email: &str) -> Result<(), ApiError> {
        self.write("send_verification")
    }

    fn verify_email(&self, _email: &str, _code: &str) -> Result<(), ApiError> {
        self.write("verify_email")
    }

    fn lectures(&self, query: &LectureQuery) -> Result<LecturePage, ApiError> {
        self.read("lectures")?;
        let matching: Vec<Lecture> = self
            .lectures
            .borrow()
            .iter()
            .filter(|l| query.matches(l))
            .filter(|l| query.cursor.map_or(true, |c| l.teach_id > c))
            .cloned()
            .collect();

        let size = query.size as usize;
        let has_next = matching.len() > size;
        let lectures: Vec<Lecture> = matching.into_iter().take(size).collect();
        Ok(LecturePage {
            next_cursor: lectures.last().map(|l| l.teach_id),
            lectures,
            has_next,
        })
    }

    fn buckets(&self) -> Result<Vec<Bucket>, ApiError> {
        self.read("buckets")?;
        Ok(self.buckets.borrow().clone())
    }

    fn create_bucket(&self, name: &str) -> Result<(), ApiError> {
        self.write("create_bucket")?;
        let mut buckets = self.buckets.borrow_mut();
        let id = buckets.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        buckets.push(bucket(id, name, false));
        Ok(())
    }

    fn select_best(&self, id: BucketId) -> Result<(), ApiError> {
        self.write("select_best")?;
        for b in self.buckets.borrow_mut().iter_mut() {
            b.is_best = b.id == id;
        }
        Ok(())
    }

    fn elements(&self, id: BucketId) -> Result<Vec<BucketElement>, ApiError> {
        self.read("elements")?;
        Ok(self.elements.borrow().get(&id).cloned().unwrap_or_default())
    }

    fn update_priorities(&self, id: BucketId, updates: &[PriorityUpdate]) -> Result<(), ApiError> {
        self.write("update_priorities")?;
        let mut elements = self.elements.borrow_mut();
        let list = elements.entry(id).or_default();
        for update in updates {
            if let Some(e) = list.iter_mut().find(|e| e.element_id == update.element_id) {
                e.priority = update.priority;
            }
        }
        Ok(())
    }

    fn add_element(&self, id: BucketId, teach_id: TeachId) -> Result<(), ApiError> {
        self.write("add_element")?;
        let mut elements = self.elements.borrow_mut();
        let list = elements.entry(id).or_default();
        let element_id = list.iter().map(|e| e.element_id).max().unwrap_or(0) + 1;
        let mut added = element(element_id, list.len() as u32 + 1);
        added.teach_id = teach_id;
        list.push(added);
        Ok(())
    }

    fn set_alternate(&self, id: BucketId, element_id: ElementId, alternate: TeachId) -> Result<(), ApiError> {
        self.write("set_alternate")?;
        if let Some(e) = self
            .elements
            .borrow_mut()
            .get_mut(&id)
            .and_then(|list| list.iter_mut().find(|e| e.element_id == element_id))
        {
            e.alternate_teach_id = Some(alternate);
        }
        Ok(())
    }

    fn test_results(&self) -> Result<Vec<TestSummary>, ApiError> {
        self.read("test_results")?;
        Ok(self.summaries.borrow().clone())
    }

    fn test_result(&self, id: TestId) -> Result<TestDetail, ApiError> {
        self.read("test_result")?;
        let mut detail = crate::domain::fixtures::test_detail(id);
        detail.bucket_name = "Live bucket".to_string();
        Ok(detail)
    }
}
