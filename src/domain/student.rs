//! Student accounts and onboarding

use serde::{Deserialize, Serialize};

use super::bucket::ValidationError;

/// Backend identifier of a student
pub type StudentId = i64;

/// Length of a valid student number
pub const STUDENT_NUMBER_LEN: usize = 8;

/// A student profile as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    #[serde(default)]
    pub student_number: Option<String>,
    #[serde(default)]
    pub department_id: Option<i64>,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub student_name: String,
    /// Average reaction time in milliseconds
    #[serde(default)]
    pub avg_reaction_time: Option<u32>,
}

impl Student {
    /// Returns true once the student has completed onboarding
    pub fn is_onboarded(&self) -> bool {
        self.student_number
            .as_deref()
            .is_some_and(|n| !n.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub nickname: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    pub id: StudentId,
    #[serde(default)]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub nickname: String,
    pub password: String,
    pub student_name: String,
}

impl SignUpRequest {
    /// Builds a sign-up request, checking the password confirmation locally
    pub fn new(nickname: &str, password: &str, confirm: &str, name: &str) -> Result<Self, ValidationError> {
        if nickname.trim().is_empty() {
            return Err(ValidationError::MissingField("nickname"));
        }
        if password.is_empty() {
            return Err(ValidationError::MissingField("password"));
        }
        if password != confirm {
            return Err(ValidationError::PasswordMismatch);
        }
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }

        Ok(Self {
            nickname: nickname.trim().to_string(),
            password: password.to_string(),
            student_name: name.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRequest {
    pub college_id: i64,
    pub department_id: i64,
    pub grade: u8,
    pub student_number: String,
}

impl OnboardingRequest {
    /// Builds an onboarding request after validating it against the catalog
    pub fn new(college_id: i64, department_id: i64, grade: u8, student_number: &str) -> Result<Self, ValidationError> {
        let student_number = student_number.trim();
        if student_number.is_empty() {
            return Err(ValidationError::MissingField("student number"));
        }
        if student_number.len() != STUDENT_NUMBER_LEN || !student_number.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidStudentNumber(student_number.to_string()));
        }
        if !(1..=4).contains(&grade) {
            return Err(ValidationError::InvalidGrade(grade));
        }

        let department = super::fixtures::department(department_id);
        if department.map(|d| d.college_id) != Some(college_id) {
            return Err(ValidationError::DepartmentMismatch {
                college: college_id,
                department: department_id,
            });
        }

        Ok(Self {
            college_id,
            department_id,
            grade,
            student_number: student_number.to_string(),
        })
    }
}

/// A college in the bundled catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct College {
    pub id: i64,
    pub name: &'static str,
}

/// A department in the bundled catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Department {
    pub id: i64,
    pub college_id: i64,
    pub name: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_up_checks_confirmation() {
        assert_eq!(
            SignUpRequest::new("fast", "pw1", "pw2", "Kim").unwrap_err(),
            ValidationError::PasswordMismatch
        );
        assert_eq!(
            SignUpRequest::new(" ", "pw", "pw", "Kim").unwrap_err(),
            ValidationError::MissingField("nickname")
        );

        let req = SignUpRequest::new(" fast ", "pw", "pw", "Kim").unwrap();
        assert_eq!(req.nickname, "fast");
    }

    #[test]
    fn onboarding_validation() {
        assert!(matches!(
            OnboardingRequest::new(1, 1, 2, "2023001"),
            Err(ValidationError::InvalidStudentNumber(_))
        ));
        assert!(matches!(
            OnboardingRequest::new(1, 1, 2, "2023000a"),
            Err(ValidationError::InvalidStudentNumber(_))
        ));
        assert_eq!(
            OnboardingRequest::new(1, 1, 5, "20230001").unwrap_err(),
            ValidationError::InvalidGrade(5)
        );
        assert_eq!(
            OnboardingRequest::new(2, 1, 2, "20230001").unwrap_err(),
            ValidationError::DepartmentMismatch { college: 2, department: 1 }
        );

        let req = OnboardingRequest::new(1, 2, 2, "20230001").unwrap();
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({
                "collegeId": 1,
                "departmentId": 2,
                "grade": 2,
                "studentNumber": "20230001"
            })
        );
    }

    #[test]
    fn onboarded_requires_student_number() {
        let mut student: Student = serde_json::from_str(r#"{"id":1,"nickname":"fast","studentName":"Kim"}"#).unwrap();
        assert!(!student.is_onboarded());

        student.student_number = Some("20230001".to_string());
        assert!(student.is_onboarded());
    }
}
