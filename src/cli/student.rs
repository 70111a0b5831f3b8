//! Account CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::app::Env;
use crate::domain::{fixtures, LoginRequest, OnboardingRequest, SignUpRequest, Student};
use crate::storage::Session;

#[derive(Subcommand)]
pub enum VerifyCommands {
    /// Send a verification code to an email address
    Send { email: String },

    /// Confirm the code received by email
    Confirm { email: String, code: String },
}

pub fn login(env: &Env, nickname: &str, password: &str) -> Result<()> {
    let output = &env.output;
    let request = LoginRequest {
        nickname: nickname.trim().to_string(),
        password: password.to_string(),
    };

    let anonymous = env.backend(&Session::default())?;
    let login = anonymous.login(&request)?;
    output.verbose_ctx("login", &format!("student id {}", login.id));

    let mut session = Session {
        token: login.access_token,
        ..Session::default()
    };
    let backend = env.backend(&session)?;
    let student = backend.student(login.id)?;
    session.student = Some(student.clone());
    env.save_session(&session)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "student": student,
            "onboarded": student.is_onboarded(),
        }));
    } else {
        output.success(&format!("Logged in as {} ({})", student.nickname, student.student_name));
        if !student.is_onboarded() {
            println!("Profile incomplete. Run 'regsim onboard' to add your student number.");
        }
    }

    Ok(())
}

pub fn logout(env: &Env) -> Result<()> {
    let mut session = env.load_session()?;
    let was_logged_in = session.student.is_some();
    session.logout();
    env.save_session(&session)?;

    if was_logged_in {
        env.output.success("Logged out");
    } else {
        env.output.success("Not logged in");
    }
    Ok(())
}

pub fn whoami(env: &Env) -> Result<()> {
    let session = env.load_session()?;
    let student = session.require_student()?;

    if env.output.is_json() {
        env.output.data(student);
    } else {
        print_student(student);
    }
    Ok(())
}

fn print_student(student: &Student) {
    println!("Nickname:       {}", student.nickname);
    println!("Name:           {}", student.student_name);
    println!(
        "Student number: {}",
        student.student_number.as_deref().unwrap_or("(not onboarded)")
    );
    if let Some(department) = student.department_id.and_then(fixtures::department) {
        println!("Department:     {}", department.name);
    }
    match student.avg_reaction_time {
        Some(ms) => println!("Reaction time:  {} ms", ms),
        None => println!("Reaction time:  (not measured)"),
    }
}

pub fn signup(env: &Env, nickname: &str, password: &str, confirm: &str, name: &str) -> Result<()> {
    let request = SignUpRequest::new(nickname, password, confirm, name)?;
    let backend = env.backend(&Session::default())?;
    backend.sign_up(&request)?;

    env.output.success(&format!(
        "Account '{}' created. Run 'regsim login {} <password>' next.",
        request.nickname, request.nickname
    ));
    Ok(())
}

pub fn onboard(env: &Env, college: i64, department: i64, grade: u8, number: &str) -> Result<()> {
    let request = OnboardingRequest::new(college, department, grade, number)?;
    let mut session = env.load_session()?;
    let student_id = session.require_student()?.id;

    let backend = env.backend(&session)?;
    backend.onboard(student_id, &request)?;

    // Pick up the updated profile; the onboarding itself already succeeded
    match backend.student(student_id) {
        Ok(student) => session.student = Some(student),
        Err(e) => tracing::warn!(error = %e, "failed to refresh profile after onboarding"),
    }
    env.save_session(&session)?;

    env.output
        .success(&format!("Profile completed for student number {}", request.student_number));
    Ok(())
}

pub fn verify(env: &Env, cmd: VerifyCommands) -> Result<()> {
    let session = env.load_session()?;
    let backend = env.backend(&session)?;

    match cmd {
        VerifyCommands::Send { email } => {
            backend.send_verification(email.trim())?;
            env.output
                .success(&format!("Verification code sent to {}", email.trim()));
        }
        VerifyCommands::Confirm { email, code } => {
            backend.verify_email(email.trim(), code.trim())?;
            env.output
                .success(&format!("Email {} verified", email.trim()));
        }
    }
    Ok(())
}
