//! Student input validators.
//!
//! Each function checks one field and returns the normalised value. The
//! service composes them in a fixed order and stops at the first failure.

use serde_json::json;

use super::student::{
    EmailAddress, Gpa, Major, PersonName, StudentCode, StudentDraft, StudentId, StudentProfile,
    StudentStatus, StudentValidationError,
};
use super::Error;

/// Fields every create or full update must carry, in wire spelling.
const REQUIRED_FIELDS: [&str; 5] = ["studentCode", "firstName", "lastName", "email", "major"];

fn is_blank(value: Option<&String>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Reject drafts with missing or whitespace-only fields.
pub fn validate_required_fields(draft: &StudentDraft) -> Result<(), StudentValidationError> {
    let present = [
        &draft.student_code,
        &draft.first_name,
        &draft.last_name,
        &draft.email,
        &draft.major,
    ];
    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .into_iter()
        .zip(present)
        .filter(|(_, value)| is_blank(value.as_ref()))
        .map(|(name, _)| name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(StudentValidationError::MissingRequiredFields { fields: missing })
    }
}

pub fn validate_student_code(code: &str) -> Result<StudentCode, StudentValidationError> {
    StudentCode::new(code)
}

pub fn validate_email(email: &str) -> Result<EmailAddress, StudentValidationError> {
    EmailAddress::new(email)
}

pub fn validate_major(major: &str) -> Result<Major, StudentValidationError> {
    major.parse()
}

/// Require a finite number within the GPA range.
///
/// `None` stands for a value that was missing or not numeric.
pub fn validate_gpa(gpa: Option<f64>) -> Result<Gpa, StudentValidationError> {
    gpa.ok_or(StudentValidationError::GpaOutOfRange)
        .and_then(Gpa::new)
}

pub fn validate_status(status: &str) -> Result<StudentStatus, StudentValidationError> {
    status.parse()
}

pub fn validate_id(id: i64) -> Result<StudentId, StudentValidationError> {
    StudentId::new(id)
}

/// Parse a textual identifier such as a path segment.
///
/// # Examples
/// ```
/// use backend::domain::validation::parse_id;
///
/// assert_eq!(parse_id(" 42 ").map(|id| id.get()), Ok(42));
/// assert!(parse_id("abc").is_err());
/// assert!(parse_id("0").is_err());
/// ```
pub fn parse_id(raw: &str) -> Result<StudentId, StudentValidationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| StudentValidationError::InvalidId)
        .and_then(validate_id)
}

/// Run the create/update validators in order and build a profile.
pub fn validate_profile(draft: &StudentDraft) -> Result<StudentProfile, StudentValidationError> {
    validate_required_fields(draft)?;
    // Presence is established above; the fallbacks are unreachable.
    let field = |value: &Option<String>| value.clone().unwrap_or_default();
    let student_code = validate_student_code(&field(&draft.student_code))?;
    let email = validate_email(&field(&draft.email))?;
    let major = validate_major(&field(&draft.major))?;
    Ok(StudentProfile {
        student_code,
        first_name: PersonName::for_field("firstName", field(&draft.first_name))?,
        last_name: PersonName::for_field("lastName", field(&draft.last_name))?,
        email,
        major,
    })
}

impl From<StudentValidationError> for Error {
    fn from(err: StudentValidationError) -> Self {
        let mut details = json!({
            "field": err.field(),
            "code": err.code(),
        });
        if let StudentValidationError::MissingRequiredFields { fields } = &err {
            details["missing"] = json!(fields);
        }
        Error::invalid_request(err.to_string()).with_details(details)
    }
}
