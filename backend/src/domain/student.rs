//! Student record model.
//!
//! Every field type here is validated on construction, so a [`Student`] or
//! [`StudentProfile`] value always satisfies the record invariants apart from
//! uniqueness, which only the store can check.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Lowest permitted grade point average.
pub const GPA_MIN: f64 = 0.0;
/// Highest permitted grade point average.
pub const GPA_MAX: f64 = 4.0;
/// Number of digits in a student code.
pub const STUDENT_CODE_LEN: usize = 10;

/// Validation failures for student fields.
///
/// Messages are the ones shown to API clients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StudentValidationError {
    #[error("All fields are required")]
    MissingRequiredFields { fields: Vec<&'static str> },
    #[error("Invalid student code format (must be 10 digits)")]
    InvalidStudentCode,
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Invalid major. Must be one of: CS, SE, IT, CE, DS")]
    InvalidMajor,
    #[error("GPA must be between 0.0 and 4.0")]
    GpaOutOfRange,
    #[error("Invalid status. Must be one of: active, graduated, suspended, withdrawn")]
    InvalidStatus,
    #[error("Invalid student ID")]
    InvalidId,
    /// A first or last name was blank after trimming. Create and update
    /// reject blank names as missing fields first, so this mostly surfaces
    /// for stored rows.
    #[error("{field} must not be empty")]
    EmptyName { field: &'static str },
}

impl StudentValidationError {
    /// Request field the failure refers to, in wire spelling.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingRequiredFields { .. } => "body",
            Self::InvalidStudentCode => "studentCode",
            Self::InvalidEmail => "email",
            Self::InvalidMajor => "major",
            Self::GpaOutOfRange => "gpa",
            Self::InvalidStatus => "status",
            Self::InvalidId => "id",
            Self::EmptyName { field } => *field,
        }
    }

    /// Stable machine-readable detail code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingRequiredFields { .. } => "missing_required_fields",
            Self::InvalidStudentCode => "invalid_student_code",
            Self::InvalidEmail => "invalid_email",
            Self::InvalidMajor => "invalid_major",
            Self::GpaOutOfRange => "gpa_out_of_range",
            Self::InvalidStatus => "invalid_status",
            Self::InvalidId => "invalid_id",
            Self::EmptyName { .. } => "empty_name",
        }
    }
}

/// System-assigned positive student identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct StudentId(i64);

impl StudentId {
    /// Validate and wrap a raw identifier.
    pub fn new(id: i64) -> Result<Self, StudentValidationError> {
        if id <= 0 {
            return Err(StudentValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for StudentId {
    type Error = StudentValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StudentId> for i64 {
    fn from(value: StudentId) -> Self {
        value.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ten-digit student code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StudentCode(String);

impl StudentCode {
    /// Validate and construct a student code.
    pub fn new(code: impl Into<String>) -> Result<Self, StudentValidationError> {
        let code = code.into();
        if code.len() != STUDENT_CODE_LEN || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(StudentValidationError::InvalidStudentCode);
        }
        Ok(Self(code))
    }
}

impl AsRef<str> for StudentCode {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for StudentCode {
    type Error = StudentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StudentCode> for String {
    fn from(value: StudentCode) -> Self {
        value.0
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email address in `local@domain.tld` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an email address.
    pub fn new(email: impl Into<String>) -> Result<Self, StudentValidationError> {
        let email = email.into();
        if !email_regex().is_match(&email) {
            return Err(StudentValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = StudentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// First or last name; never blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonName(String);

impl PersonName {
    /// Trim and validate a name whose request field is not known.
    pub fn new(name: impl AsRef<str>) -> Result<Self, StudentValidationError> {
        Self::for_field("name", name)
    }

    /// Trim and validate a name, reporting failures against `field`.
    pub fn for_field(
        field: &'static str,
        name: impl AsRef<str>,
    ) -> Result<Self, StudentValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(StudentValidationError::EmptyName { field });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for PersonName {
    type Error = StudentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PersonName> for String {
    fn from(value: PersonName) -> Self {
        value.0
    }
}

/// Field of study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Major {
    #[serde(rename = "CS")]
    ComputerScience,
    #[serde(rename = "SE")]
    SoftwareEngineering,
    #[serde(rename = "IT")]
    InformationTechnology,
    #[serde(rename = "CE")]
    ComputerEngineering,
    #[serde(rename = "DS")]
    DataScience,
}

impl Major {
    /// Every major, in display order.
    pub const ALL: [Self; 5] = [
        Self::ComputerScience,
        Self::SoftwareEngineering,
        Self::InformationTechnology,
        Self::ComputerEngineering,
        Self::DataScience,
    ];

    /// Wire and storage code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ComputerScience => "CS",
            Self::SoftwareEngineering => "SE",
            Self::InformationTechnology => "IT",
            Self::ComputerEngineering => "CE",
            Self::DataScience => "DS",
        }
    }
}

impl fmt::Display for Major {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Major {
    type Err = StudentValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|major| major.as_str() == value)
            .ok_or(StudentValidationError::InvalidMajor)
    }
}

/// Enrollment state. `Withdrawn` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    #[default]
    Active,
    Graduated,
    Suspended,
    Withdrawn,
}

impl StudentStatus {
    /// Wire and storage spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Graduated => "graduated",
            Self::Suspended => "suspended",
            Self::Withdrawn => "withdrawn",
        }
    }

    /// Whether the status may still change.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Withdrawn)
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudentStatus {
    type Err = StudentValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "graduated" => Ok(Self::Graduated),
            "suspended" => Ok(Self::Suspended),
            "withdrawn" => Ok(Self::Withdrawn),
            _ => Err(StudentValidationError::InvalidStatus),
        }
    }
}

/// Grade point average within `[GPA_MIN, GPA_MAX]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Gpa(f64);

impl Gpa {
    /// Validate and wrap a GPA value. NaN and infinities are rejected.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Gpa;
    ///
    /// assert!(Gpa::new(4.0).is_ok());
    /// assert!(Gpa::new(4.01).is_err());
    /// ```
    pub fn new(value: f64) -> Result<Self, StudentValidationError> {
        if !value.is_finite() || !(GPA_MIN..=GPA_MAX).contains(&value) {
            return Err(StudentValidationError::GpaOutOfRange);
        }
        Ok(Self(value))
    }

    /// Raw value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Gpa {
    type Error = StudentValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Gpa> for f64 {
    fn from(value: Gpa) -> Self {
        value.0
    }
}

/// Unvalidated student fields as supplied by a client.
///
/// Any field may be absent; [`crate::domain::validation::validate_profile`]
/// turns a draft into a [`StudentProfile`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentDraft {
    pub student_code: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub major: Option<String>,
}

/// Validated client-editable fields of a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub student_code: StudentCode,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub major: Major,
}

/// Stored student record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub student_code: StudentCode,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub major: Major,
    pub gpa: Gpa,
    pub status: StudentStatus,
    pub created_at: DateTime<Utc>,
}

impl Student {
    /// Build a freshly created record with default GPA and status.
    pub fn enrol(id: StudentId, profile: StudentProfile, created_at: DateTime<Utc>) -> Self {
        let StudentProfile {
            student_code,
            first_name,
            last_name,
            email,
            major,
        } = profile;
        Self {
            id,
            student_code,
            first_name,
            last_name,
            email,
            major,
            gpa: Gpa::default(),
            status: StudentStatus::default(),
            created_at,
        }
    }

    /// Replace the client-editable fields, keeping id, GPA, status and
    /// creation time.
    pub fn apply_profile(&mut self, profile: StudentProfile) {
        self.student_code = profile.student_code;
        self.first_name = profile.first_name;
        self.last_name = profile.last_name;
        self.email = profile.email;
        self.major = profile.major;
    }
}

/// Optional list filters; `None` matches everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StudentFilter {
    pub major: Option<Major>,
    pub status: Option<StudentStatus>,
}

impl StudentFilter {
    /// Whether `student` passes every supplied filter.
    pub fn matches(&self, student: &Student) -> bool {
        self.major.is_none_or(|major| student.major == major)
            && self.status.is_none_or(|status| student.status == status)
    }
}

/// Single-field mutation applied by the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StudentFieldUpdate {
    /// Overwrite the GPA unconditionally.
    Gpa(Gpa),
    /// Set `status`, but only while the stored status is still `expected`.
    Status {
        expected: StudentStatus,
        status: StudentStatus,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1234567890", true)]
    #[case("123456789", false)]
    #[case("12345678901", false)]
    #[case("12345abcde", false)]
    #[case("١٢٣٤٥٦٧٨٩٠", false)]
    fn student_code_requires_ten_ascii_digits(#[case] raw: &str, #[case] valid: bool) {
        assert_eq!(StudentCode::new(raw).is_ok(), valid);
    }

    #[rstest]
    #[case("a@b.com", true)]
    #[case("first.last@uni.ac.th", true)]
    #[case("a@b", false)]
    #[case("a b@c.com", false)]
    #[case("a@@b.com", false)]
    #[case("@b.com", false)]
    fn email_pattern(#[case] raw: &str, #[case] valid: bool) {
        assert_eq!(EmailAddress::new(raw).is_ok(), valid);
    }

    #[rstest]
    #[case(0.0, true)]
    #[case(4.0, true)]
    #[case(2.75, true)]
    #[case(-0.01, false)]
    #[case(4.01, false)]
    #[case(f64::NAN, false)]
    #[case(f64::INFINITY, false)]
    fn gpa_range_is_inclusive(#[case] raw: f64, #[case] valid: bool) {
        assert_eq!(Gpa::new(raw).is_ok(), valid);
    }

    #[rstest]
    fn major_round_trips_through_str() {
        for major in Major::ALL {
            assert_eq!(major.as_str().parse::<Major>(), Ok(major));
        }
        assert!("cs".parse::<Major>().is_err());
    }

    #[rstest]
    fn status_defaults_to_active_and_only_withdrawn_is_terminal() {
        assert_eq!(StudentStatus::default(), StudentStatus::Active);
        assert!(StudentStatus::Withdrawn.is_terminal());
        assert!(!StudentStatus::Suspended.is_terminal());
    }

    #[rstest]
    fn person_name_is_trimmed() {
        let name = PersonName::new("  Somchai ").expect("valid name");
        assert_eq!(name.as_ref(), "Somchai");
        assert!(PersonName::new("   ").is_err());
    }

    #[rstest]
    #[case("firstName")]
    #[case("lastName")]
    fn blank_name_reports_its_field(#[case] field: &'static str) {
        let err = PersonName::for_field(field, " \t").expect_err("blank name");
        assert_eq!(err, StudentValidationError::EmptyName { field });
        assert_eq!(err.field(), field);
        assert_eq!(err.code(), "empty_name");
        assert_eq!(err.to_string(), format!("{field} must not be empty"));
    }

    #[rstest]
    fn student_serialises_camel_case() {
        let profile = StudentProfile {
            student_code: StudentCode::new("6501234567").expect("code"),
            first_name: PersonName::new("Ada").expect("first name"),
            last_name: PersonName::new("Lovelace").expect("last name"),
            email: EmailAddress::new("ada@uni.ac.th").expect("email"),
            major: Major::DataScience,
        };
        let student = Student::enrol(StudentId::new(7).expect("id"), profile, Utc::now());
        let value = serde_json::to_value(&student).expect("serialise");

        assert_eq!(value["id"], 7);
        assert_eq!(value["studentCode"], "6501234567");
        assert_eq!(value["major"], "DS");
        assert_eq!(value["status"], "active");
        assert_eq!(value["gpa"], 0.0);
        assert!(value.get("createdAt").is_some());
    }
}
