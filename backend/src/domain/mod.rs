//! Domain model and use cases for student records.
//!
//! Purpose: define the student entity with its validated field types, the
//! validators and statistics built on them, and the service that enforces the
//! lifecycle rules. Nothing here knows about HTTP or SQL; adapters reach the
//! domain through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode — transport agnostic failure payload.
//! - Student, StudentProfile, StudentDraft and field newtypes.
//! - StudentStatistics — list aggregates.
//! - StudentService — implementation of the driving ports.
//! - TraceId — per-request correlation identifier.

pub mod error;
pub mod ports;
pub mod statistics;
pub mod student;
pub mod student_service;
pub mod trace_id;
pub mod validation;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::statistics::StudentStatistics;
pub use self::student::{
    EmailAddress, GPA_MAX, GPA_MIN, Gpa, Major, PersonName, STUDENT_CODE_LEN, Student,
    StudentCode, StudentDraft, StudentFieldUpdate, StudentFilter, StudentId, StudentProfile,
    StudentStatus, StudentValidationError,
};
pub use self::student_service::StudentService;
pub use self::trace_id::TraceId;

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use backend::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("Student not found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
