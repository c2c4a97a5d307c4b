//! Driving port for student mutations.
//!
//! Identifiers and field values arrive unvalidated; implementations run the
//! validators before touching the store.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Student, StudentDraft, StudentId};

/// Message returned alongside the id of a deleted student.
pub const STUDENT_DELETED_MESSAGE: &str = "Student deleted successfully";

/// Full replacement of a student's editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateStudentRequest {
    pub id: i64,
    pub draft: StudentDraft,
}

/// GPA change. `gpa` is `None` when the client sent no number.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UpdateGpaRequest {
    pub id: i64,
    pub gpa: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateStatusRequest {
    pub id: i64,
    pub status: Option<String>,
}

/// Confirmation of a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDeleted {
    pub id: StudentId,
    pub message: String,
}

impl StudentDeleted {
    pub fn new(id: StudentId) -> Self {
        Self {
            id,
            message: STUDENT_DELETED_MESSAGE.to_owned(),
        }
    }
}

/// Write-side use cases consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentsCommand: Send + Sync {
    async fn create_student(&self, draft: StudentDraft) -> Result<Student, Error>;

    async fn update_student(&self, request: UpdateStudentRequest) -> Result<Student, Error>;

    async fn update_gpa(&self, request: UpdateGpaRequest) -> Result<Student, Error>;

    /// Change the status; withdrawn students are immutable.
    async fn update_status(&self, request: UpdateStatusRequest) -> Result<Student, Error>;

    /// Delete a non-active student.
    async fn delete_student(&self, id: i64) -> Result<StudentDeleted, Error>;
}
