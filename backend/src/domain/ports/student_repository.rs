//! Driven port for student persistence.
//!
//! Adapters store [`Student`] records and enforce the uniqueness of student
//! codes and email addresses. Status changes and deletes are conditional on
//! the status the caller last observed, which closes the window between the
//! service's business-rule check and the write.

use std::fmt;

use async_trait::async_trait;

use crate::domain::{
    Student, StudentFieldUpdate, StudentFilter, StudentId, StudentProfile, StudentStatus,
};

use super::define_port_error;

/// Unique student attribute that a write collided on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateField {
    StudentCode,
    Email,
}

impl fmt::Display for DuplicateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::StudentCode => "student_code",
            Self::Email => "email",
        })
    }
}

define_port_error! {
    /// Errors raised by student repository adapters.
    pub enum StudentRepositoryError {
        /// The backing store could not be reached.
        Connection { message: String } =>
            "student repository connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } =>
            "student repository query failed: {message}",
        /// A unique attribute is already held by another student.
        Duplicate { field: DuplicateField } =>
            "duplicate student {field}",
        /// No student exists for the identifier.
        NotFound => "student not found",
        /// The stored status no longer matches the expected one.
        StatusChanged => "student status changed concurrently",
    }
}

/// Persistence contract for student records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Return every student passing `filter`, ordered by id.
    async fn find_all(
        &self,
        filter: StudentFilter,
    ) -> Result<Vec<Student>, StudentRepositoryError>;

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, StudentRepositoryError>;

    /// Insert a new student with GPA 0.0 and status active.
    ///
    /// The store assigns the id and creation timestamp.
    async fn create(&self, profile: StudentProfile) -> Result<Student, StudentRepositoryError>;

    /// Replace the client-editable fields of an existing student.
    async fn update_full(
        &self,
        id: StudentId,
        profile: StudentProfile,
    ) -> Result<Student, StudentRepositoryError>;

    /// Apply a single-field update and return the stored record.
    ///
    /// [`StudentFieldUpdate::Status`] only applies while the stored status
    /// equals `expected`; otherwise [`StudentRepositoryError::StatusChanged`]
    /// is returned.
    async fn update_field(
        &self,
        id: StudentId,
        update: StudentFieldUpdate,
    ) -> Result<Student, StudentRepositoryError>;

    /// Delete the student while its status still equals `expected_status`.
    async fn delete(
        &self,
        id: StudentId,
        expected_status: StudentStatus,
    ) -> Result<(), StudentRepositoryError>;
}
