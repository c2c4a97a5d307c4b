//! Student domain service.
//!
//! Implements the [`StudentsQuery`] and [`StudentsCommand`] driving ports on
//! top of a [`StudentRepository`]. Validation runs before any repository call
//! and business rules run on the record as last read; status changes and
//! deletes then go through conditional writes so a concurrent change is
//! reported as a conflict instead of silently overwritten.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    DuplicateField, ListStudentsRequest, StudentDeleted, StudentList, StudentRepository,
    StudentRepositoryError, StudentsCommand, StudentsQuery, UpdateGpaRequest,
    UpdateStatusRequest, UpdateStudentRequest,
};
use crate::domain::validation::{
    validate_gpa, validate_id, validate_major, validate_profile, validate_status,
};
use crate::domain::{
    Error, Student, StudentDraft, StudentFieldUpdate, StudentFilter, StudentId,
    StudentStatistics, StudentStatus,
};

pub(crate) const STUDENT_NOT_FOUND: &str = "Student not found";
pub(crate) const WITHDRAWN_STATUS_LOCKED: &str = "Cannot change status of a withdrawn student";
pub(crate) const ACTIVE_DELETE_REFUSED: &str = "Cannot delete an active student";

/// Student service implementing the driving ports.
pub struct StudentService<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> Clone for StudentService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ?Sized> StudentService<R> {
    /// Create a service backed by `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl<R> StudentService<R>
where
    R: StudentRepository + ?Sized,
{
    fn map_repository_error(error: StudentRepositoryError) -> Error {
        match error {
            StudentRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("student repository unavailable: {message}"))
            }
            StudentRepositoryError::Query { message } => {
                Error::internal(format!("student repository error: {message}"))
            }
            StudentRepositoryError::Duplicate { field } => Self::duplicate_conflict(field),
            StudentRepositoryError::NotFound => Error::not_found(STUDENT_NOT_FOUND),
            StudentRepositoryError::StatusChanged => {
                Error::conflict("student status changed concurrently; retry the request")
                    .with_details(json!({ "field": "status", "code": "status_changed" }))
            }
        }
    }

    fn duplicate_conflict(field: DuplicateField) -> Error {
        let (message, wire_field, code) = match field {
            DuplicateField::StudentCode => (
                "Student code already exists",
                "studentCode",
                "duplicate_student_code",
            ),
            DuplicateField::Email => ("Email already exists", "email", "duplicate_email"),
        };
        Error::conflict(message).with_details(json!({ "field": wire_field, "code": code }))
    }

    async fn fetch_existing(&self, id: StudentId) -> Result<Student, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found(STUDENT_NOT_FOUND))
    }
}

#[async_trait]
impl<R> StudentsQuery for StudentService<R>
where
    R: StudentRepository + ?Sized,
{
    async fn list_students(&self, request: ListStudentsRequest) -> Result<StudentList, Error> {
        let filter = StudentFilter {
            major: non_empty(request.major)
                .map(|major| validate_major(&major))
                .transpose()?,
            status: non_empty(request.status)
                .map(|status| validate_status(&status))
                .transpose()?,
        };
        let students = self
            .repository
            .find_all(filter)
            .await
            .map_err(Self::map_repository_error)?;
        let statistics = StudentStatistics::from_students(&students);
        debug!(
            major = ?filter.major,
            status = ?filter.status,
            total = statistics.total,
            "listed students"
        );
        Ok(StudentList {
            students,
            statistics,
        })
    }

    async fn get_student(&self, id: i64) -> Result<Student, Error> {
        let id = validate_id(id)?;
        let student = self.fetch_existing(id).await?;
        debug!(student_id = %id, "fetched student");
        Ok(student)
    }
}

#[async_trait]
impl<R> StudentsCommand for StudentService<R>
where
    R: StudentRepository + ?Sized,
{
    async fn create_student(&self, draft: StudentDraft) -> Result<Student, Error> {
        let profile = validate_profile(&draft)?;
        let student = self
            .repository
            .create(profile)
            .await
            .map_err(Self::map_repository_error)?;
        info!(student_id = %student.id, "student created");
        Ok(student)
    }

    async fn update_student(&self, request: UpdateStudentRequest) -> Result<Student, Error> {
        let id = validate_id(request.id)?;
        let profile = validate_profile(&request.draft)?;
        self.fetch_existing(id).await?;
        let student = self
            .repository
            .update_full(id, profile)
            .await
            .map_err(Self::map_repository_error)?;
        info!(student_id = %id, "student updated");
        Ok(student)
    }

    async fn update_gpa(&self, request: UpdateGpaRequest) -> Result<Student, Error> {
        let id = validate_id(request.id)?;
        let gpa = validate_gpa(request.gpa)?;
        self.fetch_existing(id).await?;
        let student = self
            .repository
            .update_field(id, StudentFieldUpdate::Gpa(gpa))
            .await
            .map_err(Self::map_repository_error)?;
        info!(student_id = %id, gpa = gpa.value(), "student gpa updated");
        Ok(student)
    }

    async fn update_status(&self, request: UpdateStatusRequest) -> Result<Student, Error> {
        let id = validate_id(request.id)?;
        let status = validate_status(request.status.as_deref().unwrap_or_default())?;
        let current = self.fetch_existing(id).await?;
        if current.status.is_terminal() {
            return Err(Error::conflict(WITHDRAWN_STATUS_LOCKED));
        }
        let update = StudentFieldUpdate::Status {
            expected: current.status,
            status,
        };
        let student = self
            .repository
            .update_field(id, update)
            .await
            .map_err(Self::map_repository_error)?;
        info!(
            student_id = %id,
            from = %current.status,
            to = %status,
            "student status updated"
        );
        Ok(student)
    }

    async fn delete_student(&self, id: i64) -> Result<StudentDeleted, Error> {
        let id = validate_id(id)?;
        let current = self.fetch_existing(id).await?;
        if current.status == StudentStatus::Active {
            return Err(Error::conflict(ACTIVE_DELETE_REFUSED));
        }
        self.repository
            .delete(id, current.status)
            .await
            .map_err(Self::map_repository_error)?;
        info!(student_id = %id, "student deleted");
        Ok(StudentDeleted::new(id))
    }
}

#[cfg(test)]
#[path = "student_service_tests.rs"]
mod tests;
