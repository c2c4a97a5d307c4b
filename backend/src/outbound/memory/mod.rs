//! In-memory `StudentRepository` used when no database is configured and in
//! tests.
//!
//! Writes are serialised by a single async mutex, so uniqueness checks and
//! conditional writes are atomic with respect to each other.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::domain::ports::{DuplicateField, StudentRepository, StudentRepositoryError};
use crate::domain::{
    Student, StudentFieldUpdate, StudentFilter, StudentId, StudentProfile, StudentStatus,
};

#[derive(Debug, Default)]
struct Store {
    students: BTreeMap<StudentId, Student>,
    last_id: i64,
}

impl Store {
    /// First unique field of `profile` already held by a student other than
    /// `except`.
    fn collision(
        &self,
        profile: &StudentProfile,
        except: Option<StudentId>,
    ) -> Option<DuplicateField> {
        let others = self
            .students
            .values()
            .filter(|student| Some(student.id) != except);
        let mut email_taken = false;
        for student in others {
            if student.student_code == profile.student_code {
                return Some(DuplicateField::StudentCode);
            }
            email_taken |= student.email == profile.email;
        }
        email_taken.then_some(DuplicateField::Email)
    }

    fn next_id(&mut self) -> Result<StudentId, StudentRepositoryError> {
        let id = self
            .last_id
            .checked_add(1)
            .ok_or_else(|| StudentRepositoryError::query("student id space exhausted"))?;
        let id = StudentId::new(id).map_err(|err| StudentRepositoryError::query(err.to_string()))?;
        self.last_id = id.get();
        Ok(id)
    }

    fn get_mut(&mut self, id: StudentId) -> Result<&mut Student, StudentRepositoryError> {
        self.students
            .get_mut(&id)
            .ok_or_else(StudentRepositoryError::not_found)
    }
}

/// Process-local student store.
#[derive(Debug, Default)]
pub struct InMemoryStudentRepository {
    store: Mutex<Store>,
}

impl InMemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn find_all(
        &self,
        filter: StudentFilter,
    ) -> Result<Vec<Student>, StudentRepositoryError> {
        let store = self.store.lock().await;
        Ok(store
            .students
            .values()
            .filter(|student| filter.matches(student))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, StudentRepositoryError> {
        Ok(self.store.lock().await.students.get(&id).cloned())
    }

    async fn create(&self, profile: StudentProfile) -> Result<Student, StudentRepositoryError> {
        let mut store = self.store.lock().await;
        if let Some(field) = store.collision(&profile, None) {
            return Err(StudentRepositoryError::duplicate(field));
        }
        let id = store.next_id()?;
        let student = Student::enrol(id, profile, Utc::now());
        store.students.insert(id, student.clone());
        Ok(student)
    }

    async fn update_full(
        &self,
        id: StudentId,
        profile: StudentProfile,
    ) -> Result<Student, StudentRepositoryError> {
        let mut store = self.store.lock().await;
        if !store.students.contains_key(&id) {
            return Err(StudentRepositoryError::not_found());
        }
        if let Some(field) = store.collision(&profile, Some(id)) {
            return Err(StudentRepositoryError::duplicate(field));
        }
        let student = store.get_mut(id)?;
        student.apply_profile(profile);
        Ok(student.clone())
    }

    async fn update_field(
        &self,
        id: StudentId,
        update: StudentFieldUpdate,
    ) -> Result<Student, StudentRepositoryError> {
        let mut store = self.store.lock().await;
        let student = store.get_mut(id)?;
        match update {
            StudentFieldUpdate::Gpa(gpa) => student.gpa = gpa,
            StudentFieldUpdate::Status { expected, status } => {
                if student.status != expected {
                    return Err(StudentRepositoryError::status_changed());
                }
                student.status = status;
            }
        }
        Ok(student.clone())
    }

    async fn delete(
        &self,
        id: StudentId,
        expected_status: StudentStatus,
    ) -> Result<(), StudentRepositoryError> {
        let mut store = self.store.lock().await;
        if store.get_mut(id)?.status != expected_status {
            return Err(StudentRepositoryError::status_changed());
        }
        store.students.remove(&id);
        Ok(())
    }
}
