//! PostgreSQL-backed `StudentRepository` implementation using Diesel ORM.
//!
//! Uniqueness is enforced by the table's unique constraints and mapped back
//! to [`DuplicateField`](crate::domain::ports::DuplicateField) by constraint
//! name. Status updates and deletes carry the expected status in their
//! `WHERE` clause; when nothing matches, a follow-up lookup distinguishes a
//! missing row from a concurrent status change.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{StudentRepository, StudentRepositoryError};
use crate::domain::{
    Student, StudentFieldUpdate, StudentFilter, StudentId, StudentProfile, StudentStatus,
};

use super::models::{NewStudentRow, StudentProfileChangeset, StudentRow};
use super::pool::DbPool;
use super::schema::students;
use super::student_persistence_error_mapping::{map_diesel_error, map_pool_error, map_row_error};

/// Diesel-backed implementation of the `StudentRepository` port.
#[derive(Clone)]
pub struct DieselStudentRepository {
    pool: DbPool,
}

impl DieselStudentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_student(row: StudentRow) -> Result<Student, StudentRepositoryError> {
    let id = row.id;
    Student::try_from(row).map_err(|err| map_row_error(id, err))
}

/// Resolve a conditional write that matched no rows.
async fn classify_missed_write(
    conn: &mut AsyncPgConnection,
    id: StudentId,
) -> StudentRepositoryError {
    let exists = students::table
        .find(id.get())
        .select(students::id)
        .first::<i64>(conn)
        .await
        .optional();
    match exists {
        Ok(Some(_)) => StudentRepositoryError::status_changed(),
        Ok(None) => StudentRepositoryError::not_found(),
        Err(err) => map_diesel_error(err),
    }
}

#[async_trait]
impl StudentRepository for DieselStudentRepository {
    async fn find_all(
        &self,
        filter: StudentFilter,
    ) -> Result<Vec<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = students::table.into_boxed();
        if let Some(major) = filter.major {
            query = query.filter(students::major.eq(major.as_str()));
        }
        if let Some(status) = filter.status {
            query = query.filter(students::status.eq(status.as_str()));
        }
        let rows: Vec<StudentRow> = query
            .order(students::id.asc())
            .select(StudentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_student).collect()
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<StudentRow> = students::table
            .find(id.get())
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_student).transpose()
    }

    async fn create(&self, profile: StudentProfile) -> Result<Student, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: StudentRow = diesel::insert_into(students::table)
            .values(NewStudentRow::from(&profile))
            .returning(StudentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_student(row)
    }

    async fn update_full(
        &self,
        id: StudentId,
        profile: StudentProfile,
    ) -> Result<Student, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<StudentRow> = diesel::update(students::table.find(id.get()))
            .set(StudentProfileChangeset::from(&profile))
            .returning(StudentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.ok_or_else(StudentRepositoryError::not_found)
            .and_then(row_to_student)
    }

    async fn update_field(
        &self,
        id: StudentId,
        update: StudentFieldUpdate,
    ) -> Result<Student, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        match update {
            StudentFieldUpdate::Gpa(gpa) => {
                let row: Option<StudentRow> = diesel::update(students::table.find(id.get()))
                    .set(students::gpa.eq(gpa.value()))
                    .returning(StudentRow::as_returning())
                    .get_result(&mut conn)
                    .await
                    .optional()
                    .map_err(map_diesel_error)?;
                row.ok_or_else(StudentRepositoryError::not_found)
                    .and_then(row_to_student)
            }
            StudentFieldUpdate::Status { expected, status } => {
                let target = students::table
                    .filter(students::id.eq(id.get()))
                    .filter(students::status.eq(expected.as_str()));
                let row: Option<StudentRow> = diesel::update(target)
                    .set(students::status.eq(status.as_str()))
                    .returning(StudentRow::as_returning())
                    .get_result(&mut conn)
                    .await
                    .optional()
                    .map_err(map_diesel_error)?;
                match row {
                    Some(row) => row_to_student(row),
                    None => Err(classify_missed_write(&mut conn, id).await),
                }
            }
        }
    }

    async fn delete(
        &self,
        id: StudentId,
        expected_status: StudentStatus,
    ) -> Result<(), StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let target = students::table
            .filter(students::id.eq(id.get()))
            .filter(students::status.eq(expected_status.as_str()));
        let deleted = diesel::delete(target)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if deleted == 0 {
            return Err(classify_missed_write(&mut conn, id).await);
        }
        Ok(())
    }
}
