//! Diesel and pool error mapping for the student repository.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::StudentValidationError;
use crate::domain::ports::{DuplicateField, StudentRepositoryError};

use super::pool::PoolError;

/// Unique constraint guarding `students.student_code`.
pub(crate) const STUDENT_CODE_CONSTRAINT: &str = "students_student_code_key";
/// Unique constraint guarding `students.email`.
pub(crate) const EMAIL_CONSTRAINT: &str = "students_email_key";

pub(crate) fn map_pool_error(error: PoolError) -> StudentRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            StudentRepositoryError::connection(message)
        }
    }
}

fn duplicate_for_constraint(constraint: Option<&str>) -> Option<DuplicateField> {
    match constraint? {
        STUDENT_CODE_CONSTRAINT => Some(DuplicateField::StudentCode),
        EMAIL_CONSTRAINT => Some(DuplicateField::Email),
        _ => None,
    }
}

pub(crate) fn map_diesel_error(error: DieselError) -> StudentRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => StudentRepositoryError::not_found(),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            match duplicate_for_constraint(info.constraint_name()) {
                Some(field) => StudentRepositoryError::duplicate(field),
                None => StudentRepositoryError::query("unique constraint violated"),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StudentRepositoryError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => StudentRepositoryError::query("database query error"),
        _ => StudentRepositoryError::query("database error"),
    }
}

/// Stored rows that no longer satisfy the domain rules surface as query
/// failures.
pub(crate) fn map_row_error(id: i64, error: StudentValidationError) -> StudentRepositoryError {
    StudentRepositoryError::query(format!("stored student {id} is invalid: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug)]
    struct FakeInfo {
        constraint: Option<&'static str>,
    }

    impl diesel::result::DatabaseErrorInformation for FakeInfo {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("students")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn unique_violation(constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(FakeInfo { constraint }),
        )
    }

    #[rstest]
    #[case(Some(STUDENT_CODE_CONSTRAINT), StudentRepositoryError::duplicate(DuplicateField::StudentCode))]
    #[case(Some(EMAIL_CONSTRAINT), StudentRepositoryError::duplicate(DuplicateField::Email))]
    #[case(Some("other_key"), StudentRepositoryError::query("unique constraint violated"))]
    #[case(None, StudentRepositoryError::query("unique constraint violated"))]
    fn unique_violations_map_by_constraint(
        #[case] constraint: Option<&'static str>,
        #[case] expected: StudentRepositoryError,
    ) {
        assert_eq!(map_diesel_error(unique_violation(constraint)), expected);
    }

    #[rstest]
    fn closed_connection_is_a_connection_error() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new(FakeInfo { constraint: None }),
        );
        assert!(matches!(
            map_diesel_error(error),
            StudentRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn pool_errors_are_connection_errors() {
        assert_eq!(
            map_pool_error(PoolError::checkout("timed out")),
            StudentRepositoryError::connection("timed out")
        );
    }
}
