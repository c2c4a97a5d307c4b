//! Diesel row models for the `students` table.
//!
//! These types never leave the persistence adapter; conversion into domain
//! types re-validates every column so a hand-edited row cannot produce an
//! invalid [`Student`].

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    EmailAddress, Gpa, PersonName, Student, StudentCode, StudentId, StudentProfile,
    StudentValidationError,
};

use super::schema::students;

/// Row struct for reading from the students table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentRow {
    pub id: i64,
    pub student_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub major: String,
    pub gpa: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<StudentRow> for Student {
    type Error = StudentValidationError;

    fn try_from(row: StudentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: StudentId::new(row.id)?,
            student_code: StudentCode::new(row.student_code)?,
            first_name: PersonName::for_field("firstName", row.first_name)?,
            last_name: PersonName::for_field("lastName", row.last_name)?,
            email: EmailAddress::new(row.email)?,
            major: row.major.parse()?,
            gpa: Gpa::new(row.gpa)?,
            status: row.status.parse()?,
            created_at: row.created_at,
        })
    }
}

/// Insertable struct for new students; `gpa`, `status` and `created_at`
/// take their column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = students)]
pub(crate) struct NewStudentRow<'a> {
    pub student_code: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub major: &'a str,
}

/// Changeset replacing the client-editable columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = students)]
pub(crate) struct StudentProfileChangeset<'a> {
    pub student_code: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub major: &'a str,
}

impl<'a> From<&'a StudentProfile> for NewStudentRow<'a> {
    fn from(profile: &'a StudentProfile) -> Self {
        Self {
            student_code: profile.student_code.as_ref(),
            first_name: profile.first_name.as_ref(),
            last_name: profile.last_name.as_ref(),
            email: profile.email.as_ref(),
            major: profile.major.as_str(),
        }
    }
}

impl<'a> From<&'a StudentProfile> for StudentProfileChangeset<'a> {
    fn from(profile: &'a StudentProfile) -> Self {
        Self {
            student_code: profile.student_code.as_ref(),
            first_name: profile.first_name.as_ref(),
            last_name: profile.last_name.as_ref(),
            email: profile.email.as_ref(),
            major: profile.major.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Major, StudentStatus};
    use rstest::{fixture, rstest};

    #[fixture]
    fn row() -> StudentRow {
        StudentRow {
            id: 12,
            student_code: "6501234567".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@uni.ac.th".into(),
            major: "IT".into(),
            gpa: 3.1,
            status: "suspended".into(),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn valid_row_converts(row: StudentRow) {
        let student = Student::try_from(row).expect("valid row");
        assert_eq!(student.id.get(), 12);
        assert_eq!(student.major, Major::InformationTechnology);
        assert_eq!(student.status, StudentStatus::Suspended);
    }

    #[rstest]
    fn blank_last_name_names_the_column(mut row: StudentRow) {
        row.last_name = "   ".into();
        assert_eq!(
            Student::try_from(row),
            Err(StudentValidationError::EmptyName { field: "lastName" })
        );
    }

    #[rstest]
    fn unknown_status_is_rejected(mut row: StudentRow) {
        row.status = "expelled".into();
        assert_eq!(
            Student::try_from(row),
            Err(StudentValidationError::InvalidStatus)
        );
    }

    #[rstest]
    fn out_of_range_gpa_is_rejected(mut row: StudentRow) {
        row.gpa = 4.5;
        assert_eq!(
            Student::try_from(row),
            Err(StudentValidationError::GpaOutOfRange)
        );
    }
}
