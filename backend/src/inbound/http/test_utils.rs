//! Test helpers for inbound HTTP components.

use chrono::{TimeZone, Utc};

use crate::domain::{
    EmailAddress, Major, PersonName, Student, StudentCode, StudentId, StudentProfile,
};

/// Build an active student whose code and email derive from `id`.
pub fn student_fixture(id: i64) -> Student {
    let profile = StudentProfile {
        student_code: StudentCode::new(format!("{id:010}")).expect("fixture code"),
        first_name: PersonName::new("Ada").expect("fixture first name"),
        last_name: PersonName::new("Lovelace").expect("fixture last name"),
        email: EmailAddress::new(format!("student{id}@uni.ac.th")).expect("fixture email"),
        major: Major::ComputerScience,
    };
    let created_at = Utc
        .with_ymd_and_hms(2024, 8, 1, 9, 0, 0)
        .single()
        .expect("fixture timestamp");
    Student::enrol(StudentId::new(id).expect("fixture id"), profile, created_at)
}
