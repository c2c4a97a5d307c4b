//! Aggregate statistics over a set of student records.

use serde::{Deserialize, Serialize};

use super::student::{Student, StudentStatus};

/// Summary counts and mean GPA for a list result.
///
/// `avg_gpa` is the population mean rounded half away from zero to two
/// decimals; an empty set reports `0.0`. Withdrawn students count towards
/// `total` and the mean but have no counter of their own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentStatistics {
    pub total: usize,
    pub active: usize,
    pub graduated: usize,
    pub suspended: usize,
    #[serde(rename = "avgGPA")]
    pub avg_gpa: f64,
}

impl StudentStatistics {
    /// Compute statistics; the result does not depend on slice order.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::StudentStatistics;
    ///
    /// let stats = StudentStatistics::from_students(&[]);
    /// assert_eq!(stats.total, 0);
    /// assert_eq!(stats.avg_gpa, 0.0);
    /// ```
    pub fn from_students(students: &[Student]) -> Self {
        let mut stats = students.iter().fold(Self::default(), |mut acc, student| {
            match student.status {
                StudentStatus::Active => acc.active += 1,
                StudentStatus::Graduated => acc.graduated += 1,
                StudentStatus::Suspended => acc.suspended += 1,
                StudentStatus::Withdrawn => {}
            }
            acc.total += 1;
            acc
        });
        if stats.total > 0 {
            // Summing sorted values keeps the float result order independent.
            let mut gpas: Vec<f64> = students.iter().map(|s| s.gpa.value()).collect();
            gpas.sort_by(f64::total_cmp);
            let mean = gpas.iter().sum::<f64>() / stats.total as f64;
            stats.avg_gpa = round_to_cents(mean);
        }
        stats
    }
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::student::{
        EmailAddress, Gpa, Major, PersonName, StudentCode, StudentId, StudentProfile,
    };
    use chrono::Utc;
    use rstest::rstest;

    fn student(id: i64, status: StudentStatus, gpa: f64) -> Student {
        let profile = StudentProfile {
            student_code: StudentCode::new(format!("{id:010}")).expect("code"),
            first_name: PersonName::new("Test").expect("name"),
            last_name: PersonName::new("Student").expect("name"),
            email: EmailAddress::new(format!("s{id}@uni.ac.th")).expect("email"),
            major: Major::SoftwareEngineering,
        };
        let mut record = Student::enrol(StudentId::new(id).expect("id"), profile, Utc::now());
        record.status = status;
        record.gpa = Gpa::new(gpa).expect("gpa");
        record
    }

    #[rstest]
    fn empty_set_reports_zero() {
        assert_eq!(
            StudentStatistics::from_students(&[]),
            StudentStatistics::default()
        );
    }

    #[rstest]
    fn counts_and_mean() {
        let students = [
            student(1, StudentStatus::Active, 3.0),
            student(2, StudentStatus::Graduated, 4.0),
        ];
        let stats = StudentStatistics::from_students(&students);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.active, 1);
        assert_eq!(stats.graduated, 1);
        assert_eq!(stats.suspended, 0);
        assert_eq!(stats.avg_gpa, 3.5);
    }

    #[rstest]
    fn withdrawn_counts_only_towards_total() {
        let students = [
            student(1, StudentStatus::Withdrawn, 2.0),
            student(2, StudentStatus::Suspended, 1.0),
        ];
        let stats = StudentStatistics::from_students(&students);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.active + stats.graduated + stats.suspended, 1);
        assert_eq!(stats.avg_gpa, 1.5);
    }

    #[rstest]
    #[case(&[3.0, 3.0, 3.5], 3.17)]
    #[case(&[2.0, 2.5, 2.5], 2.33)]
    #[case(&[0.0, 4.0, 4.0], 2.67)]
    fn mean_is_rounded_to_two_decimals(#[case] gpas: &[f64], #[case] expected: f64) {
        let students: Vec<Student> = gpas
            .iter()
            .enumerate()
            .map(|(i, gpa)| student(i as i64 + 1, StudentStatus::Active, *gpa))
            .collect();
        assert_eq!(
            StudentStatistics::from_students(&students).avg_gpa,
            expected
        );
    }

    #[rstest]
    fn order_does_not_matter() {
        let mut students = vec![
            student(1, StudentStatus::Active, 0.1),
            student(2, StudentStatus::Graduated, 0.2),
            student(3, StudentStatus::Suspended, 3.7),
        ];
        let forward = StudentStatistics::from_students(&students);
        students.reverse();
        assert_eq!(StudentStatistics::from_students(&students), forward);
    }

    #[rstest]
    fn serialises_avg_gpa_key() {
        let value = serde_json::to_value(StudentStatistics::default()).expect("json");
        assert_eq!(
            value,
            serde_json::json!({
                "total": 0, "active": 0, "graduated": 0, "suspended": 0, "avgGPA": 0.0
            })
        );
    }
}
