//! Driving port for student reads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Student, StudentStatistics};

/// Raw list filters as received from a client.
///
/// Empty strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListStudentsRequest {
    pub major: Option<String>,
    pub status: Option<String>,
}

/// Filtered students with statistics over exactly that subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentList {
    pub students: Vec<Student>,
    pub statistics: StudentStatistics,
}

/// Read-side use cases consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentsQuery: Send + Sync {
    /// List students matching the optional major and status filters.
    async fn list_students(&self, request: ListStudentsRequest) -> Result<StudentList, Error>;

    /// Fetch one student by raw identifier.
    async fn get_student(&self, id: i64) -> Result<Student, Error>;
}
