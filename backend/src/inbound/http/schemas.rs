//! OpenAPI schema definitions for domain types and response envelopes.
//!
//! Domain types stay free of `utoipa` derives; the wrappers here mirror their
//! wire shape and register under the domain names.

use utoipa::ToSchema;

/// Stable machine-readable error codes.
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    #[schema(rename = "not_found")]
    NotFound,
    #[schema(rename = "conflict")]
    Conflict,
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Failure envelope returned by every endpoint.
#[derive(ToSchema)]
#[schema(as = ErrorEnvelope, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorEnvelopeSchema {
    /// Always `false`.
    #[schema(example = false)]
    success: bool,
    code: ErrorCodeSchema,
    #[schema(example = "Student not found")]
    message: String,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Offending field and detail code for validation failures.
    details: Option<serde_json::Value>,
}

#[derive(ToSchema)]
#[schema(as = Major)]
pub enum MajorSchema {
    #[schema(rename = "CS")]
    Cs,
    #[schema(rename = "SE")]
    Se,
    #[schema(rename = "IT")]
    It,
    #[schema(rename = "CE")]
    Ce,
    #[schema(rename = "DS")]
    Ds,
}

#[derive(ToSchema)]
#[schema(as = StudentStatus)]
pub enum StudentStatusSchema {
    #[schema(rename = "active")]
    Active,
    #[schema(rename = "graduated")]
    Graduated,
    #[schema(rename = "suspended")]
    Suspended,
    #[schema(rename = "withdrawn")]
    Withdrawn,
}

/// Stored student record.
#[derive(ToSchema)]
#[schema(as = Student, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct StudentSchema {
    #[schema(example = 1)]
    id: i64,
    #[schema(example = "6501234567")]
    student_code: String,
    #[schema(example = "Ada")]
    first_name: String,
    #[schema(example = "Lovelace")]
    last_name: String,
    #[schema(example = "ada@uni.ac.th")]
    email: String,
    major: MajorSchema,
    #[schema(example = 3.25, minimum = 0.0, maximum = 4.0)]
    gpa: f64,
    status: StudentStatusSchema,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// Aggregates over a list result.
#[derive(ToSchema)]
#[schema(as = StudentStatistics)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct StudentStatisticsSchema {
    total: u64,
    active: u64,
    graduated: u64,
    suspended: u64,
    /// Mean GPA rounded to two decimals; 0 for an empty list.
    #[schema(rename = "avgGPA", example = 3.5)]
    avg_gpa: f64,
}

#[derive(ToSchema)]
#[schema(as = StudentList)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct StudentListSchema {
    students: Vec<StudentSchema>,
    statistics: StudentStatisticsSchema,
}

#[derive(ToSchema)]
#[schema(as = StudentDeleted)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct StudentDeletedSchema {
    #[schema(example = 1)]
    id: i64,
    #[schema(example = "Student deleted successfully")]
    message: String,
}

/// Success envelope carrying one student.
#[derive(ToSchema)]
#[schema(as = StudentEnvelope)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct StudentEnvelopeSchema {
    #[schema(example = true)]
    success: bool,
    data: StudentSchema,
}

/// Success envelope carrying a filtered list.
#[derive(ToSchema)]
#[schema(as = StudentListEnvelope)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct StudentListEnvelopeSchema {
    #[schema(example = true)]
    success: bool,
    data: StudentListSchema,
}

/// Success envelope carrying a delete confirmation.
#[derive(ToSchema)]
#[schema(as = StudentDeletedEnvelope)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct StudentDeletedEnvelopeSchema {
    #[schema(example = true)]
    success: bool,
    data: StudentDeletedSchema,
}
