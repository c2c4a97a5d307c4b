//! Student record handlers.
//!
//! ```text
//! GET    /api/students?major=CS&status=active
//! GET    /api/students/{id}
//! POST   /api/students
//! PUT    /api/students/{id}
//! PATCH  /api/students/{id}/gpa     {"gpa": 3.25}
//! PATCH  /api/students/{id}/status  {"status": "graduated"}
//! DELETE /api/students/{id}
//! ```
//!
//! Successful responses use the `{"success": true, "data": ...}` envelope.
//! Handlers only parse the transport shape; every field rule is enforced by
//! the domain service behind [`HttpState`].

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::domain::StudentDraft;
use crate::domain::ports::{
    ListStudentsRequest, UpdateGpaRequest, UpdateStatusRequest, UpdateStudentRequest,
};
use crate::domain::validation::parse_id;
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope;
use crate::inbound::http::schemas::{
    ErrorEnvelopeSchema, StudentDeletedEnvelopeSchema, StudentEnvelopeSchema,
    StudentListEnvelopeSchema,
};
use crate::inbound::http::state::HttpState;

/// Route prefix for every student endpoint.
pub const STUDENTS_SCOPE: &str = "/api/students";

/// Optional list filters.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListStudentsQuery {
    /// Major code (CS, SE, IT, CE, DS).
    pub major: Option<String>,
    /// Status (active, graduated, suspended, withdrawn).
    pub status: Option<String>,
}

/// Body for create and full update.
///
/// Accepts camelCase and snake_case spellings.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayload {
    #[serde(alias = "student_code")]
    #[schema(example = "6501234567")]
    pub student_code: Option<String>,
    #[serde(alias = "first_name")]
    #[schema(example = "Ada")]
    pub first_name: Option<String>,
    #[serde(alias = "last_name")]
    #[schema(example = "Lovelace")]
    pub last_name: Option<String>,
    #[schema(example = "ada@uni.ac.th")]
    pub email: Option<String>,
    #[schema(example = "CS")]
    pub major: Option<String>,
}

impl From<StudentPayload> for StudentDraft {
    fn from(value: StudentPayload) -> Self {
        Self {
            student_code: value.student_code,
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            major: value.major,
        }
    }
}

/// Body for `PATCH /api/students/{id}/gpa`.
///
/// Kept as raw JSON so a non-numeric value surfaces as a GPA range failure
/// rather than a body parse error.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct GpaPayload {
    #[serde(default)]
    #[schema(value_type = f64, example = 3.25)]
    pub gpa: Option<Value>,
}

/// Body for `PATCH /api/students/{id}/status`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct StatusPayload {
    #[serde(default)]
    #[schema(value_type = String, example = "graduated")]
    pub status: Option<Value>,
}

fn path_id(path: web::Path<String>) -> ApiResult<i64> {
    Ok(parse_id(&path.into_inner())?.get())
}

/// List students, optionally filtered, with statistics over the result.
#[utoipa::path(
    get,
    path = "/api/students",
    params(ListStudentsQuery),
    responses(
        (status = 200, description = "Students and statistics", body = StudentListEnvelopeSchema),
        (status = 400, description = "Invalid filter", body = ErrorEnvelopeSchema),
        (status = 503, description = "Student store unavailable", body = ErrorEnvelopeSchema)
    ),
    tags = ["students"],
    operation_id = "listStudents"
)]
#[get("")]
pub async fn list_students(
    state: web::Data<HttpState>,
    query: web::Query<ListStudentsQuery>,
) -> ApiResult<HttpResponse> {
    let ListStudentsQuery { major, status } = query.into_inner();
    let list = state
        .students_query
        .list_students(ListStudentsRequest { major, status })
        .await?;
    Ok(envelope::ok(list))
}

/// Fetch one student.
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = i64, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "Student", body = StudentEnvelopeSchema),
        (status = 400, description = "Invalid student ID", body = ErrorEnvelopeSchema),
        (status = 404, description = "Student not found", body = ErrorEnvelopeSchema)
    ),
    tags = ["students"],
    operation_id = "getStudent"
)]
#[get("/{id}")]
pub async fn get_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = path_id(path)?;
    let student = state.students_query.get_student(id).await?;
    Ok(envelope::ok(student))
}

/// Create a student with GPA 0.0 and status active.
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = StudentPayload,
    responses(
        (status = 201, description = "Student created", body = StudentEnvelopeSchema),
        (status = 400, description = "Validation failed", body = ErrorEnvelopeSchema),
        (status = 409, description = "Student code or email already exists", body = ErrorEnvelopeSchema)
    ),
    tags = ["students"],
    operation_id = "createStudent"
)]
#[post("")]
pub async fn create_student(
    state: web::Data<HttpState>,
    payload: web::Json<StudentPayload>,
) -> ApiResult<HttpResponse> {
    let student = state
        .students
        .create_student(payload.into_inner().into())
        .await?;
    Ok(envelope::created(student))
}

/// Replace code, names, email and major; GPA and status are kept.
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(("id" = i64, Path, description = "Student identifier")),
    request_body = StudentPayload,
    responses(
        (status = 200, description = "Student updated", body = StudentEnvelopeSchema),
        (status = 400, description = "Validation failed", body = ErrorEnvelopeSchema),
        (status = 404, description = "Student not found", body = ErrorEnvelopeSchema),
        (status = 409, description = "Student code or email already exists", body = ErrorEnvelopeSchema)
    ),
    tags = ["students"],
    operation_id = "updateStudent"
)]
#[put("/{id}")]
pub async fn update_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<StudentPayload>,
) -> ApiResult<HttpResponse> {
    let id = path_id(path)?;
    let student = state
        .students
        .update_student(UpdateStudentRequest {
            id,
            draft: payload.into_inner().into(),
        })
        .await?;
    Ok(envelope::ok(student))
}

#[utoipa::path(
    patch,
    path = "/api/students/{id}/gpa",
    params(("id" = i64, Path, description = "Student identifier")),
    request_body = GpaPayload,
    responses(
        (status = 200, description = "GPA updated", body = StudentEnvelopeSchema),
        (status = 400, description = "GPA out of range", body = ErrorEnvelopeSchema),
        (status = 404, description = "Student not found", body = ErrorEnvelopeSchema)
    ),
    tags = ["students"],
    operation_id = "updateStudentGpa"
)]
#[patch("/{id}/gpa")]
pub async fn update_gpa(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<GpaPayload>,
) -> ApiResult<HttpResponse> {
    let id = path_id(path)?;
    let gpa = payload.into_inner().gpa.as_ref().and_then(Value::as_f64);
    let student = state
        .students
        .update_gpa(UpdateGpaRequest { id, gpa })
        .await?;
    Ok(envelope::ok(student))
}

#[utoipa::path(
    patch,
    path = "/api/students/{id}/status",
    params(("id" = i64, Path, description = "Student identifier")),
    request_body = StatusPayload,
    responses(
        (status = 200, description = "Status updated", body = StudentEnvelopeSchema),
        (status = 400, description = "Invalid status", body = ErrorEnvelopeSchema),
        (status = 404, description = "Student not found", body = ErrorEnvelopeSchema),
        (status = 409, description = "Student is withdrawn", body = ErrorEnvelopeSchema)
    ),
    tags = ["students"],
    operation_id = "updateStudentStatus"
)]
#[patch("/{id}/status")]
pub async fn update_status(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<StatusPayload>,
) -> ApiResult<HttpResponse> {
    let id = path_id(path)?;
    let status = payload
        .into_inner()
        .status
        .and_then(|value| value.as_str().map(str::to_owned));
    let student = state
        .students
        .update_status(UpdateStatusRequest { id, status })
        .await?;
    Ok(envelope::ok(student))
}

/// Delete a student that is no longer active.
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = i64, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "Student deleted", body = StudentDeletedEnvelopeSchema),
        (status = 400, description = "Invalid student ID", body = ErrorEnvelopeSchema),
        (status = 404, description = "Student not found", body = ErrorEnvelopeSchema),
        (status = 409, description = "Student is active", body = ErrorEnvelopeSchema)
    ),
    tags = ["students"],
    operation_id = "deleteStudent"
)]
#[delete("/{id}")]
pub async fn delete_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = path_id(path)?;
    let deleted = state.students.delete_student(id).await?;
    Ok(envelope::ok(deleted))
}

/// Register the student scope on an app or scope.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::students;
///
/// let _app = App::new().configure(students::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(STUDENTS_SCOPE)
            .service(list_students)
            .service(create_student)
            .service(get_student)
            .service(update_student)
            .service(update_gpa)
            .service(update_status)
            .service(delete_student),
    );
}
