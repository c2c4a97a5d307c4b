//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the student CRUD endpoints, the health probes and the
//! schema wrappers from [`crate::inbound::http::schemas`]. Swagger UI serves
//! it in debug builds and `openapi-dump` prints it for external tooling.

use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorEnvelopeSchema, MajorSchema, StudentDeletedEnvelopeSchema,
    StudentDeletedSchema, StudentEnvelopeSchema, StudentListEnvelopeSchema, StudentListSchema,
    StudentSchema, StudentStatisticsSchema, StudentStatusSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Student records API",
        description = "CRUD endpoints for university student records with list statistics.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::students::list_students,
        crate::inbound::http::students::get_student,
        crate::inbound::http::students::create_student,
        crate::inbound::http::students::update_student,
        crate::inbound::http::students::update_gpa,
        crate::inbound::http::students::update_status,
        crate::inbound::http::students::delete_student,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        StudentSchema,
        MajorSchema,
        StudentStatusSchema,
        StudentStatisticsSchema,
        StudentListSchema,
        StudentDeletedSchema,
        StudentEnvelopeSchema,
        StudentListEnvelopeSchema,
        StudentDeletedEnvelopeSchema,
        ErrorEnvelopeSchema,
        ErrorCodeSchema,
    )),
    tags(
        (name = "students", description = "Student record management"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
