//! Success envelope shared by the student endpoints.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;

/// `{"success": true, "data": ...}` wrapper around a handler result.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    success: bool,
    data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }

    /// Render the envelope with the given status.
    pub fn respond(self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }
}

/// 200 OK with `data` wrapped in the success envelope.
pub fn ok<T: Serialize>(data: T) -> HttpResponse {
    Envelope::new(data).respond(StatusCode::OK)
}

/// 201 Created with `data` wrapped in the success envelope.
pub fn created<T: Serialize>(data: T) -> HttpResponse {
    Envelope::new(data).respond(StatusCode::CREATED)
}
