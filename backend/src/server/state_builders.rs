//! Builders for the student repository and HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use backend::domain::StudentService;
use backend::domain::ports::StudentRepository;
use backend::inbound::http::state::HttpState;
use backend::outbound::memory::InMemoryStudentRepository;
use backend::outbound::persistence::{DbPool, DieselStudentRepository};

use super::ServerConfig;

/// Pick the Diesel repository when a pool is configured, otherwise the
/// in-memory store.
pub(crate) fn build_repository(pool: Option<&DbPool>) -> Arc<dyn StudentRepository> {
    match pool {
        Some(pool) => {
            info!(store = "postgres", "student repository ready");
            Arc::new(DieselStudentRepository::new(pool.clone()))
        }
        None => {
            info!(store = "memory", "student repository ready; records are not persisted");
            Arc::new(InMemoryStudentRepository::new())
        }
    }
}

/// Wire the student service into shared handler state.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let repository = build_repository(config.db_pool.as_ref());
    let service = Arc::new(StudentService::new(repository));
    web::Data::new(HttpState::from_service(service))
}
