//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see the driving ports,
//! so they stay testable with mocks and never touch storage directly.

use std::sync::Arc;

use crate::domain::ports::{StudentsCommand, StudentsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub students: Arc<dyn StudentsCommand>,
    pub students_query: Arc<dyn StudentsQuery>,
}

impl HttpState {
    /// Construct state from separate command and query ports.
    pub fn new(students: Arc<dyn StudentsCommand>, students_query: Arc<dyn StudentsQuery>) -> Self {
        Self {
            students,
            students_query,
        }
    }

    /// Construct state from one implementation serving both ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::StudentService;
    /// use backend::inbound::http::state::HttpState;
    /// use backend::outbound::memory::InMemoryStudentRepository;
    ///
    /// let service = StudentService::new(Arc::new(InMemoryStudentRepository::new()));
    /// let _state = HttpState::from_service(Arc::new(service));
    /// ```
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: StudentsCommand + StudentsQuery + 'static,
    {
        Self {
            students: service.clone(),
            students_query: service,
        }
    }
}
