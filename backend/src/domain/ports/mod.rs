//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`StudentRepository`) are implemented by outbound adapters;
//! driving ports (`StudentsQuery`, `StudentsCommand`) are implemented by the
//! domain service and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod student_repository;
mod students_command;
mod students_query;

#[cfg(test)]
pub use student_repository::MockStudentRepository;
pub use student_repository::{DuplicateField, StudentRepository, StudentRepositoryError};
#[cfg(test)]
pub use students_command::MockStudentsCommand;
pub use students_command::{
    STUDENT_DELETED_MESSAGE, StudentDeleted, StudentsCommand, UpdateGpaRequest,
    UpdateStatusRequest, UpdateStudentRequest,
};
#[cfg(test)]
pub use students_query::MockStudentsQuery;
pub use students_query::{ListStudentsRequest, StudentList, StudentsQuery};
