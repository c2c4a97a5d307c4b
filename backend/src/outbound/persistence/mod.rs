//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Repositories here only translate between Diesel rows and domain types; all
//! business rules stay in the domain service. Row models and the table
//! definition are private to this module.
//!
//! # Example
//!
//! ```no_run
//! use backend::outbound::persistence::{DbPool, DieselStudentRepository, PoolConfig};
//!
//! # async fn build() -> Result<(), backend::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/students")).await?;
//! let _repo = DieselStudentRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_student_repository;
mod migrations;
mod models;
mod pool;
mod schema;
mod student_persistence_error_mapping;

pub use diesel_student_repository::DieselStudentRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
