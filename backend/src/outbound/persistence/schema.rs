//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Student records. `id` is a `BIGSERIAL` primary key.
    students (id) {
        id -> Int8,
        /// Exactly ten ASCII digits; unique (`students_student_code_key`).
        student_code -> Varchar,
        first_name -> Varchar,
        last_name -> Varchar,
        /// Unique (`students_email_key`).
        email -> Varchar,
        /// One of CS, SE, IT, CE, DS.
        major -> Varchar,
        gpa -> Float8,
        /// One of active, graduated, suspended, withdrawn.
        status -> Varchar,
        created_at -> Timestamptz,
    }
}
