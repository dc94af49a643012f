//! PostgreSQL persistence for Syllabus.
//!
//! This crate provides the Diesel schema, row models and the
//! [`PostgresCourseRepository`] implementation of
//! [`CourseRepository`](syllabus_interface::CourseRepository).
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use syllabus_database::PostgresCourseRepository;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Reads DATABASE_URL and applies pending migrations
//! let repo = Arc::new(PostgresCourseRepository::from_env()?);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod connection;
mod course_repository;
mod models;

// Public modules for external access
pub mod schema;

pub use connection::{
    DATABASE_URL_VAR, MIGRATIONS, PgPool, establish_connection, establish_pool, run_migrations,
};
pub use course_repository::PostgresCourseRepository;
pub use models::{CourseRow, NewCourseRow};

use syllabus_error::DatabaseError;

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
