//! Core persistence for performance reviews.
//! This crate owns review validation, the `reviews` table mapping and the
//! identity map of saved reviews.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig, LoggingError};
pub use model::review::{Review, ReviewId, ReviewValidationError, MIN_REVIEW_YEAR};
pub use repo::employee_repo::{EmployeeId, EmployeeLookup, SqliteEmployeeLookup};
pub use repo::registry::ReviewRegistry;
pub use repo::review_repo::{
    RepoError, RepoResult, ReviewRepository, ReviewRow, SaveOutcome, SqliteReviewRepository,
};
