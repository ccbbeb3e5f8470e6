//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Map `Review` records to the `reviews` table and back.
//! - Define the employee existence contract used for reference checks.
//! - Hold the identity map of saved reviews.
//!
//! # Invariants
//! - Every hydrated or written review has passed field validation.
//! - Storage transport errors propagate except on `save`, which reports them
//!   through `SaveOutcome`.

pub mod employee_repo;
pub mod registry;
pub mod review_repo;
