//! Domain model for performance reviews.
//!
//! # Responsibility
//! - Define the `Review` record and its field-level validation rules.
//!
//! # Invariants
//! - A `Review` value never holds an invalid year, summary or employee id;
//!   every constructor and setter validates before assigning.
//! - `id` is owned by persistence: it is assigned on insert and cleared on
//!   registered delete only.

pub mod review;
