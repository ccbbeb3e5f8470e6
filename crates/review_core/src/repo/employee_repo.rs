//! Employee existence lookup used for review foreign-key validation.
//!
//! # Responsibility
//! - Define the single-method collaborator contract reviews validate against.
//! - Provide a SQLite implementation over the `employees` table.
//!
//! # Invariants
//! - Lookups are read-only and never create or modify employees.
//! - A missing `employees` table is a transport error, not "not found".

use crate::repo::review_repo::RepoResult;
use rusqlite::Connection;
use std::collections::HashSet;

/// Primary key of an employee row.
pub type EmployeeId = i64;

/// Table holding the employees reviews refer to.
pub const EMPLOYEES_TABLE: &str = "employees";

/// Answers whether an employee with the given id exists.
pub trait EmployeeLookup {
    fn employee_exists(&self, id: EmployeeId) -> RepoResult<bool>;
}

impl<T: EmployeeLookup + ?Sized> EmployeeLookup for &T {
    fn employee_exists(&self, id: EmployeeId) -> RepoResult<bool> {
        (**self).employee_exists(id)
    }
}

/// Fixed set of known employee ids, handy for embedding and tests.
impl EmployeeLookup for HashSet<EmployeeId> {
    fn employee_exists(&self, id: EmployeeId) -> RepoResult<bool> {
        Ok(self.contains(&id))
    }
}

/// SQLite-backed employee lookup.
pub struct SqliteEmployeeLookup<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeLookup<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EmployeeLookup for SqliteEmployeeLookup<'_> {
    fn employee_exists(&self, id: EmployeeId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            &format!("SELECT EXISTS(SELECT 1 FROM {EMPLOYEES_TABLE} WHERE id = ?1);"),
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}
