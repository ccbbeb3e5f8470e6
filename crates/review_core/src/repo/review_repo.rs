//! Review repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Own the `reviews` table lifecycle (create/drop).
//! - Provide row lifecycle APIs: save, create, hydrate, find, update, delete, list.
//! - Keep the identity map in step with saves and deletes.
//!
//! # Invariants
//! - Every statement runs in SQLite autocommit mode; nothing spans statements.
//! - Hydration re-runs full field validation, including the employee lookup.
//! - `save` never returns an error: failures come back as `SaveOutcome::Failed`
//!   after being logged.
//! - `delete` clears the review id only when the id was registered.

use crate::db::DbError;
use crate::model::review::{
    validate_summary, validate_year, Review, ReviewId, ReviewValidationError,
};
use crate::repo::employee_repo::{EmployeeId, EmployeeLookup};
use crate::repo::registry::ReviewRegistry;
use log::{debug, error, info};
use rusqlite::types::{Value, ValueRef};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Table persisting review rows.
pub const REVIEWS_TABLE: &str = "reviews";

/// Table named by the `employee_id` foreign key clause.
///
/// SQLite never checks this reference (`foreign_keys` is off), so it may
/// differ from the table `SqliteEmployeeLookup` reads.
pub const EMPLOYEE_REFERENCE_TABLE: &str = "employee";

const REVIEW_SELECT_SQL: &str = "SELECT
    id,
    year,
    summary,
    employee_id
FROM reviews";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for review persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ReviewValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted review data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ReviewValidationError> for RepoError {
    fn from(value: ReviewValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Result of `ReviewRepository::save`.
///
/// A failed save is reported here instead of through `Err`, so callers that
/// ignore the outcome keep running with an unsaved review.
#[derive(Debug)]
pub enum SaveOutcome {
    /// Row inserted; carries the storage-assigned id.
    Saved(ReviewId),
    /// Insert or id read-back failed; the review was left untouched.
    Failed(RepoError),
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }

    pub fn id(&self) -> Option<ReviewId> {
        match self {
            Self::Saved(id) => Some(*id),
            Self::Failed(_) => None,
        }
    }

    /// Converts into a regular result for callers that want hard failures.
    pub fn into_result(self) -> RepoResult<ReviewId> {
        match self {
            Self::Saved(id) => Ok(id),
            Self::Failed(err) => Err(err),
        }
    }
}

/// Raw positional review row `(id, year, summary, employee_id)`.
///
/// Values keep their storage type so hydration can reject non-integer years
/// or non-text summaries with the matching validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRow {
    pub id: ReviewId,
    pub year: Value,
    pub summary: Value,
    pub employee_id: Value,
}

impl ReviewRow {
    fn read(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: row.get("id")?,
            year: read_value(row, "year")?,
            summary: read_value(row, "summary")?,
            employee_id: read_value(row, "employee_id")?,
        })
    }
}

impl From<(ReviewId, i64, String, EmployeeId)> for ReviewRow {
    fn from((id, year, summary, employee_id): (ReviewId, i64, String, EmployeeId)) -> Self {
        Self {
            id,
            year: Value::Integer(year),
            summary: Value::Text(summary),
            employee_id: Value::Integer(employee_id),
        }
    }
}

impl From<(ReviewId, i64, &str, EmployeeId)> for ReviewRow {
    fn from((id, year, summary, employee_id): (ReviewId, i64, &str, EmployeeId)) -> Self {
        Self::from((id, year, summary.to_string(), employee_id))
    }
}

/// Repository interface for review table and row lifecycle.
pub trait ReviewRepository {
    /// Creates the `reviews` table if it does not exist.
    fn create_table(&self) -> RepoResult<()>;
    /// Drops the `reviews` table if it exists.
    fn drop_table(&self) -> RepoResult<()>;
    /// Builds an unsaved review validated against this repository's lookup.
    fn new_review(
        &self,
        year: i64,
        summary: &str,
        employee_id: EmployeeId,
    ) -> RepoResult<Review>;
    /// Inserts `review` as a new row, assigns its id and registers it.
    fn save(&mut self, review: &mut Review) -> SaveOutcome;
    /// Rebuilds a review from a raw row, re-running validation.
    fn instance_from_db(&self, row: ReviewRow) -> RepoResult<Review>;
    fn find_by_id(&self, id: ReviewId) -> RepoResult<Option<Review>>;
    /// Writes current field values to the row matching `review.id()`.
    fn update(&self, review: &Review) -> RepoResult<()>;
    /// Deletes the row and, when registered, the identity-map entry and id.
    fn delete(&mut self, review: &mut Review) -> RepoResult<()>;
    /// Returns every stored review in storage order.
    fn get_all(&self) -> RepoResult<Vec<Review>>;

    /// Validates then saves a new review.
    ///
    /// Validation errors are returned; a failed save is logged by `save` and
    /// shows up as a review whose `id()` is `None`.
    fn create(&mut self, year: i64, summary: &str, employee_id: EmployeeId) -> RepoResult<Review> {
        let mut review = self.new_review(year, summary, employee_id)?;
        let _ = self.save(&mut review);
        Ok(review)
    }
}

/// SQLite-backed review repository.
pub struct SqliteReviewRepository<'conn, E> {
    conn: &'conn Connection,
    employees: E,
    registry: ReviewRegistry,
}

impl<'conn, E: EmployeeLookup> SqliteReviewRepository<'conn, E> {
    /// Constructs a repository with an empty identity map.
    pub fn new(conn: &'conn Connection, employees: E) -> Self {
        Self::with_registry(conn, employees, ReviewRegistry::new())
    }

    /// Constructs a repository around an existing identity map.
    pub fn with_registry(conn: &'conn Connection, employees: E, registry: ReviewRegistry) -> Self {
        Self {
            conn,
            employees,
            registry,
        }
    }

    pub fn registry(&self) -> &ReviewRegistry {
        &self.registry
    }

    pub fn employees(&self) -> &E {
        &self.employees
    }

    /// Releases the connection borrow and hands back the identity map.
    pub fn into_registry(self) -> ReviewRegistry {
        self.registry
    }

    fn insert_row(&self, review: &Review) -> RepoResult<ReviewId> {
        self.conn.execute(
            "INSERT INTO reviews (year, summary, employee_id) VALUES (?1, ?2, ?3);",
            params![review.year(), review.summary(), review.employee_id()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }
}

impl<E: EmployeeLookup> ReviewRepository for SqliteReviewRepository<'_, E> {
    fn create_table(&self) -> RepoResult<()> {
        self.conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {REVIEWS_TABLE} (
                id INTEGER PRIMARY KEY,
                year INT,
                summary TEXT,
                employee_id INTEGER,
                FOREIGN KEY (employee_id) REFERENCES {EMPLOYEE_REFERENCE_TABLE}(id)
            );"
        ))?;
        info!("event=review_table module=repo status=ok action=create");
        Ok(())
    }

    fn drop_table(&self) -> RepoResult<()> {
        self.conn
            .execute_batch(&format!("DROP TABLE IF EXISTS {REVIEWS_TABLE};"))?;
        info!("event=review_table module=repo status=ok action=drop");
        Ok(())
    }

    fn new_review(
        &self,
        year: i64,
        summary: &str,
        employee_id: EmployeeId,
    ) -> RepoResult<Review> {
        Review::new(year, summary, employee_id, &self.employees)
    }

    fn save(&mut self, review: &mut Review) -> SaveOutcome {
        match self.insert_row(review) {
            Ok(id) => {
                review.assign_id(id);
                self.registry.register(review);
                info!(
                    "event=review_save module=repo status=ok review_id={id} employee_id={}",
                    review.employee_id()
                );
                SaveOutcome::Saved(id)
            }
            Err(err) => {
                error!(
                    "event=review_save module=repo status=error employee_id={} error={}",
                    review.employee_id(),
                    err
                );
                SaveOutcome::Failed(err)
            }
        }
    }

    fn instance_from_db(&self, row: ReviewRow) -> RepoResult<Review> {
        let year = match row.year {
            Value::Integer(year) => validate_year(year)?,
            _ => return Err(ReviewValidationError::YearNotInteger.into()),
        };
        let summary = match row.summary {
            Value::Text(summary) => validate_summary(summary)?,
            _ => return Err(ReviewValidationError::SummaryNotText.into()),
        };
        let employee_id = match row.employee_id {
            Value::Integer(employee_id) => employee_id,
            _ => return Err(ReviewValidationError::EmployeeIdNotInteger.into()),
        };

        Review::with_id(Some(row.id), year, summary, employee_id, &self.employees)
    }

    fn find_by_id(&self, id: ReviewId) -> RepoResult<Option<Review>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REVIEW_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        let row = match rows.next()? {
            Some(row) => ReviewRow::read(row)?,
            None => return Ok(None),
        };

        Ok(Some(self.instance_from_db(row)?))
    }

    fn update(&self, review: &Review) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE reviews
             SET
                year = ?1,
                summary = ?2,
                employee_id = ?3
             WHERE id = ?4;",
            params![
                review.year(),
                review.summary(),
                review.employee_id(),
                review.id(),
            ],
        )?;

        debug!(
            "event=review_update module=repo status=ok review_id={:?} changed={changed}",
            review.id()
        );
        Ok(())
    }

    fn delete(&mut self, review: &mut Review) -> RepoResult<()> {
        if let Some(id) = review.id() {
            self.conn.execute("DELETE FROM reviews WHERE id = ?1;", [id])?;
        }

        let registered = review
            .id()
            .is_some_and(|id| self.registry.remove(id).is_some());

        if registered {
            info!(
                "event=review_delete module=repo status=ok review_id={:?}",
                review.id()
            );
            review.clear_id();
        } else {
            // Row removal above still happened; only the id is left in place.
            info!(
                "event=review_delete module=repo status=unregistered review_id={:?} detail=review_may_not_have_been_saved",
                review.id()
            );
        }

        Ok(())
    }

    fn get_all(&self) -> RepoResult<Vec<Review>> {
        let mut stmt = self.conn.prepare(&format!("{REVIEW_SELECT_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut raw_rows = Vec::new();
        while let Some(row) = rows.next()? {
            raw_rows.push(ReviewRow::read(row)?);
        }

        raw_rows
            .into_iter()
            .map(|row| self.instance_from_db(row))
            .collect()
    }
}

fn read_value(row: &Row<'_>, column: &str) -> RepoResult<Value> {
    match row.get_ref(column)? {
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .map(|text| Value::Text(text.to_string()))
            .map_err(|_| {
                RepoError::InvalidData(format!("non UTF-8 text in {REVIEWS_TABLE}.{column}"))
            }),
        other => Ok(Value::from(other)),
    }
}
