//! Review domain model.
//!
//! # Responsibility
//! - Hold one performance review tied to one employee.
//! - Validate `year`, `summary` and `employee_id` on every assignment.
//!
//! # Invariants
//! - `year >= MIN_REVIEW_YEAR`.
//! - `summary` is never empty.
//! - `employee_id` resolved to an existing employee when it was assigned.
//! - Constructors validate in field order `year -> summary -> employee_id`
//!   and stop at the first failure.

use crate::repo::employee_repo::{EmployeeId, EmployeeLookup};
use crate::repo::review_repo::{RepoError, RepoResult};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Primary key assigned by storage on insert.
pub type ReviewId = i64;

/// Earliest accepted review year.
pub const MIN_REVIEW_YEAR: i64 = 2000;

/// Field validation failure for review attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewValidationError {
    /// Year is below `MIN_REVIEW_YEAR`.
    YearTooEarly(i64),
    /// Stored year value is not an integer.
    YearNotInteger,
    /// Summary is the empty string.
    EmptySummary,
    /// Stored summary value is not text.
    SummaryNotText,
    /// No employee exists with this id.
    UnknownEmployee(EmployeeId),
    /// Stored employee id is not an integer.
    EmployeeIdNotInteger,
}

impl Display for ReviewValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::YearTooEarly(_) | Self::YearNotInteger => {
                write!(f, "Number is less than {MIN_REVIEW_YEAR}")
            }
            Self::EmptySummary | Self::SummaryNotText => write!(f, "Summary should not be empty"),
            Self::UnknownEmployee(_) | Self::EmployeeIdNotInteger => write!(
                f,
                "Employee ID must be the ID of an existing Employee instance."
            ),
        }
    }
}

impl Error for ReviewValidationError {}

/// One performance review record.
///
/// Fields are private so that every mutation goes through a validating
/// setter. Equality compares all fields, including `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    id: Option<ReviewId>,
    year: i64,
    summary: String,
    employee_id: EmployeeId,
}

impl Review {
    /// Creates an unsaved review.
    ///
    /// # Errors
    /// - `RepoError::Validation` for the first invalid field.
    /// - `RepoError::Db` when the employee lookup itself fails.
    pub fn new(
        year: i64,
        summary: impl Into<String>,
        employee_id: EmployeeId,
        employees: &dyn EmployeeLookup,
    ) -> RepoResult<Self> {
        Self::with_id(None, year, summary, employee_id, employees)
    }

    /// Creates a review carrying an existing primary key.
    ///
    /// Used by hydration from storage; validation is identical to `new`.
    pub fn with_id(
        id: Option<ReviewId>,
        year: i64,
        summary: impl Into<String>,
        employee_id: EmployeeId,
        employees: &dyn EmployeeLookup,
    ) -> RepoResult<Self> {
        let year = validate_year(year)?;
        let summary = validate_summary(summary.into())?;
        let employee_id = validate_employee_id(employee_id, employees)?;

        Ok(Self {
            id,
            year,
            summary,
            employee_id,
        })
    }

    pub fn id(&self) -> Option<ReviewId> {
        self.id
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    /// Returns whether this review currently carries a storage id.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Replaces the year. The previous value is kept on failure.
    pub fn set_year(&mut self, year: i64) -> Result<(), ReviewValidationError> {
        self.year = validate_year(year)?;
        Ok(())
    }

    /// Replaces the summary. The previous value is kept on failure.
    pub fn set_summary(&mut self, summary: impl Into<String>) -> Result<(), ReviewValidationError> {
        self.summary = validate_summary(summary.into())?;
        Ok(())
    }

    /// Replaces the employee reference after checking it exists.
    ///
    /// Performs one lookup round-trip per call.
    pub fn set_employee_id(
        &mut self,
        employee_id: EmployeeId,
        employees: &dyn EmployeeLookup,
    ) -> RepoResult<()> {
        self.employee_id = validate_employee_id(employee_id, employees)?;
        Ok(())
    }

    pub(crate) fn assign_id(&mut self, id: ReviewId) {
        self.id = Some(id);
    }

    pub(crate) fn clear_id(&mut self) {
        self.id = None;
    }
}

impl Display for Review {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "<Review {id}: ")?,
            None => write!(f, "<Review unsaved: ")?,
        }
        write!(
            f,
            "{}, {}, Employee: {}>",
            self.year, self.summary, self.employee_id
        )
    }
}

pub(crate) fn validate_year(year: i64) -> Result<i64, ReviewValidationError> {
    if year < MIN_REVIEW_YEAR {
        return Err(ReviewValidationError::YearTooEarly(year));
    }
    Ok(year)
}

pub(crate) fn validate_summary(summary: String) -> Result<String, ReviewValidationError> {
    if summary.is_empty() {
        return Err(ReviewValidationError::EmptySummary);
    }
    Ok(summary)
}

fn validate_employee_id(
    employee_id: EmployeeId,
    employees: &dyn EmployeeLookup,
) -> RepoResult<EmployeeId> {
    if employees.employee_exists(employee_id)? {
        Ok(employee_id)
    } else {
        Err(RepoError::Validation(
            ReviewValidationError::UnknownEmployee(employee_id),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::{validate_summary, validate_year, ReviewValidationError};

    #[test]
    fn validate_year_accepts_lower_bound() {
        assert_eq!(validate_year(2000), Ok(2000));
        assert_eq!(
            validate_year(1999),
            Err(ReviewValidationError::YearTooEarly(1999))
        );
    }

    #[test]
    fn validate_summary_rejects_only_empty_text() {
        assert_eq!(validate_summary(" ".to_string()), Ok(" ".to_string()));
        assert_eq!(
            validate_summary(String::new()),
            Err(ReviewValidationError::EmptySummary)
        );
    }
}
