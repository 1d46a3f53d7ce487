//! The expense domain model and the range rules for its fields.

use serde::{Deserialize, Serialize};

use crate::Error;

/// Alias for the expense row id type.
pub type ExpenseId = i64;

/// The smallest accepted cost.
pub const COST_MIN: i64 = 0;
/// The largest accepted cost.
pub const COST_MAX: i64 = 10_000_000;
/// The smallest accepted month.
pub const MONTH_MIN: u8 = 1;
/// The largest accepted month.
pub const MONTH_MAX: u8 = 12;
/// The smallest accepted year.
pub const YEAR_MIN: i32 = 1970;
/// The largest accepted year.
pub const YEAR_MAX: i32 = 2999;

/// One line-item record representing a cost incurred in a given month/year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// The row id. Uniquely identifies the expense and never changes.
    pub id: ExpenseId,
    /// What the expense was for.
    pub name: ExpenseName,
    /// The cost in the currency's minor unit.
    pub cost: i64,
    /// The billing month, 1-12.
    pub month: u8,
    /// The billing year.
    pub year: i32,
    /// Whether the expense has been archived into a billing period.
    pub approved: bool,
    /// Whether the expense has been paid out.
    pub paid: bool,
}

/// The name of an expense. Never empty or whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseName(String);

impl ExpenseName {
    /// Create and validate an expense name from a string.
    ///
    /// # Errors
    /// Returns [Error::EmptyExpenseName] if `name` is empty or contains only
    /// whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        if name.trim().is_empty() {
            return Err(Error::EmptyExpenseName);
        }

        Ok(Self(name.to_owned()))
    }

    /// Create an expense name, skipping validation.
    ///
    /// Intended for values coming out of the database, which were validated
    /// on the way in.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for ExpenseName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Check that `cost` is within the accepted range.
pub fn validate_cost(cost: i64) -> Result<i64, Error> {
    if (COST_MIN..=COST_MAX).contains(&cost) {
        Ok(cost)
    } else {
        Err(Error::CostOutOfRange(cost))
    }
}

/// Check that `month` is a calendar month.
pub fn validate_month(month: u8) -> Result<u8, Error> {
    if (MONTH_MIN..=MONTH_MAX).contains(&month) {
        Ok(month)
    } else {
        Err(Error::MonthOutOfRange(month))
    }
}

/// Check that `year` is within the accepted range.
pub fn validate_year(year: i32) -> Result<i32, Error> {
    if (YEAR_MIN..=YEAR_MAX).contains(&year) {
        Ok(year)
    } else {
        Err(Error::YearOutOfRange(year))
    }
}
