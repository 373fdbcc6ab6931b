//! Loan (borrow) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Loan record.
///
/// A stored loan is an active loan: returning a loan deletes the row, so
/// there is no returned/closed status flag. Overdue-ness is a derived
/// predicate, never a stored state.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Loan {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub renewals: i16,
}

impl Loan {
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date < today
    }

    /// Whole days past the due date, zero if not yet overdue.
    pub fn days_late(&self, today: NaiveDate) -> i64 {
        (today - self.due_date).num_days().max(0)
    }
}
