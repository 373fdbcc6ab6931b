//! Date source for due-date and fine computation.
//!
//! Loan dates are calendar dates, not instants; everything that needs
//! "today" goes through a [`Clock`] so tests can pin the date.

use chrono::{NaiveDate, Utc};

#[derive(Debug, Clone, Default)]
pub struct Clock {
    fixed: Option<NaiveDate>,
}

impl Clock {
    /// Clock backed by the system time (UTC calendar date).
    pub fn system() -> Self {
        Self { fixed: None }
    }

    /// Clock pinned to a given date.
    pub fn fixed(date: NaiveDate) -> Self {
        Self { fixed: Some(date) }
    }

    pub fn today(&self) -> NaiveDate {
        self.fixed.unwrap_or_else(|| Utc::now().date_naive())
    }
}
