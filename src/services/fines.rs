//! Fine calculation service.
//!
//! Fines are a derived view over stored loans and the current date; they
//! are recomputed on every query and never persisted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    clock::Clock, config::LoansConfig, error::AppResult, models::loan::Loan,
    repository::Repository,
};

/// One overdue loan's fine
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FineRecord {
    pub loan_id: i32,
    pub days_late: i64,
    pub amount: Decimal,
    pub status: String,
}

/// A user's outstanding fines
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FinesReport {
    pub total: Decimal,
    pub details: Vec<FineRecord>,
}

#[derive(Clone)]
pub struct FinesService {
    repository: Repository,
    config: LoansConfig,
    clock: Clock,
}

impl FinesService {
    pub fn new(repository: Repository, config: LoansConfig, clock: Clock) -> Self {
        Self {
            repository,
            config,
            clock,
        }
    }

    /// Compute the user's outstanding fines as of today
    pub async fn compute_fines(&self, user_id: i32) -> AppResult<FinesReport> {
        let loans = self.repository.loans.list_by_user(user_id).await?;
        Ok(fines_for_loans(&loans, self.clock.today(), self.config.fine_per_day))
    }
}

/// Per-loan fine: whole days past due times the daily rate, rounded to two
/// decimals; the total is rounded the same way.
pub fn fines_for_loans(loans: &[Loan], as_of: NaiveDate, fine_per_day: Decimal) -> FinesReport {
    let mut total = Decimal::ZERO;
    let mut details = Vec::new();

    for loan in loans {
        if !loan.is_overdue(as_of) {
            continue;
        }
        let days_late = loan.days_late(as_of);
        let amount = (fine_per_day * Decimal::from(days_late)).round_dp(2);
        total += amount;
        details.push(FineRecord {
            loan_id: loan.id,
            days_late,
            amount,
            status: "due".to_string(),
        });
    }

    FinesReport {
        total: total.round_dp(2),
        details,
    }
}
