//! Loans repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::loan::Loan,
};

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get loan by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::LoanNotFound(id))
    }

    /// Get loans for a user. Every stored loan is an active loan.
    pub async fn list_by_user(&self, user_id: i32) -> AppResult<Vec<Loan>> {
        let loans =
            sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE user_id = $1 ORDER BY id")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(loans)
    }

    /// Create a new loan record
    pub async fn create(
        &self,
        user_id: i32,
        book_id: i32,
        start_date: NaiveDate,
        due_date: NaiveDate,
    ) -> AppResult<Loan> {
        let loan = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loans (user_id, book_id, start_date, due_date, renewals)
            VALUES ($1, $2, $3, $4, 0)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .bind(start_date)
        .bind(due_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(loan)
    }

    /// Delete a loan record. Fails with LoanNotFound if it was already
    /// removed, so returning the same loan twice surfaces an error rather
    /// than a silent success.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM loans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::LoanNotFound(id));
        }
        Ok(())
    }

    /// Push the due date forward and bump the renewal counter, guarded by
    /// the renewal cap. Returns None when the cap is already reached (or
    /// the loan vanished); the caller decides which it was.
    pub async fn renew(
        &self,
        id: i32,
        period_days: i32,
        max_renewals: i16,
    ) -> AppResult<Option<Loan>> {
        let loan = sqlx::query_as::<_, Loan>(
            r#"
            UPDATE loans
            SET due_date = due_date + $2,
                renewals = renewals + 1
            WHERE id = $1 AND renewals < $3
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(period_days)
        .bind(max_renewals)
        .fetch_optional(&self.pool)
        .await?;

        Ok(loan)
    }

    /// Count loans referencing a book (deletion guard)
    pub async fn count_for_book(&self, book_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM loans WHERE book_id = $1")
            .bind(book_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
