//! Loan lifecycle service.
//!
//! A loan moves through exactly one transition in each direction:
//! non-existent -> active (create) and active -> deleted (return). Renewal
//! mutates the active record in place and never touches the copy ledger.

use chrono::Duration;

use crate::{
    clock::Clock,
    config::LoansConfig,
    error::{AppError, AppResult},
    models::{book::Book, loan::Loan, user::UserClaims},
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    config: LoansConfig,
    clock: Clock,
}

impl LoansService {
    pub fn new(repository: Repository, config: LoansConfig, clock: Clock) -> Self {
        Self {
            repository,
            config,
            clock,
        }
    }

    /// Get loans for a user
    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<Loan>> {
        // Verify user exists
        self.repository.users.get_by_id(user_id).await?;
        self.repository.loans.list_by_user(user_id).await
    }

    /// Create a new loan (borrow a book).
    ///
    /// The only path that takes a copy out of circulation: the ledger
    /// decrement happens before the loan row is inserted, and the guarded
    /// decrement itself rejects the request when no copies remain.
    pub async fn create_loan(&self, user_id: i32, book_id: i32) -> AppResult<Loan> {
        self.repository.books.get_by_id(book_id).await?;
        self.repository.books.reserve_copy(book_id).await?;

        let today = self.clock.today();
        let due_date = today + Duration::days(self.config.period_days);

        let loan = self
            .repository
            .loans
            .create(user_id, book_id, today, due_date)
            .await?;

        tracing::info!(loan_id = loan.id, book_id, user_id, "loan created");
        Ok(loan)
    }

    /// Return a borrowed book.
    ///
    /// The loan row is deleted before the copy is released: if the process
    /// dies between the two steps the book stays checked out, which is
    /// recoverable, whereas the reverse order could mint a phantom copy.
    pub async fn return_loan(
        &self,
        loan_id: i32,
        principal: &UserClaims,
    ) -> AppResult<(Loan, Book)> {
        let loan = self.repository.loans.get_by_id(loan_id).await?;
        Self::check_owner(&loan, principal)?;

        // A loan pointing at a vanished book is an inconsistency worth
        // surfacing, not swallowing.
        let book = self.repository.books.get_by_id(loan.book_id).await?;

        self.repository.loans.delete(loan_id).await?;
        let book = self.repository.books.release_copy(book.id).await?;

        tracing::info!(loan_id, book_id = book.id, "loan returned");
        Ok((loan, book))
    }

    /// Renew a loan: due date pushed forward by the configured period,
    /// renewal counter bumped, capped at the configured maximum.
    pub async fn renew_loan(&self, loan_id: i32, principal: &UserClaims) -> AppResult<Loan> {
        let loan = self.repository.loans.get_by_id(loan_id).await?;
        Self::check_owner(&loan, principal)?;

        let renewed = self
            .repository
            .loans
            .renew(
                loan_id,
                self.config.period_days as i32,
                self.config.max_renewals,
            )
            .await?;

        match renewed {
            Some(loan) => Ok(loan),
            None => {
                // Guarded update matched nothing: either the loan is gone
                // (LoanNotFound from the lookup) or the cap is reached.
                let loan = self.repository.loans.get_by_id(loan_id).await?;
                Err(AppError::MaxRenewalsReached(
                    loan.renewals,
                    self.config.max_renewals,
                ))
            }
        }
    }

    /// Members act on their own loans; librarians and admins on any
    fn check_owner(loan: &Loan, principal: &UserClaims) -> AppResult<()> {
        if loan.user_id == principal.user_id || principal.is_librarian() {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Loan belongs to another user".to_string(),
            ))
        }
    }
}
