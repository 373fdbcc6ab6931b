//! Catalog service: book listing, search and admin CRUD.
//!
//! The deletion path runs through the loan-count guard, so a book with
//! outstanding loans can never be removed.

use chrono::Datelike;

use crate::{
    clock::Clock,
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    clock: Clock,
}

impl CatalogService {
    pub fn new(repository: Repository, clock: Clock) -> Self {
        Self { repository, clock }
    }

    /// List the whole catalog
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list_all().await
    }

    /// Search books by title or author
    pub async fn search_books(&self, query: &str) -> AppResult<Vec<Book>> {
        self.repository.books.search(query).await
    }

    /// Get a book by ID
    pub async fn get_book(&self, book_id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(book_id).await
    }

    /// Create a book (admin). available_copies defaults to total_copies.
    pub async fn create_book(&self, payload: CreateBook) -> AppResult<Book> {
        self.check_year(payload.year)?;

        let available = payload.available_copies.unwrap_or(payload.total_copies);
        if available < 0 || available > payload.total_copies {
            return Err(AppError::InvalidBounds(
                "available_copies must stay between 0 and total_copies".to_string(),
            ));
        }

        self.repository
            .books
            .create(
                &payload.title,
                &payload.author,
                payload.year,
                payload.total_copies,
                available,
            )
            .await
    }

    /// Update a book (admin). Copy bounds are re-checked atomically in the
    /// ledger against the effective values.
    pub async fn update_book(&self, book_id: i32, payload: UpdateBook) -> AppResult<Book> {
        if let Some(year) = payload.year {
            self.check_year(year)?;
        }

        self.repository
            .books
            .set_totals(
                book_id,
                payload.title.as_deref(),
                payload.author.as_deref(),
                payload.year,
                payload.total_copies,
                payload.available_copies,
            )
            .await
    }

    /// Check whether a book may be deleted: it must exist and have no
    /// loans referencing it (every stored loan is active).
    pub async fn can_delete_book(&self, book_id: i32) -> AppResult<()> {
        self.repository.books.get_by_id(book_id).await?;

        let active_loans = self.repository.loans.count_for_book(book_id).await?;
        if active_loans > 0 {
            return Err(AppError::BookHasActiveLoans(book_id));
        }
        Ok(())
    }

    /// Delete a book (admin), guarded by can_delete_book
    pub async fn delete_book(&self, book_id: i32) -> AppResult<()> {
        self.can_delete_book(book_id).await?;
        self.repository.books.delete(book_id).await?;

        tracing::info!(book_id, "book deleted");
        Ok(())
    }

    /// Publication year upper bound is the current year; the lower bound
    /// is checked by payload validation.
    fn check_year(&self, year: i32) -> AppResult<()> {
        let current = self.clock.today().year();
        if year > current {
            return Err(AppError::Validation(format!(
                "Publication year {} is in the future",
                year
            )));
        }
        Ok(())
    }
}
