//! Books repository: catalog access and the copy-count ledger.
//!
//! The inventory operations (reserve_copy, release_copy, set_totals) are
//! single guarded UPDATE statements, so concurrent requests against the
//! same book serialize on the row lock. A plain read-then-write here would
//! let two borrowers take the last copy.

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::Book,
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::BookNotFound(id))
    }

    /// List the whole catalog
    pub async fn list_all(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    /// Search by title or author, case-insensitive substring match
    pub async fn search(&self, query: &str) -> AppResult<Vec<Book>> {
        let pattern = format!("%{}%", query);
        let books = sqlx::query_as::<_, Book>(
            "SELECT * FROM books WHERE title ILIKE $1 OR author ILIKE $1 ORDER BY id",
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    /// Count catalog entries
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Create a new book
    pub async fn create(
        &self,
        title: &str,
        author: &str,
        year: i32,
        total_copies: i32,
        available_copies: i32,
    ) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, year, total_copies, available_copies)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(author)
        .bind(year)
        .bind(total_copies)
        .bind(available_copies)
        .fetch_one(&self.pool)
        .await?;

        Ok(book)
    }

    /// Admin edit of a book, including its copy totals.
    ///
    /// The bounds check (0 <= available <= total) is evaluated inside the
    /// UPDATE against the effective values, so an edit racing a
    /// release_copy cannot slip past it.
    pub async fn set_totals(
        &self,
        id: i32,
        title: Option<&str>,
        author: Option<&str>,
        year: Option<i32>,
        total_copies: Option<i32>,
        available_copies: Option<i32>,
    ) -> AppResult<Book> {
        let updated = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = COALESCE($2, title),
                author = COALESCE($3, author),
                year = COALESCE($4, year),
                total_copies = COALESCE($5, total_copies),
                available_copies = COALESCE($6, available_copies)
            WHERE id = $1
              AND COALESCE($6, available_copies) >= 0
              AND COALESCE($6, available_copies) <= COALESCE($5, total_copies)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(author)
        .bind(year)
        .bind(total_copies)
        .bind(available_copies)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(book) => Ok(book),
            None => {
                // Distinguish a missing book from a bounds violation
                self.get_by_id(id).await?;
                Err(AppError::InvalidBounds(
                    "available_copies must stay between 0 and total_copies".to_string(),
                ))
            }
        }
    }

    /// Take one copy out of circulation (loan creation path).
    ///
    /// Atomic compare-and-decrement: fails with NoCopiesAvailable when the
    /// count is already zero.
    pub async fn reserve_copy(&self, id: i32) -> AppResult<Book> {
        let updated = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET available_copies = available_copies - 1
            WHERE id = $1 AND available_copies > 0
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(book) => Ok(book),
            None => {
                self.get_by_id(id).await?;
                Err(AppError::NoCopiesAvailable(id))
            }
        }
    }

    /// Put one copy back into circulation (loan return path).
    ///
    /// Never pushes available_copies above total_copies: if the counts were
    /// edited out from under us the operation fails with InvalidBounds
    /// instead of silently clamping.
    pub async fn release_copy(&self, id: i32) -> AppResult<Book> {
        let updated = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET available_copies = available_copies + 1
            WHERE id = $1 AND available_copies < total_copies
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(book) => Ok(book),
            None => {
                self.get_by_id(id).await?;
                Err(AppError::InvalidBounds(
                    "all copies are already in circulation".to_string(),
                ))
            }
        }
    }

    /// Delete a book. The loan-count guard runs in the catalog service
    /// before this is called.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::BookNotFound(id));
        }
        Ok(())
    }
}
