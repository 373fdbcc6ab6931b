//! Reservations repository for database operations

use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::reservation::Reservation};

#[derive(Clone)]
pub struct ReservationsRepository {
    pool: Pool<Postgres>,
}

impl ReservationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Append a reservation to the book's queue
    pub async fn create(&self, user_id: i32, book_id: i32) -> AppResult<Reservation> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations (user_id, book_id)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(reservation)
    }

    /// Remove and return the earliest reservation for the book, if any.
    /// FIFO by created_at, ties broken by id for determinism.
    pub async fn pop_next(&self, book_id: i32) -> AppResult<Option<Reservation>> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            DELETE FROM reservations
            WHERE id = (
                SELECT id FROM reservations
                WHERE book_id = $1
                ORDER BY created_at ASC, id ASC
                LIMIT 1
            )
            RETURNING *
            "#,
        )
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reservation)
    }

    /// The book's queue in FIFO order, non-destructive
    pub async fn list_for_book(&self, book_id: i32) -> AppResult<Vec<Reservation>> {
        let reservations = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT * FROM reservations
            WHERE book_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reservations)
    }
}
