//! Reservation queue service.
//!
//! Popping the queue only removes the reservation: it does not create a
//! loan or hold a copy for the claimant. Operators advance the queue
//! manually once a copy frees up.

use crate::{
    error::AppResult,
    models::reservation::Reservation,
    repository::Repository,
};

#[derive(Clone)]
pub struct ReservationsService {
    repository: Repository,
}

impl ReservationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Enqueue a reservation for a book. The book must exist; duplicates
    /// by the same user are allowed.
    pub async fn enqueue(&self, user_id: i32, book_id: i32) -> AppResult<Reservation> {
        self.repository.books.get_by_id(book_id).await?;
        self.repository.reservations.create(user_id, book_id).await
    }

    /// Remove and return the next reservation in the book's queue, if any
    pub async fn dequeue_next(&self, book_id: i32) -> AppResult<Option<Reservation>> {
        self.repository.reservations.pop_next(book_id).await
    }

    /// The book's queue, earliest first, non-destructive
    pub async fn peek_all(&self, book_id: i32) -> AppResult<Vec<Reservation>> {
        self.repository.reservations.list_for_book(book_id).await
    }
}
