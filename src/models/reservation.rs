//! Reservation model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Reservation record: a queued request for a book currently checked out.
///
/// Reservations form a per-book FIFO ordered by created_at (ties broken by
/// id). A user may hold several reservations for the same book; there is no
/// cancellation operation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Reservation {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub created_at: DateTime<Utc>,
}
