//! Reservation queue endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{error::AppResult, models::reservation::Reservation};

use super::AuthenticatedUser;

/// Create reservation request
#[derive(Deserialize, ToSchema)]
pub struct CreateReservationRequest {
    /// Book to queue for
    pub book_id: i32,
}

/// Reserve a book
#[utoipa::path(
    post,
    path = "/reservations",
    tag = "reservations",
    security(("bearer_auth" = [])),
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation queued", body = Reservation),
        (status = 404, description = "Book not found")
    )
)]
pub async fn create_reservation(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateReservationRequest>,
) -> AppResult<(StatusCode, Json<Reservation>)> {
    let reservation = state
        .services
        .reservations
        .enqueue(claims.user_id, request.book_id)
        .await?;

    Ok((StatusCode::CREATED, Json(reservation)))
}

/// Peek at a book's reservation queue (librarian)
#[utoipa::path(
    get,
    path = "/librarian/reservations/queue/{book_id}",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(
        ("book_id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Queue in FIFO order", body = Vec<Reservation>),
        (status = 403, description = "Librarian privileges required")
    )
)]
pub async fn list_queue(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(book_id): Path<i32>,
) -> AppResult<Json<Vec<Reservation>>> {
    claims.require_librarian()?;

    let queue = state.services.reservations.peek_all(book_id).await?;
    Ok(Json(queue))
}

/// Pop the next reservation from a book's queue (librarian).
///
/// Removes the reservation only; it does not create a loan or hold a
/// copy for the claimant.
#[utoipa::path(
    post,
    path = "/librarian/reservations/next/{book_id}",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(
        ("book_id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Next reservation, or null when the queue is empty", body = Option<Reservation>),
        (status = 403, description = "Librarian privileges required")
    )
)]
pub async fn next_in_queue(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(book_id): Path<i32>,
) -> AppResult<Json<Option<Reservation>>> {
    claims.require_librarian()?;

    let next = state.services.reservations.dequeue_next(book_id).await?;
    Ok(Json(next))
}
