//! Loan management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppResult, models::loan::Loan};

use super::AuthenticatedUser;

/// Create loan request
#[derive(Deserialize, ToSchema)]
pub struct CreateLoanRequest {
    /// Book to borrow
    pub book_id: i32,
}

/// Return response with the closed loan and the updated availability
#[derive(Serialize, ToSchema)]
pub struct ReturnResponse {
    /// Return status
    pub status: String,
    /// The loan that was closed
    pub loan: Loan,
    /// Copies available after the return
    pub available_copies: i32,
}

/// Get the caller's loans
#[utoipa::path(
    get,
    path = "/member/loans",
    tag = "loans",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's active loans", body = Vec<Loan>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_my_loans(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Loan>>> {
    let loans = state.services.loans.list_for_user(claims.user_id).await?;
    Ok(Json(loans))
}

/// Borrow a book
#[utoipa::path(
    post,
    path = "/member/loans",
    tag = "loans",
    security(("bearer_auth" = [])),
    request_body = CreateLoanRequest,
    responses(
        (status = 201, description = "Loan created", body = Loan),
        (status = 404, description = "Book not found"),
        (status = 422, description = "No copies available")
    )
)]
pub async fn create_loan(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateLoanRequest>,
) -> AppResult<(StatusCode, Json<Loan>)> {
    let loan = state
        .services
        .loans
        .create_loan(claims.user_id, request.book_id)
        .await?;

    Ok((StatusCode::CREATED, Json(loan)))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/loans/{id}/return",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Loan ID")
    ),
    responses(
        (status = 200, description = "Book returned", body = ReturnResponse),
        (status = 403, description = "Loan belongs to another user"),
        (status = 404, description = "Loan or book not found")
    )
)]
pub async fn return_loan(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(loan_id): Path<i32>,
) -> AppResult<Json<ReturnResponse>> {
    let (loan, book) = state.services.loans.return_loan(loan_id, &claims).await?;

    Ok(Json(ReturnResponse {
        status: "returned".to_string(),
        loan,
        available_copies: book.available_copies,
    }))
}

/// Renew a loan
#[utoipa::path(
    post,
    path = "/loans/{id}/renew",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Loan ID")
    ),
    responses(
        (status = 200, description = "Loan renewed", body = Loan),
        (status = 403, description = "Loan belongs to another user"),
        (status = 404, description = "Loan not found"),
        (status = 422, description = "Max renewals reached")
    )
)]
pub async fn renew_loan(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(loan_id): Path<i32>,
) -> AppResult<Json<Loan>> {
    let loan = state.services.loans.renew_loan(loan_id, &claims).await?;
    Ok(Json(loan))
}
