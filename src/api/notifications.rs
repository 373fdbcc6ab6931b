//! Notification log endpoints (admin)

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{error::AppResult, models::notification::Notification};

use super::AuthenticatedUser;

/// Return reminder request
#[derive(Deserialize, ToSchema)]
pub struct ReturnReminderRequest {
    pub loan_id: i32,
}

/// Overdue notice request
#[derive(Deserialize, ToSchema)]
pub struct OverdueRequest {
    pub loan_id: i32,
    pub days_late: i64,
}

/// Loan confirmation request
#[derive(Deserialize, ToSchema)]
pub struct LoanConfirmationRequest {
    pub loan_id: i32,
}

/// All notifications logged so far
#[utoipa::path(
    get,
    path = "/admin/notifications",
    tag = "notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Notification log", body = Vec<Notification>),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn list_notifications(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Notification>>> {
    claims.require_admin()?;

    Ok(Json(state.services.notifications.list().await))
}

/// Log a return reminder
#[utoipa::path(
    post,
    path = "/admin/notifications/return-reminder",
    tag = "notifications",
    security(("bearer_auth" = [])),
    request_body = ReturnReminderRequest,
    responses(
        (status = 201, description = "Notification logged", body = Notification),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn create_return_reminder(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<ReturnReminderRequest>,
) -> AppResult<(StatusCode, Json<Notification>)> {
    claims.require_admin()?;

    let notification = state
        .services
        .notifications
        .record_return_reminder(request.loan_id)
        .await;
    Ok((StatusCode::CREATED, Json(notification)))
}

/// Log an overdue notice
#[utoipa::path(
    post,
    path = "/admin/notifications/overdue",
    tag = "notifications",
    security(("bearer_auth" = [])),
    request_body = OverdueRequest,
    responses(
        (status = 201, description = "Notification logged", body = Notification),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn create_overdue_notice(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<OverdueRequest>,
) -> AppResult<(StatusCode, Json<Notification>)> {
    claims.require_admin()?;

    let notification = state
        .services
        .notifications
        .record_overdue(request.loan_id, request.days_late)
        .await;
    Ok((StatusCode::CREATED, Json(notification)))
}

/// Log a borrow confirmation
#[utoipa::path(
    post,
    path = "/admin/notifications/loan-confirmation",
    tag = "notifications",
    security(("bearer_auth" = [])),
    request_body = LoanConfirmationRequest,
    responses(
        (status = 201, description = "Notification logged", body = Notification),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn create_loan_confirmation(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<LoanConfirmationRequest>,
) -> AppResult<(StatusCode, Json<Notification>)> {
    claims.require_admin()?;

    let notification = state
        .services
        .notifications
        .record_loan_confirmation(request.loan_id)
        .await;
    Ok((StatusCode::CREATED, Json(notification)))
}
