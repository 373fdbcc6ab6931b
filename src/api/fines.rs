//! Fine report endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, services::fines::FinesReport};

use super::AuthenticatedUser;

/// Payment acknowledgment
#[derive(Serialize, ToSchema)]
pub struct PaymentResponse {
    pub message: String,
}

/// The caller's outstanding fines, computed as of today
#[utoipa::path(
    get,
    path = "/member/fines",
    tag = "fines",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Outstanding fines", body = FinesReport),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_my_fines(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<FinesReport>> {
    let report = state.services.fines.compute_fines(claims.user_id).await?;
    Ok(Json(report))
}

/// Acknowledge a fine payment. Payment itself is handled externally;
/// nothing is persisted here.
#[utoipa::path(
    post,
    path = "/member/fines/pay",
    tag = "fines",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Payment acknowledged", body = PaymentResponse)
    )
)]
pub async fn pay_fine(
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> Json<PaymentResponse> {
    Json(PaymentResponse {
        message: "Fine paid".to_string(),
    })
}
