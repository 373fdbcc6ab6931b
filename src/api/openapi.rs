//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, fines, health, loans, notifications, reservations};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Biblio API",
        version = "1.0.0",
        description = "Library Loan Management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        // Auth
        auth::register,
        auth::login,
        auth::refresh,
        auth::me,
        // Catalog
        books::list_catalog,
        books::search_catalog,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Loans
        loans::list_my_loans,
        loans::create_loan,
        loans::return_loan,
        loans::renew_loan,
        // Reservations
        reservations::create_reservation,
        reservations::list_queue,
        reservations::next_in_queue,
        // Fines
        fines::get_my_fines,
        fines::pay_fine,
        // Notifications
        notifications::list_notifications,
        notifications::create_return_reminder,
        notifications::create_overdue_notice,
        notifications::create_loan_confirmation,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::TokenResponse,
            auth::RefreshRequest,
            crate::models::user::RegisterUser,
            crate::models::user::UserInfo,
            crate::models::user::Role,
            // Catalog
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            books::DeleteResponse,
            // Loans
            crate::models::loan::Loan,
            loans::CreateLoanRequest,
            loans::ReturnResponse,
            // Reservations
            crate::models::reservation::Reservation,
            reservations::CreateReservationRequest,
            // Fines
            crate::services::fines::FineRecord,
            crate::services::fines::FinesReport,
            fines::PaymentResponse,
            // Notifications
            crate::models::notification::Notification,
            crate::models::notification::NotificationKind,
            notifications::ReturnReminderRequest,
            notifications::OverdueRequest,
            notifications::LoanConfirmationRequest,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "auth", description = "Authentication"),
        (name = "catalog", description = "Book catalog"),
        (name = "loans", description = "Loan lifecycle"),
        (name = "reservations", description = "Reservation queues"),
        (name = "fines", description = "Fine reports"),
        (name = "notifications", description = "Notification log")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
