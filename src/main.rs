//! Biblio Server - Library Loan Management System

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use biblio_server::{
    api, seed,
    config::AppConfig,
    repository::Repository,
    services::Services,
    AppState, Clock,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("biblio_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Biblio Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository.clone(), &config, Clock::system());

    // Seed default accounts and demo catalog on an empty database
    seed::run(&repository, &services.auth)
        .await
        .expect("Failed to seed database");

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        // Authentication
        .route("/auth/register", post(api::auth::register))
        .route("/auth/login", post(api::auth::login))
        .route("/auth/refresh", post(api::auth::refresh))
        .route("/auth/me", get(api::auth::me))
        // Catalog
        .route("/catalog", get(api::books::list_catalog))
        .route("/catalog/search", get(api::books::search_catalog))
        .route("/books/:id", get(api::books::get_book))
        .route("/admin/books", post(api::books::create_book))
        .route("/admin/books/:id", put(api::books::update_book))
        .route("/admin/books/:id", delete(api::books::delete_book))
        // Loans
        .route("/member/loans", get(api::loans::list_my_loans))
        .route("/member/loans", post(api::loans::create_loan))
        .route("/loans/:id/return", post(api::loans::return_loan))
        .route("/loans/:id/renew", post(api::loans::renew_loan))
        // Reservations
        .route("/reservations", post(api::reservations::create_reservation))
        .route(
            "/librarian/reservations/queue/:book_id",
            get(api::reservations::list_queue),
        )
        .route(
            "/librarian/reservations/next/:book_id",
            post(api::reservations::next_in_queue),
        )
        // Fines
        .route("/member/fines", get(api::fines::get_my_fines))
        .route("/member/fines/pay", post(api::fines::pay_fine))
        // Notifications
        .route("/admin/notifications", get(api::notifications::list_notifications))
        .route(
            "/admin/notifications/return-reminder",
            post(api::notifications::create_return_reminder),
        )
        .route(
            "/admin/notifications/overdue",
            post(api::notifications::create_overdue_notice),
        )
        .route(
            "/admin/notifications/loan-confirmation",
            post(api::notifications::create_loan_confirmation),
        )
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
