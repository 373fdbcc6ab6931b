//! Catalog and book administration endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
};

use super::AuthenticatedUser;

/// Catalog search parameters
#[derive(Deserialize, IntoParams)]
pub struct SearchParams {
    /// Title/author substring to search for
    pub q: Option<String>,
}

/// Delete response
#[derive(Serialize, ToSchema)]
pub struct DeleteResponse {
    /// ID of the deleted book
    pub deleted: i32,
}

/// List the catalog
#[utoipa::path(
    get,
    path = "/catalog",
    tag = "catalog",
    responses(
        (status = 200, description = "All books", body = Vec<Book>)
    )
)]
pub async fn list_catalog(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Json(books))
}

/// Search the catalog by title or author
#[utoipa::path(
    get,
    path = "/catalog/search",
    tag = "catalog",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching books", body = Vec<Book>)
    )
)]
pub async fn search_catalog(
    State(state): State<crate::AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<Book>>> {
    let books = match params.q.as_deref() {
        Some(q) if !q.is_empty() => state.services.catalog.search_books(q).await?,
        _ => state.services.catalog.list_books().await?,
    };
    Ok(Json(books))
}

/// Get a single book
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "catalog",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "The book", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(book_id): Path<i32>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(book_id).await?;
    Ok(Json(book))
}

/// Create a book (admin)
#[utoipa::path(
    post,
    path = "/admin/books",
    tag = "catalog",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Admin privileges required"),
        (status = 422, description = "Copy bounds violated")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    claims.require_admin()?;
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let book = state.services.catalog.create_book(payload).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Update a book (admin)
#[utoipa::path(
    put,
    path = "/admin/books/{id}",
    tag = "catalog",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "Book not found"),
        (status = 422, description = "Copy bounds violated")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(book_id): Path<i32>,
    Json(payload): Json<UpdateBook>,
) -> AppResult<Json<Book>> {
    claims.require_admin()?;
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let book = state.services.catalog.update_book(book_id, payload).await?;
    Ok(Json(book))
}

/// Delete a book (admin); blocked while loans reference it
#[utoipa::path(
    delete,
    path = "/admin/books/{id}",
    tag = "catalog",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted", body = DeleteResponse),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "Book not found"),
        (status = 422, description = "Book still has active loans")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(book_id): Path<i32>,
) -> AppResult<Json<DeleteResponse>> {
    claims.require_admin()?;

    state.services.catalog.delete_book(book_id).await?;
    Ok(Json(DeleteResponse { deleted: book_id }))
}
