//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book record.
///
/// Invariant: 0 <= available_copies <= total_copies, enforced by the
/// inventory operations in the books repository and by CHECK constraints
/// in the schema.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub total_copies: i32,
    pub available_copies: i32,
}

/// Create book request (admin)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: String,
    /// Publication year; the upper bound (current year) is checked against
    /// the service clock.
    #[validate(range(min = 1400, message = "Year must be 1400 or later"))]
    pub year: i32,
    #[validate(range(min = 1, message = "A book must have at least one copy"))]
    pub total_copies: i32,
    /// Defaults to total_copies when omitted
    pub available_copies: Option<i32>,
}

/// Update book request (admin, partial)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: Option<String>,
    #[validate(range(min = 1400, message = "Year must be 1400 or later"))]
    pub year: Option<i32>,
    #[validate(range(min = 1, message = "A book must have at least one copy"))]
    pub total_copies: Option<i32>,
    pub available_copies: Option<i32>,
}
