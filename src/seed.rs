//! Development seed data: default accounts and a couple of catalog
//! entries, inserted only when the corresponding tables are empty.

use crate::{
    error::AppResult,
    models::user::Role,
    repository::Repository,
    services::auth::AuthService,
};

/// Seed default accounts and books on an empty database
pub async fn run(repository: &Repository, auth: &AuthService) -> AppResult<()> {
    if repository.users.count().await? == 0 {
        for (email, name, password, role) in [
            ("admin@example.com", "Admin", "admin123", Role::Admin),
            ("librarian@example.com", "Librarian", "librarian123", Role::Librarian),
            ("member@example.com", "Member", "member123", Role::Member),
        ] {
            let hash = auth.hash_password(password)?;
            repository.users.create(email, name, &hash, role).await?;
        }
        tracing::info!("seeded default accounts");
    }

    if repository.books.count().await? == 0 {
        repository
            .books
            .create("The Alchemist", "Paulo Coelho", 1988, 3, 3)
            .await?;
        repository.books.create("1984", "George Orwell", 1949, 2, 2).await?;
        tracing::info!("seeded catalog");
    }

    Ok(())
}
