//! Biblio Library Loan Management System
//!
//! A Rust implementation of a library loan management server: book
//! catalog, loan lifecycle, reservation queues, fines and role-gated
//! accounts behind a REST JSON API.

use std::sync::Arc;

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod seed;
pub mod services;

pub use clock::Clock;
pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
