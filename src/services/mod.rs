//! Business logic services

pub mod auth;
pub mod catalog;
pub mod fines;
pub mod loans;
pub mod notifications;
pub mod reservations;

use crate::{clock::Clock, config::AppConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
    pub reservations: reservations::ReservationsService,
    pub fines: fines::FinesService,
    pub notifications: notifications::NotificationsService,
}

impl Services {
    /// Create all services with the given repository and clock
    pub fn new(repository: Repository, config: &AppConfig, clock: Clock) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), config.auth.clone()),
            catalog: catalog::CatalogService::new(repository.clone(), clock.clone()),
            loans: loans::LoansService::new(repository.clone(), config.loans.clone(), clock.clone()),
            reservations: reservations::ReservationsService::new(repository.clone()),
            fines: fines::FinesService::new(repository, config.loans.clone(), clock),
            notifications: notifications::NotificationsService::new(),
        }
    }
}
