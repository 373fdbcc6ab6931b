//! Notification log service.
//!
//! An append-only, process-lifetime store injected through the services
//! container. Notifications record operator actions (reminders, overdue
//! notices, loan confirmations) for the admin log; delivery is out of
//! scope.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::notification::{Notification, NotificationKind};

#[derive(Clone)]
pub struct NotificationsService {
    store: Arc<RwLock<Vec<Notification>>>,
}

impl Default for NotificationsService {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationsService {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// All notifications logged so far, oldest first
    pub async fn list(&self) -> Vec<Notification> {
        self.store.read().await.clone()
    }

    /// Log a return reminder for a loan
    pub async fn record_return_reminder(&self, loan_id: i32) -> Notification {
        self.record(
            NotificationKind::ReturnReminder,
            loan_id,
            format!("Reminder: loan {} is due back", loan_id),
        )
        .await
    }

    /// Log an overdue notice for a loan
    pub async fn record_overdue(&self, loan_id: i32, days_late: i64) -> Notification {
        self.record(
            NotificationKind::Overdue,
            loan_id,
            format!("Overdue: loan {} ({} days)", loan_id, days_late),
        )
        .await
    }

    /// Log a borrow confirmation for a loan
    pub async fn record_loan_confirmation(&self, loan_id: i32) -> Notification {
        self.record(
            NotificationKind::LoanConfirmation,
            loan_id,
            format!("Confirmation: loan {} registered", loan_id),
        )
        .await
    }

    async fn record(
        &self,
        kind: NotificationKind,
        loan_id: i32,
        message: String,
    ) -> Notification {
        let mut store = self.store.write().await;
        let notification = Notification {
            id: store.len() as i32 + 1,
            kind,
            loan_id,
            message,
            read: false,
        };
        store.push(notification.clone());
        notification
    }
}
