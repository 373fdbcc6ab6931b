//! Notification model

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Notification categories emitted by operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    ReturnReminder,
    Overdue,
    LoanConfirmation,
}

/// A logged notification.
///
/// Notifications live in a process-lifetime store owned by the
/// notifications service; they are not persisted across restarts.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Notification {
    pub id: i32,
    pub kind: NotificationKind,
    pub loan_id: i32,
    pub message: String,
    pub read: bool,
}
