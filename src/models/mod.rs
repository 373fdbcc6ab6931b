//! Data models for Biblio

pub mod book;
pub mod loan;
pub mod notification;
pub mod reservation;
pub mod user;

// Re-export commonly used types
pub use book::Book;
pub use loan::Loan;
pub use notification::{Notification, NotificationKind};
pub use reservation::Reservation;
pub use user::{Role, User, UserClaims};
