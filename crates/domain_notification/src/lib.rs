//! Admin Notification Domain
//!
//! Notifications alert back-office staff to events that need attention,
//! primarily new payment declarations awaiting verification. They are
//! advisory: losing one never blocks the operation that emitted it.

pub mod channel;
pub mod error;
pub mod notification;
pub mod ports;

pub use channel::NotificationChannel;
pub use error::NotificationError;
pub use notification::{Notification, NotificationKind};
pub use ports::NotificationStore;
