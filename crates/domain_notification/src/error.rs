//! Notification domain errors

use core_kernel::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl NotificationError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, NotificationError::Core(e) if e.is_not_found())
    }
}
