//! Application registry
//!
//! Accepts validated intakes, assigns references, and owns the admin-facing
//! status updates.

use std::sync::Arc;

use core_kernel::CoreError;
use tracing::{info, instrument, warn};

use crate::application::{Application, ApplicationStatus};
use crate::error::ApplicationError;
use crate::intake::Intake;
use crate::ports::ApplicationStore;

/// Entry point for submitting and administering applications
pub struct ApplicationRegistry {
    store: Arc<dyn ApplicationStore>,
}

impl ApplicationRegistry {
    pub fn new(store: Arc<dyn ApplicationStore>) -> Self {
        Self { store }
    }

    /// Validates an intake and persists a new application.
    ///
    /// References carry a random suffix and can collide; on a uniqueness
    /// conflict the reference is regenerated and the insert retried once.
    #[instrument(skip(self, intake), fields(service_type = %intake.service_type))]
    pub async fn submit(&self, intake: Intake) -> Result<Application, ApplicationError> {
        intake.validate()?;
        let mut application = Application::from_intake(intake);

        match self.store.insert(&application).await {
            Ok(()) => {}
            Err(CoreError::Conflict(_)) => {
                warn!(
                    reference = %application.reference,
                    "application reference collided, regenerating"
                );
                application.regenerate_reference();
                self.store.insert(&application).await?;
            }
            Err(e) => return Err(e.into()),
        }

        info!(
            reference = %application.reference,
            id = %application.id,
            "application submitted"
        );
        Ok(application)
    }

    /// Fetches an application by its public reference.
    pub async fn get_by_reference(&self, reference: &str) -> Result<Application, ApplicationError> {
        Ok(self.store.get_by_reference(reference).await?)
    }

    /// Lists applications, optionally filtered by status.
    pub async fn list(
        &self,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<Application>, ApplicationError> {
        Ok(self.store.list(status).await?)
    }

    /// Sets an application's status from an admin action.
    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        reference: &str,
        target: ApplicationStatus,
    ) -> Result<Application, ApplicationError> {
        let mut application = self.store.get_by_reference(reference).await?;
        let previous = application.status;
        application.admin_set_status(target)?;

        if application.status != previous {
            self.store
                .update_status(application.id, application.status, None)
                .await?;
            info!(
                reference = %application.reference,
                from = %previous,
                to = %application.status,
                "application status updated"
            );
        }
        Ok(application)
    }
}
