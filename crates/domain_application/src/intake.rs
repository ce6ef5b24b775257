//! Intake validation for new service applications

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::application::{DocumentMeta, ServiceType};
use crate::error::ApplicationError;

/// Raw intake data for a new application, prior to validation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intake {
    pub service_type: ServiceType,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub ward_number: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub additional_info: Option<String>,
    #[serde(default)]
    pub documents: Vec<DocumentMeta>,
}

impl Intake {
    /// Validates the intake.
    ///
    /// Required fields must be non-blank after trimming, the email must be
    /// well-formed, and birth-related service types must carry a date of
    /// birth that is not in the future. Error messages name the wire field.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        let required = [
            (self.first_name.as_str(), "firstName"),
            (self.last_name.as_str(), "lastName"),
            (self.email.as_str(), "email"),
            (self.phone.as_str(), "phone"),
            (self.address.as_str(), "address"),
            (self.ward_number.as_str(), "wardNumber"),
        ];
        for (value, field) in required {
            if value.trim().is_empty() {
                return Err(ApplicationError::validation(format!(
                    "{} is required",
                    field
                )));
            }
        }

        if !self.email.trim().validate_email() {
            return Err(ApplicationError::validation(
                "email is not a valid email address",
            ));
        }

        self.validate_phone()?;
        self.validate_date_of_birth()?;

        Ok(())
    }

    fn validate_phone(&self) -> Result<(), ApplicationError> {
        let phone = self.phone.trim();
        let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
        let well_formed = phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' '));
        if digits < 7 || !well_formed {
            return Err(ApplicationError::validation(
                "phone must contain at least 7 digits",
            ));
        }
        Ok(())
    }

    fn validate_date_of_birth(&self) -> Result<(), ApplicationError> {
        if self.service_type.is_birth_related() {
            let dob = self.date_of_birth.ok_or_else(|| {
                ApplicationError::validation(format!(
                    "dateOfBirth is required for service type '{}'",
                    self.service_type
                ))
            })?;
            if dob > Utc::now().date_naive() {
                return Err(ApplicationError::validation(
                    "dateOfBirth cannot be in the future",
                ));
            }
        }
        Ok(())
    }
}
