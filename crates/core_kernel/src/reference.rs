//! Human-shareable application references
//!
//! Every service application carries a reference that citizens quote when
//! declaring a payment (e.g. on a bank transfer slip). References are
//! generated from a millisecond timestamp plus a random suffix so they are
//! unique with overwhelming probability, and they are formatted distinctly
//! from database-internal identifiers so the two can never be confused.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::CoreError;

/// Display prefix for application references.
pub const REFERENCE_PREFIX: &str = "SA";

/// A human-shareable application reference, e.g. `SA-1719849600000-0918273645`.
///
/// The store layer enforces uniqueness; callers regenerate and retry once
/// on a conflict before surfacing the failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationReference(String);

impl ApplicationReference {
    /// Generates a fresh reference from the current time and a random suffix.
    ///
    /// The suffix is a full random `u32`, so references minted within the
    /// same millisecond still collide only with negligible probability.
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        let suffix = Uuid::new_v4().as_fields().0;
        Self(format!("{}-{}-{:010}", REFERENCE_PREFIX, millis, suffix))
    }

    /// Returns the reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks whether a string has the `SA-<millis>-<suffix>` shape.
    pub fn is_well_formed(s: &str) -> bool {
        let mut parts = s.splitn(3, '-');
        let prefix = parts.next();
        let millis = parts.next();
        let suffix = parts.next();

        prefix == Some(REFERENCE_PREFIX)
            && millis.is_some_and(|m| !m.is_empty() && m.bytes().all(|b| b.is_ascii_digit()))
            && suffix.is_some_and(|x| !x.is_empty() && x.bytes().all(|b| b.is_ascii_digit()))
    }
}

impl fmt::Display for ApplicationReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ApplicationReference {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::is_well_formed(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(CoreError::validation(format!(
                "'{}' is not a valid application reference",
                s
            )))
        }
    }
}

impl From<ApplicationReference> for String {
    fn from(reference: ApplicationReference) -> String {
        reference.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_reference_is_well_formed() {
        let reference = ApplicationReference::generate();
        assert!(ApplicationReference::is_well_formed(reference.as_str()));
        assert!(reference.as_str().starts_with("SA-"));
    }

    #[test]
    fn test_parse_roundtrip() {
        let reference = ApplicationReference::generate();
        let parsed: ApplicationReference = reference.as_str().parse().unwrap();
        assert_eq!(reference, parsed);
    }

    #[test]
    fn test_rejects_malformed_references() {
        assert!("APP-123".parse::<ApplicationReference>().is_err());
        assert!("SA-abc-0001".parse::<ApplicationReference>().is_err());
        assert!("SA-1719849600000".parse::<ApplicationReference>().is_err());
        assert!("".parse::<ApplicationReference>().is_err());
    }
}
