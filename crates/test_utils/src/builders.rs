//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible
//! defaults. These builders allow tests to specify only the relevant fields
//! while using defaults for everything else.

use chrono::NaiveDate;
use domain_application::{DocumentMeta, Intake, ServiceType};
use domain_payment::{PaymentDeclaration, PaymentMethod};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::{StringFixtures, TemporalFixtures};

/// Builder for constructing intake data
pub struct TestIntakeBuilder {
    intake: Intake,
}

impl Default for TestIntakeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestIntakeBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            intake: Intake {
                service_type: ServiceType::BusinessPermit,
                first_name: StringFixtures::first_name().to_string(),
                last_name: StringFixtures::last_name().to_string(),
                email: StringFixtures::email().to_string(),
                phone: StringFixtures::phone().to_string(),
                address: StringFixtures::address().to_string(),
                ward_number: StringFixtures::ward_number().to_string(),
                date_of_birth: None,
                purpose: Some("Opening a retail shop".to_string()),
                additional_info: None,
                documents: Vec::new(),
            },
        }
    }

    /// Creates a builder for a birth-related service with a valid date of
    /// birth already set
    pub fn birth_certificate() -> Self {
        Self::new()
            .with_service_type(ServiceType::BirthCertificate)
            .with_date_of_birth(Some(TemporalFixtures::date_of_birth()))
    }

    /// Sets the service type
    pub fn with_service_type(mut self, service_type: ServiceType) -> Self {
        self.intake.service_type = service_type;
        self
    }

    /// Sets the first name
    pub fn with_first_name(mut self, name: impl Into<String>) -> Self {
        self.intake.first_name = name.into();
        self
    }

    /// Sets the email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.intake.email = email.into();
        self
    }

    /// Sets the phone
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.intake.phone = phone.into();
        self
    }

    /// Sets the date of birth
    pub fn with_date_of_birth(mut self, dob: Option<NaiveDate>) -> Self {
        self.intake.date_of_birth = dob;
        self
    }

    /// Adds a supporting document
    pub fn with_document(mut self, name: impl Into<String>, size: u64) -> Self {
        self.intake.documents.push(DocumentMeta {
            name: name.into(),
            size,
            content_type: "application/pdf".to_string(),
        });
        self
    }

    /// Builds the intake
    pub fn build(self) -> Intake {
        self.intake
    }
}

/// Builder for constructing payment declarations
pub struct TestDeclarationBuilder {
    declaration: PaymentDeclaration,
}

impl Default for TestDeclarationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDeclarationBuilder {
    /// Creates a new builder with default values. The application reference
    /// must usually be overridden with [`for_reference`](Self::for_reference).
    pub fn new() -> Self {
        Self {
            declaration: PaymentDeclaration {
                application_id: "SA-1719849600000-0042".to_string(),
                payment_method: PaymentMethod::BankTransfer,
                transaction_id: StringFixtures::transaction_id().to_string(),
                amount: dec!(5000),
                payment_date: Some(TemporalFixtures::payment_date()),
            },
        }
    }

    /// Sets the application reference the payment is declared against
    pub fn for_reference(mut self, reference: impl Into<String>) -> Self {
        self.declaration.application_id = reference.into();
        self
    }

    /// Sets the payment method
    pub fn with_method(mut self, method: PaymentMethod) -> Self {
        self.declaration.payment_method = method;
        self
    }

    /// Sets the amount
    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.declaration.amount = amount;
        self
    }

    /// Sets the transaction id
    pub fn with_payment_date(mut self, payment_date: Option<NaiveDate>) -> Self {
        self.declaration.payment_date = payment_date;
        self
    }

    pub fn with_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.declaration.transaction_id = transaction_id.into();
        self
    }

    /// Builds the declaration
    pub fn build(self) -> PaymentDeclaration {
        self.declaration
    }
}
