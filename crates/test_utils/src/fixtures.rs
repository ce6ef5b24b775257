//! Pre-built test data for common entities

use chrono::NaiveDate;

/// Common string values used across tests
pub struct StringFixtures;

impl StringFixtures {
    pub fn first_name() -> &'static str {
        "Amina"
    }

    pub fn last_name() -> &'static str {
        "Yusuf"
    }

    pub fn email() -> &'static str {
        "amina.yusuf@example.com"
    }

    pub fn phone() -> &'static str {
        "+234 801 234 5678"
    }

    pub fn address() -> &'static str {
        "12 Market Road, Old Town"
    }

    pub fn ward_number() -> &'static str {
        "7"
    }

    pub fn transaction_id() -> &'static str {
        "TXN-2026-000123"
    }
}

/// Common dates used across tests
pub struct TemporalFixtures;

impl TemporalFixtures {
    pub fn date_of_birth() -> NaiveDate {
        NaiveDate::from_ymd_opt(1988, 3, 14).unwrap()
    }

    pub fn payment_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }
}
