//! Tests for application reference generation and parsing

use std::collections::HashSet;
use std::str::FromStr;

use core_kernel::ApplicationReference;
use proptest::prelude::*;

#[test]
fn test_references_do_not_collide_in_practice() {
    let mut seen = HashSet::new();
    for _ in 0..1_000 {
        let reference = ApplicationReference::generate();
        assert!(
            seen.insert(reference.as_str().to_string()),
            "duplicate reference generated: {}",
            reference
        );
    }
}

#[test]
fn test_suffix_carries_the_full_random_width() {
    // Ten decimal digits cover the whole u32 range; a narrower suffix
    // collides within a single busy millisecond.
    let reference = ApplicationReference::generate();
    let suffix = reference.as_str().rsplit('-').next().unwrap();
    assert_eq!(suffix.len(), 10);
}

#[test]
fn test_reference_is_distinct_from_internal_identifiers() {
    // Internal ids are prefixed UUIDs; references are timestamp-based.
    let reference = ApplicationReference::generate();
    assert!(core_kernel::ApplicationId::from_str(reference.as_str()).is_err());
}

proptest! {
    #[test]
    fn prop_well_formed_references_parse(millis in 0u64..=4_102_444_800_000, suffix in 0u16..10_000) {
        let raw = format!("SA-{}-{:04}", millis, suffix);
        let parsed = ApplicationReference::from_str(&raw).unwrap();
        prop_assert_eq!(parsed.as_str(), raw.as_str());
    }

    #[test]
    fn prop_non_digit_suffix_is_rejected(suffix in "[a-zA-Z]{1,8}") {
        let raw = format!("SA-1719849600000-{}", suffix);
        prop_assert!(ApplicationReference::from_str(&raw).is_err());
    }
}
