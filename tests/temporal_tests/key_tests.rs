//! Tests for TemporalKey
//!
//! These tests verify:
//! - Wildcard-aware query comparison
//! - Strict ordering used by the index
//! - Column parsing and string round-trips
//! - Prefix-shape detection

use std::cmp::Ordering;

use meteoindex::temporal::{Date, TemporalKey, TimeOfDay};

// =============================================================================
// Helper Functions
// =============================================================================

fn sample_keys() -> Vec<TemporalKey> {
    vec![
        TemporalKey::at(2023, 12, 31, 23, 0),
        TemporalKey::at(2024, 1, 1, 0, 0),
        TemporalKey::at(2024, 1, 1, 12, 30),
        TemporalKey::at(2024, 1, 2, 0, 0),
        TemporalKey::at(2024, 2, 1, 6, 0),
        TemporalKey::at(2025, 1, 1, 0, 0),
    ]
}

fn fields(key: &TemporalKey) -> (u16, u8, u8, u8, u8) {
    (
        key.date.year.unwrap(),
        key.date.month.unwrap(),
        key.date.day.unwrap(),
        key.time.hour.unwrap(),
        key.time.minute.unwrap(),
    )
}

// =============================================================================
// Query Comparison Tests
// =============================================================================

#[test]
fn test_compare_is_reflexive() {
    for key in sample_keys() {
        assert_eq!(key.compare(&key), Ordering::Equal);
    }
    assert_eq!(TemporalKey::year(2024).compare(&TemporalKey::year(2024)), Ordering::Equal);
}

#[test]
fn test_compare_concrete_keys_is_lexicographic() {
    let keys = sample_keys();
    for a in &keys {
        for b in &keys {
            assert_eq!(a.compare(b), fields(a).cmp(&fields(b)), "{} vs {}", a, b);
        }
    }
}

#[test]
fn test_compare_date_before_time() {
    let early_day_late_hour = TemporalKey::at(2024, 1, 1, 23, 0);
    let late_day_early_hour = TemporalKey::at(2024, 1, 2, 0, 0);
    assert_eq!(early_day_late_hour.compare(&late_day_early_hour), Ordering::Less);
}

#[test]
fn test_all_wildcard_key_equals_everything() {
    let any = TemporalKey::any();
    for key in sample_keys() {
        assert_eq!(any.compare(&key), Ordering::Equal);
        assert_eq!(key.compare(&any), Ordering::Equal);
    }
}

#[test]
fn test_year_wildcard_matches_whole_year() {
    let year = TemporalKey::year(2024);

    assert_eq!(TemporalKey::at(2024, 6, 15, 12, 0).compare(&year), Ordering::Equal);
    assert_eq!(TemporalKey::at(2023, 12, 31, 23, 0).compare(&year), Ordering::Less);
    assert_eq!(TemporalKey::at(2025, 1, 1, 0, 0).compare(&year), Ordering::Greater);
}

#[test]
fn test_wildcard_in_middle_field() {
    // any month of 2024, day 1, midnight
    let query = TemporalKey::any().with_year(2024).with_day(1).with_hour(0).with_minute(0);

    assert_eq!(TemporalKey::at(2024, 7, 1, 0, 0).compare(&query), Ordering::Equal);
    assert_eq!(TemporalKey::at(2024, 7, 2, 0, 0).compare(&query), Ordering::Greater);
}

#[test]
fn test_within_bounds() {
    let from = TemporalKey::year(2024).with_month(1);
    let to = TemporalKey::year(2024).with_month(1);

    assert!(TemporalKey::at(2024, 1, 20, 5, 0).within(&from, &to));
    assert!(!TemporalKey::at(2024, 2, 1, 0, 0).within(&from, &to));

    // reversed bounds match nothing
    let a = TemporalKey::at(2024, 1, 2, 0, 0);
    let b = TemporalKey::at(2024, 1, 1, 0, 0);
    assert!(!TemporalKey::at(2024, 1, 1, 12, 0).within(&a, &b));
}

#[test]
fn test_date_and_time_compare_independently() {
    let date = Date::new(Some(2024), None, Some(5));
    assert_eq!(date.compare(&Date::new(Some(2024), Some(3), Some(5))), Ordering::Equal);

    let time = TimeOfDay::new(None, Some(30));
    assert_eq!(time.compare(&TimeOfDay::new(Some(7), Some(45))), Ordering::Less);
}

// =============================================================================
// Strict Ordering Tests
// =============================================================================

#[test]
fn test_ord_matches_compare_for_concrete_keys() {
    let keys = sample_keys();
    for a in &keys {
        for b in &keys {
            assert_eq!(a.cmp(b), a.compare(b));
        }
    }
}

#[test]
fn test_ord_puts_wildcards_first() {
    let year = TemporalKey::year(2024);
    assert!(year < TemporalKey::at(2024, 1, 1, 0, 0));
    assert!(TemporalKey::any() < TemporalKey::year(1900));
}

#[test]
fn test_is_concrete() {
    assert!(TemporalKey::at(2024, 1, 1, 0, 0).is_concrete());
    assert!(!TemporalKey::year(2024).is_concrete());
    assert!(!TemporalKey::any().is_concrete());
}

#[test]
fn test_is_prefix() {
    assert!(TemporalKey::any().is_prefix());
    assert!(TemporalKey::year(2024).is_prefix());
    assert!(TemporalKey::year(2024).with_month(3).is_prefix());
    assert!(TemporalKey::at(2024, 1, 1, 0, 0).is_prefix());

    assert!(!TemporalKey::any().with_month(3).is_prefix());
    assert!(!TemporalKey::year(2024).with_hour(6).is_prefix());
}

// =============================================================================
// Parsing Tests
// =============================================================================

#[test]
fn test_parse_columns_hhmm_and_colon_forms() {
    let compact = TemporalKey::parse_columns("2024-01-01", "1230").unwrap();
    let colon = TemporalKey::parse_columns("2024-01-01", "12:30").unwrap();
    let utc = TemporalKey::parse_columns("2024-01-01", "1230 UTC").unwrap();

    let expected = TemporalKey::at(2024, 1, 1, 12, 30);
    assert_eq!(compact, expected);
    assert_eq!(colon, expected);
    assert_eq!(utc, expected);
}

#[test]
fn test_parse_columns_accepts_other_date_separator() {
    let key = TemporalKey::parse_columns("2024/03/09", "0600").unwrap();
    assert_eq!(key, TemporalKey::at(2024, 3, 9, 6, 0));
}

#[test]
fn test_parse_rejects_garbage() {
    assert!(TemporalKey::parse_columns("not-a-date", "0000").is_err());
    assert!(TemporalKey::parse_columns("2024-01-01", "xx").is_err());
    assert!(TemporalKey::parse_columns("2024-13-01", "0000").is_err());
    assert!(TemporalKey::parse_columns("2024-01-01", "2500").is_err());
    assert!(TemporalKey::parse_columns("2024-01", "0000").is_err());
}

#[test]
fn test_from_str_forms() {
    let expected = TemporalKey::at(2024, 1, 2, 3, 4);
    assert_eq!("2024-01-02 03:04".parse::<TemporalKey>().unwrap(), expected);
    assert_eq!("2024-01-02;0304".parse::<TemporalKey>().unwrap(), expected);
    assert_eq!("2024-01-02T03:04".parse::<TemporalKey>().unwrap(), expected);

    let date_only: TemporalKey = "2024-01-02".parse().unwrap();
    assert_eq!(date_only.time, TimeOfDay::default());
    assert_eq!(date_only.date, Date::new(Some(2024), Some(1), Some(2)));
}

#[test]
fn test_display() {
    assert_eq!(TemporalKey::at(2024, 1, 2, 3, 4).to_string(), "2024-01-02 03:04");
    assert_eq!(TemporalKey::year(2024).to_string(), "2024-**-** **:**");
    assert_eq!(TemporalKey::any().to_string(), "****-**-** **:**");
}

#[test]
fn test_display_parses_back_for_concrete_keys() {
    for key in sample_keys() {
        assert_eq!(key.to_string().parse::<TemporalKey>().unwrap(), key);
    }
}
