// src/tests/status_tests.rs

use crate::domain::ListingStatus;

#[test]
fn parses_localized_labels() {
    assert_eq!(ListingStatus::parse("Aktiv"), ListingStatus::Active);
    assert_eq!(ListingStatus::parse("Solgt!"), ListingStatus::Sold);
    assert_eq!(ListingStatus::parse("reservert"), ListingStatus::Reserved);
    assert_eq!(ListingStatus::parse("Inaktiv"), ListingStatus::Inactive);
    assert_eq!(ListingStatus::parse("404"), ListingStatus::NotFound);
}

#[test]
fn inaktiv_is_not_mistaken_for_aktiv() {
    assert_eq!(ListingStatus::parse("INAKTIV"), ListingStatus::Inactive);
}

#[test]
fn unknown_labels_are_kept_and_compare_case_insensitively() {
    let a = ListingStatus::parse("Fjernet");
    let b = ListingStatus::parse("fjernet");
    assert_eq!(a, b);
    assert_eq!(a.label(), "fjernet");
}

#[test]
fn labels_round_trip_through_parse() {
    for status in [
        ListingStatus::Active,
        ListingStatus::Sold,
        ListingStatus::Reserved,
        ListingStatus::Inactive,
        ListingStatus::NotFound,
    ] {
        assert_eq!(ListingStatus::parse(status.label()), status);
    }
}
