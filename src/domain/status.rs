// src/domain/status.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a listing, normalized from the localized text
/// that finn.no shows on ad pages and that older exports carry verbatim.
///
/// Normalizing here keeps locale-specific strings out of the comparator:
/// two statuses are "the same" exactly when the enum values are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ListingStatus {
    Active,
    Sold,
    Reserved,
    Inactive,
    NotFound,
    /// Anything we do not recognize, kept lowercased so equality
    /// stays case-insensitive.
    Other(String),
}

impl ListingStatus {
    /// Canonical label, as written to spreadsheets and JSON.
    pub fn label(&self) -> &str {
        match self {
            ListingStatus::Active => "Aktiv",
            ListingStatus::Sold => "Solgt",
            ListingStatus::Reserved => "Reservert",
            ListingStatus::Inactive => "Inaktiv",
            ListingStatus::NotFound => "404",
            ListingStatus::Other(raw) => raw,
        }
    }

    /// Parse a status cell or badge text. Matching is by substring on the
    /// lowercased input because the site decorates labels ("Solgt!", badge
    /// markup text, etc.).
    pub fn parse(raw: &str) -> ListingStatus {
        let text = raw.trim().to_lowercase();

        if text.contains("solgt") {
            return ListingStatus::Sold;
        }
        if text.contains("reserv") {
            return ListingStatus::Reserved;
        }
        // "inaktiv" contains "aktiv", so it must be checked first.
        if text.contains("inaktiv") {
            return ListingStatus::Inactive;
        }
        if text.contains("404") || text.contains("not found") {
            return ListingStatus::NotFound;
        }
        if text.contains("aktiv") {
            return ListingStatus::Active;
        }

        ListingStatus::Other(text)
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<String> for ListingStatus {
    fn from(raw: String) -> Self {
        ListingStatus::parse(&raw)
    }
}

impl From<ListingStatus> for String {
    fn from(status: ListingStatus) -> Self {
        status.label().to_string()
    }
}
