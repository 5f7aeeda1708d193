// src/domain/changes.rs

use serde::Serialize;

/// What happened to a listing between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    New,
    StatusChanged,
    PriceChanged,
    Removed,
}

impl ChangeKind {
    pub fn label(&self) -> &'static str {
        match self {
            ChangeKind::New => "new",
            ChangeKind::StatusChanged => "status_changed",
            ChangeKind::PriceChanged => "price_changed",
            ChangeKind::Removed => "removed",
        }
    }
}

/// One detected difference between two snapshots for the same listing.
///
/// `old_value`/`new_value` hold the changed field for status and price
/// changes; for `New` and `Removed` the present side carries a
/// "status (price)" summary and the absent side is empty.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeRecord {
    pub url: String,
    pub title: String,
    pub kind: ChangeKind,
    pub old_value: String,
    pub new_value: String,
}
