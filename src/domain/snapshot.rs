// src/domain/snapshot.rs

use crate::domain::listing::Listing;
use chrono::NaiveDateTime;

/// Capture parameters recorded alongside a snapshot. The recheck flow reads
/// these back from the `meta` sheet to re-run the same scrape.
#[derive(Debug, Clone)]
pub struct SnapshotMeta {
    pub category_name: String,
    pub subcategory_name: String,
    pub subcategory_url: String,
    pub max_items: usize,
    pub captured_at: NaiveDateTime,
}

/// One captured set of listings plus its capture parameters.
/// Immutable once built; the comparator takes snapshots by reference.
#[derive(Debug)]
pub struct Snapshot {
    pub meta: SnapshotMeta,
    pub listings: Vec<Listing>,
}

impl Snapshot {
    pub fn new(meta: SnapshotMeta, listings: Vec<Listing>) -> Self {
        Snapshot { meta, listings }
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
