// src/domain/logic.rs

use crate::domain::changes::{ChangeKind, ChangeRecord};
use crate::domain::listing::Listing;
use crate::domain::snapshot::Snapshot;
use std::collections::HashMap;

/// Compute the differences between an old snapshot and a freshly captured
/// one for the same subcategory.
///
/// Listings are matched by `url`. The result follows the new snapshot's
/// order, with removed listings appended at the end in old-snapshot order.
/// Status is compared as the normalized enum, price as the verbatim string.
///
/// Pure function; an empty `old` degenerates to "everything is new" and an
/// empty `new` to "everything is removed". Duplicate urls within one
/// snapshot are the scraper's problem, not handled here.
pub fn detect_changes(old: &Snapshot, new: &Snapshot) -> Vec<ChangeRecord> {
    let old_by_url: HashMap<&str, &Listing> = old
        .listings
        .iter()
        .map(|listing| (listing.url.as_str(), listing))
        .collect();

    let mut changes = Vec::new();

    for listing in &new.listings {
        match old_by_url.get(listing.url.as_str()) {
            None => changes.push(ChangeRecord {
                url: listing.url.clone(),
                title: listing.title.clone(),
                kind: ChangeKind::New,
                old_value: String::new(),
                new_value: summarize(listing),
            }),
            Some(prior) => {
                if prior.status != listing.status {
                    changes.push(ChangeRecord {
                        url: listing.url.clone(),
                        title: listing.title.clone(),
                        kind: ChangeKind::StatusChanged,
                        old_value: prior.status.label().to_string(),
                        new_value: listing.status.label().to_string(),
                    });
                } else if prior.price != listing.price {
                    changes.push(ChangeRecord {
                        url: listing.url.clone(),
                        title: listing.title.clone(),
                        kind: ChangeKind::PriceChanged,
                        old_value: prior.price.clone(),
                        new_value: listing.price.clone(),
                    });
                }
            }
        }
    }

    let new_urls: std::collections::HashSet<&str> = new
        .listings
        .iter()
        .map(|listing| listing.url.as_str())
        .collect();

    for listing in &old.listings {
        if !new_urls.contains(listing.url.as_str()) {
            changes.push(ChangeRecord {
                url: listing.url.clone(),
                title: listing.title.clone(),
                kind: ChangeKind::Removed,
                old_value: summarize(listing),
                new_value: String::new(),
            });
        }
    }

    changes
}

fn summarize(listing: &Listing) -> String {
    if listing.price.is_empty() {
        listing.status.label().to_string()
    } else {
        format!("{} ({})", listing.status.label(), listing.price)
    }
}
