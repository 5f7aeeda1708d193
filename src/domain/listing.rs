// src/domain/listing.rs

use crate::domain::status::ListingStatus;
use serde::{Deserialize, Serialize};

/// One scraped advertisement as it appears in a search-result card.
///
/// `url` is the detail-page URL and acts as the listing's identity within a
/// snapshot; the scraper dedupes on it. `price` stays a locale-formatted
/// string ("1 500 kr", "Til salgs") and is compared verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub category: String,
    pub subcategory: String,
    pub url: String,
    pub title: String,
    pub price: String,
    pub status: ListingStatus,
    pub image: String,
}
