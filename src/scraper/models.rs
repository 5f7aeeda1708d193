use serde::Serialize;

/// A category or subcategory entry served to the UI.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryItem {
    pub name: String,
    pub url: String,
}

/// One listing card as pulled off a search-result page, before the capture
/// labels and status are attached.
#[derive(Debug, Clone)]
pub struct ListingCard {
    pub url: String,
    pub title: String,
    pub price: String,
    pub image: String,
}

/// Optional search filters mapped onto finn.no query parameters.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    /// "Fiks ferdig" shipping-only toggle (`shipping_types=0`).
    pub fiks_ferdig: bool,
    pub price_from: Option<i64>,
    pub price_to: Option<i64>,
    /// Only ads published today (`published=1`).
    pub published_today: bool,
}
