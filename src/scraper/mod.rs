mod catalog;
mod extract;
mod models;
mod scraper;
mod scraper_error;

pub use catalog::{categories, torget_subcategories, BASE_URL};
pub use extract::{build_search_url, extract_cards};
pub use models::{CategoryItem, ListingCard, SearchFilters};
pub use scraper::TorgetScraper;
pub use scraper_error::ScraperError;
