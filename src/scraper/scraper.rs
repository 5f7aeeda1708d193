// scraper.rs
use crate::domain::{Listing, ListingStatus};
use crate::scraper::extract::{build_search_url, extract_cards};
use crate::scraper::models::SearchFilters;
use crate::scraper::ScraperError;
use rand::Rng;
use reqwest::blocking::Client;
use std::collections::HashSet;
use std::time::Duration;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

const MAX_PAGES: usize = 40;

pub struct TorgetScraper {
    client: Client,
}

impl TorgetScraper {
    pub fn new() -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        Ok(Self { client })
    }

    /// Walk the paginated search results for one subcategory and collect up
    /// to `max_items` listings, deduped by url.
    ///
    /// A page that fails to fetch ends the walk; whatever was collected so
    /// far is returned. There is deliberately no retry here, a short capture
    /// is reported once and the user re-triggers.
    pub fn scrape_listings(
        &self,
        category_name: &str,
        subcategory_name: &str,
        subcategory_url: &str,
        filters: &SearchFilters,
        max_items: usize,
    ) -> Result<Vec<Listing>, ScraperError> {
        let category = if category_name.is_empty() {
            "Torget"
        } else {
            category_name
        };

        let mut listings: Vec<Listing> = Vec::new();
        let mut seen_urls: HashSet<String> = HashSet::new();

        for page in 1..=MAX_PAGES {
            let page_url = build_search_url(subcategory_url, filters, page)?;
            eprintln!("📄 Fetching page {page}: {page_url}");

            let html = match self.fetch_html(page_url.as_str()) {
                Ok(html) => html,
                Err(e) => {
                    eprintln!("⚠️ Page {page} failed: {e}");
                    break;
                }
            };

            let cards = extract_cards(&html, &page_url)?;
            if cards.is_empty() {
                eprintln!("🏁 No listings on page {page}, stopping");
                break;
            }

            let mut added = 0;
            for card in cards {
                if !seen_urls.insert(card.url.clone()) {
                    continue;
                }
                added += 1;

                listings.push(Listing {
                    category: category.to_string(),
                    subcategory: subcategory_name.to_string(),
                    url: card.url,
                    title: card.title,
                    price: card.price,
                    // Search cards never show a lifecycle badge; non-active
                    // statuses only enter via previously exported files.
                    status: ListingStatus::Active,
                    image: card.image,
                });

                if listings.len() >= max_items {
                    eprintln!("✅ Reached {max_items} listings on page {page}");
                    return Ok(listings);
                }
            }

            eprintln!("✅ Page {page} parsed ({added} new, {} total)", listings.len());

            // Page param ignored or end of results reached.
            if added == 0 {
                break;
            }

            // Polite jittered pause between pages.
            let pause = rand::thread_rng().gen_range(300..=900);
            std::thread::sleep(Duration::from_millis(pause));
        }

        Ok(listings)
    }

    fn fetch_html(&self, url: &str) -> Result<String, ScraperError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ScraperError::Network(format!("HTTP {status} for {url}")));
        }

        Ok(text)
    }
}
