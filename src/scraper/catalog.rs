// scraper/catalog.rs
//
// finn.no does not expose a machine-readable category list, so the Torget
// subcategories are a fixed catalog keyed by their search URLs.

use crate::scraper::models::CategoryItem;

pub const BASE_URL: &str = "https://www.finn.no/recommerce/forsale/search";

const KNOWN_CATEGORIES: &[(&str, &str)] = &[("Torget", BASE_URL)];

const TORGET_SUBCATEGORIES: &[(&str, &str)] = &[
    (
        "Antikviteter og kunst",
        "https://www.finn.no/recommerce/forsale/search?category=0.76",
    ),
    (
        "Dyr og utstyr",
        "https://www.finn.no/recommerce/forsale/search?category=0.77",
    ),
    (
        "Elektronikk og hvitevarer",
        "https://www.finn.no/recommerce/forsale/search?category=0.93",
    ),
    (
        "Foreldre og barn",
        "https://www.finn.no/recommerce/forsale/search?category=0.68",
    ),
    (
        "Fritid, hobby og underholdning",
        "https://www.finn.no/recommerce/forsale/search?category=0.86",
    ),
    (
        "Hage, oppussing og hus",
        "https://www.finn.no/recommerce/forsale/search?category=0.67",
    ),
    (
        "Klær, kosmetikk og tilbehør",
        "https://www.finn.no/recommerce/forsale/search?category=0.71",
    ),
    (
        "Møbler og interiør",
        "https://www.finn.no/recommerce/forsale/search?category=0.78",
    ),
    (
        "Næringsvirksomhet",
        "https://www.finn.no/recommerce/forsale/search?category=0.91",
    ),
    (
        "Sport og friluftsliv",
        "https://www.finn.no/recommerce/forsale/search?category=0.69",
    ),
    (
        "Utstyr til bil, båt og MC",
        "https://www.finn.no/recommerce/forsale/search?category=0.90",
    ),
];

pub fn categories() -> Vec<CategoryItem> {
    KNOWN_CATEGORIES
        .iter()
        .map(|(name, url)| CategoryItem {
            name: name.to_string(),
            url: url.to_string(),
        })
        .collect()
}

pub fn torget_subcategories() -> Vec<CategoryItem> {
    TORGET_SUBCATEGORIES
        .iter()
        .map(|(name, url)| CategoryItem {
            name: name.to_string(),
            url: url.to_string(),
        })
        .collect()
}
