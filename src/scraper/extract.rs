// scraper/extract.rs
//
// Pulls listing cards out of a search-result page. The primary path walks
// the __NEXT_DATA__ JSON blob; when the page ships without usable JSON the
// fallback scans item anchors and climbs to the surrounding card markup.

use crate::scraper::models::{ListingCard, SearchFilters};
use crate::scraper::ScraperError;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use std::sync::LazyLock;
use url::Url;

static ITEM_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/recommerce/forsale/item/\d+").unwrap());
static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\d[\d\s\u{00a0}]*\s*kr").unwrap());

/// Rebuild a subcategory search URL with the filter and page parameters.
/// Existing filter/page parameters on the stored URL are replaced, the rest
/// of its query string is preserved.
pub fn build_search_url(
    category_url: &str,
    filters: &SearchFilters,
    page: usize,
) -> Result<Url, ScraperError> {
    let mut url = Url::parse(category_url).map_err(|e| ScraperError::BadUrl(e.to_string()))?;

    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .into_owned()
        .filter(|(key, _)| {
            !matches!(
                key.as_str(),
                "shipping_types" | "price_from" | "price_to" | "published" | "page"
            )
        })
        .collect();

    if filters.fiks_ferdig {
        params.push(("shipping_types".into(), "0".into()));
    }
    if let Some(from) = filters.price_from {
        params.push(("price_from".into(), from.to_string()));
    }
    if let Some(to) = filters.price_to {
        params.push(("price_to".into(), to.to_string()));
    }
    if filters.published_today {
        params.push(("published".into(), "1".into()));
    }
    if page > 1 {
        params.push(("page".into(), page.to_string()));
    }

    url.set_query(None);
    if !params.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }

    Ok(url)
}

/// Extract all listing cards from one search page, deduped by url.
pub fn extract_cards(html: &str, base_url: &Url) -> Result<Vec<ListingCard>, ScraperError> {
    let document = Html::parse_document(html);
    let mut cards = Vec::new();

    if let Some(data) = next_data_json(&document)? {
        collect_next_data_cards(&data, base_url, &mut cards);
    }

    scan_item_anchors(&document, base_url, &mut cards)?;

    let mut seen = std::collections::HashSet::new();
    cards.retain(|card| seen.insert(card.url.clone()));
    Ok(cards)
}

fn next_data_json(document: &Html) -> Result<Option<Value>, ScraperError> {
    let selector = Selector::parse(r#"script[id="__NEXT_DATA__"]"#)
        .map_err(|e| ScraperError::HtmlParse(e.to_string()))?;

    let Some(element) = document.select(&selector).next() else {
        return Ok(None);
    };
    let Some(json_text) = element.text().next() else {
        return Ok(None);
    };

    // A broken blob just means we rely on the anchor scan instead.
    Ok(serde_json::from_str(json_text).ok())
}

fn collect_next_data_cards(node: &Value, base_url: &Url, out: &mut Vec<ListingCard>) {
    match node {
        Value::Object(map) => {
            let url = ["url", "href", "link"].iter().find_map(|key| {
                map.get(*key)
                    .and_then(Value::as_str)
                    .filter(|s| ITEM_URL_RE.is_match(s))
                    .map(|s| normalize_url(base_url, s))
            });
            let title = ["title", "name", "heading"].iter().find_map(|key| {
                map.get(*key)
                    .and_then(Value::as_str)
                    .map(clean)
                    .filter(|s| !s.is_empty())
            });

            if let (Some(url), Some(title)) = (url, title) {
                let price = ["price", "priceLabel", "formattedPrice", "priceText"]
                    .iter()
                    .find_map(|key| map.get(*key).map(value_text).filter(|s| !s.is_empty()))
                    .unwrap_or_default();

                let image = ["image", "imageUrl", "thumbnailUrl"]
                    .iter()
                    .find_map(|key| match map.get(*key) {
                        Some(Value::String(s)) if !s.trim().is_empty() => {
                            Some(normalize_url(base_url, s))
                        }
                        Some(Value::Array(items)) => items
                            .first()
                            .and_then(Value::as_str)
                            .map(|s| normalize_url(base_url, s)),
                        _ => None,
                    })
                    .unwrap_or_default();

                out.push(ListingCard {
                    url,
                    title,
                    price,
                    image,
                });
            }

            for value in map.values() {
                collect_next_data_cards(value, base_url, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_next_data_cards(item, base_url, out);
            }
        }
        _ => {}
    }
}

fn scan_item_anchors(
    document: &Html,
    base_url: &Url,
    out: &mut Vec<ListingCard>,
) -> Result<(), ScraperError> {
    let anchor_sel =
        Selector::parse("a[href]").map_err(|e| ScraperError::HtmlParse(e.to_string()))?;
    let title_sel = Selector::parse(r#"[data-testid="object-title"]"#)
        .map_err(|e| ScraperError::HtmlParse(e.to_string()))?;
    let heading_sel =
        Selector::parse("h1, h2, h3").map_err(|e| ScraperError::HtmlParse(e.to_string()))?;
    let img_sel = Selector::parse("img").map_err(|e| ScraperError::HtmlParse(e.to_string()))?;

    for anchor in document.select(&anchor_sel) {
        let href = anchor.value().attr("href").unwrap_or("");
        if !ITEM_URL_RE.is_match(href) {
            continue;
        }

        let container = card_container(anchor);
        let title = extract_title(container, anchor, &title_sel, &heading_sel);
        if title.is_empty() {
            continue;
        }

        out.push(ListingCard {
            url: normalize_url(base_url, href),
            title,
            price: extract_price(container),
            image: extract_image(container, base_url, &img_sel),
        });
    }

    Ok(())
}

/// Climb from the anchor to the card markup that wraps it. Search cards are
/// an `article` or carry the `sf-search-ad` class; seven levels is enough in
/// practice.
fn card_container(anchor: ElementRef<'_>) -> ElementRef<'_> {
    let mut container = anchor;
    for node in anchor.ancestors().take(7) {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        container = element;
        let is_card = element.value().name() == "article"
            || element
                .value()
                .classes()
                .any(|class| class == "sf-search-ad" || class == "relative");
        if is_card {
            break;
        }
    }
    container
}

fn extract_title(
    container: ElementRef<'_>,
    anchor: ElementRef<'_>,
    title_sel: &Selector,
    heading_sel: &Selector,
) -> String {
    if let Some(element) = container.select(title_sel).next() {
        let title = clean(&element.text().collect::<Vec<_>>().join(" "));
        if !title.is_empty() {
            return title;
        }
    }
    for heading in container.select(heading_sel) {
        let title = clean(&heading.text().collect::<Vec<_>>().join(" "));
        if !title.is_empty() {
            return title;
        }
    }
    if let Some(aria) = anchor.value().attr("aria-label") {
        let title = clean(aria);
        if !title.is_empty() {
            return title;
        }
    }
    clean(&anchor.text().collect::<Vec<_>>().join(" "))
}

fn extract_price(container: ElementRef<'_>) -> String {
    for node in container.text() {
        let text = clean(node);
        if let Some(found) = PRICE_RE.find(&text) {
            return clean(found.as_str());
        }
        if text.eq_ignore_ascii_case("til salgs") {
            return "Til salgs".to_string();
        }
    }
    String::new()
}

fn extract_image(container: ElementRef<'_>, base_url: &Url, img_sel: &Selector) -> String {
    let Some(img) = container.select(img_sel).next() else {
        return String::new();
    };
    let src = img
        .value()
        .attr("src")
        .or_else(|| img.value().attr("data-src"))
        .unwrap_or("");
    if src.is_empty() {
        return String::new();
    }
    normalize_url(base_url, &clean(src))
}

fn normalize_url(base_url: &Url, href: &str) -> String {
    if href.starts_with("http") {
        return href.to_string();
    }
    match base_url.join(href) {
        Ok(url) => url.to_string(),
        Err(_) => String::new(),
    }
}

/// Collapse runs of whitespace (including non-breaking spaces) to single
/// spaces and trim.
fn clean(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => clean(s),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}
