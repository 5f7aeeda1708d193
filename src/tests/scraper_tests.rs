// src/tests/scraper_tests.rs

use crate::scraper::{build_search_url, extract_cards, SearchFilters};
use url::Url;

const SUBCATEGORY_URL: &str = "https://www.finn.no/recommerce/forsale/search?category=0.77";

fn base_url() -> Url {
    Url::parse(SUBCATEGORY_URL).unwrap()
}

#[test]
fn first_page_url_carries_no_page_param() {
    let url = build_search_url(SUBCATEGORY_URL, &SearchFilters::default(), 1).unwrap();
    assert_eq!(url.as_str(), SUBCATEGORY_URL);
}

#[test]
fn later_pages_get_a_page_param() {
    let url = build_search_url(SUBCATEGORY_URL, &SearchFilters::default(), 3).unwrap();
    assert!(url.query_pairs().any(|(k, v)| k == "page" && v == "3"));
    assert!(url.query_pairs().any(|(k, v)| k == "category" && v == "0.77"));
}

#[test]
fn filters_map_onto_query_params() {
    let filters = SearchFilters {
        fiks_ferdig: true,
        price_from: Some(100),
        price_to: Some(2000),
        published_today: true,
    };
    let url = build_search_url(SUBCATEGORY_URL, &filters, 1).unwrap();

    assert!(url.query_pairs().any(|(k, v)| k == "shipping_types" && v == "0"));
    assert!(url.query_pairs().any(|(k, v)| k == "price_from" && v == "100"));
    assert!(url.query_pairs().any(|(k, v)| k == "price_to" && v == "2000"));
    assert!(url.query_pairs().any(|(k, v)| k == "published" && v == "1"));
}

#[test]
fn stale_page_param_on_the_stored_url_is_replaced() {
    let stored = format!("{SUBCATEGORY_URL}&page=9");
    let url = build_search_url(&stored, &SearchFilters::default(), 2).unwrap();

    let pages: Vec<String> = url
        .query_pairs()
        .filter(|(k, _)| k == "page")
        .map(|(_, v)| v.into_owned())
        .collect();
    assert_eq!(pages, vec!["2"]);
}

#[test]
fn rejects_an_unparsable_subcategory_url() {
    assert!(build_search_url("not a url", &SearchFilters::default(), 1).is_err());
}

#[test]
fn extracts_cards_from_anchor_markup() {
    let html = r##"<html><body>
        <article class="sf-search-ad">
            <a href="/recommerce/forsale/item/123456" aria-label="Blue sofa"></a>
            <h2>Blue sofa</h2>
            <span>1 500 kr</span>
            <img src="https://images.finncdn.no/sofa.jpg">
        </article>
        <article class="sf-search-ad">
            <a href="/recommerce/forsale/item/654321"></a>
            <h2>Old lamp</h2>
            <span>Til salgs</span>
        </article>
        <a href="/about">not a listing</a>
    </body></html>"##;

    let cards = extract_cards(html, &base_url()).unwrap();
    assert_eq!(cards.len(), 2);

    assert_eq!(
        cards[0].url,
        "https://www.finn.no/recommerce/forsale/item/123456"
    );
    assert_eq!(cards[0].title, "Blue sofa");
    assert_eq!(cards[0].price, "1 500 kr");
    assert_eq!(cards[0].image, "https://images.finncdn.no/sofa.jpg");

    assert_eq!(cards[1].title, "Old lamp");
    assert_eq!(cards[1].price, "Til salgs");
    assert!(cards[1].image.is_empty());
}

#[test]
fn extracts_cards_from_next_data_json() {
    let html = r##"<html><body>
        <script id="__NEXT_DATA__" type="application/json">
        {"props":{"pageProps":{"listings":[
            {"url":"/recommerce/forsale/item/111222","title":"Wooden desk",
             "price":"900 kr","image":"https://images.finncdn.no/desk.jpg"}
        ]}}}
        </script>
    </body></html>"##;

    let cards = extract_cards(html, &base_url()).unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(
        cards[0].url,
        "https://www.finn.no/recommerce/forsale/item/111222"
    );
    assert_eq!(cards[0].title, "Wooden desk");
    assert_eq!(cards[0].price, "900 kr");
    assert_eq!(cards[0].image, "https://images.finncdn.no/desk.jpg");
}

#[test]
fn next_data_and_anchor_hits_for_the_same_item_are_deduped() {
    let html = r##"<html><body>
        <script id="__NEXT_DATA__" type="application/json">
        {"items":[{"href":"/recommerce/forsale/item/777888","name":"Ski boots","price":"400 kr"}]}
        </script>
        <article class="sf-search-ad">
            <a href="/recommerce/forsale/item/777888"></a>
            <h2>Ski boots</h2>
        </article>
    </body></html>"##;

    let cards = extract_cards(html, &base_url()).unwrap();
    assert_eq!(cards.len(), 1);
    // The JSON hit wins and keeps its price.
    assert_eq!(cards[0].price, "400 kr");
}

#[test]
fn page_without_listings_yields_nothing() {
    let html = "<html><body><p>FINN finner du alt</p></body></html>";
    let cards = extract_cards(html, &base_url()).unwrap();
    assert!(cards.is_empty());
}
