use crate::domain::{detect_changes, Snapshot, SnapshotMeta};
use crate::errors::ServerError;
use crate::responses::{html_response, json_response, xlsx_response, ResultResp};
use crate::scraper::{categories, torget_subcategories, SearchFilters, TorgetScraper};
use crate::spreadsheets::{export_changes_xlsx, export_snapshot_xlsx, read_snapshot_xlsx};
use crate::templates;
use astra::Request;
use multipart::server::Multipart;
use serde_json::json;
use std::collections::HashMap;
use std::io::Read;

pub fn handle(mut req: Request) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => html_response(templates::pages::home_page()),

        ("GET", "/api/categories") => json_response(&json!({ "items": categories() })),
        ("GET", "/api/torget-subcategories") => {
            json_response(&json!({ "items": torget_subcategories() }))
        }

        ("POST", "/api/parse") => parse_listings(&mut req),
        ("POST", "/api/recheck") => recheck(&mut req),

        _ => Err(ServerError::NotFound),
    }
}

/// `POST /api/parse` — capture a snapshot for one subcategory. Returns a
/// JSON preview when `preview` is set, otherwise an XLSX download with
/// `data` and `meta` sheets.
fn parse_listings(req: &mut Request) -> ResultResp {
    let form = parse_form_body(req)?;

    let subcategory_url = form.get("subcategory_url").cloned().unwrap_or_default();
    if subcategory_url.is_empty() {
        return Err(ServerError::BadRequest(
            "subcategory_url is required".to_string(),
        ));
    }

    let category_name = form.get("category_name").cloned().unwrap_or_default();
    let subcategory_name = form.get("subcategory_name").cloned().unwrap_or_default();
    let max_items = parse_max_items(&form);
    let preview = truthy(form.get("preview"));

    let filters = SearchFilters {
        fiks_ferdig: truthy(form.get("fiks_ferdig")),
        price_from: form.get("price_from").and_then(|v| v.parse().ok()),
        price_to: form.get("price_to").and_then(|v| v.parse().ok()),
        published_today: truthy(form.get("published_today")),
    };

    let snapshot = capture_snapshot(
        &category_name,
        &subcategory_name,
        &subcategory_url,
        &filters,
        max_items,
    );

    // Scrape failures surface as an empty result set, same as a subcategory
    // with genuinely nothing in it.
    if snapshot.is_empty() {
        return json_response(&json!({
            "items": [],
            "message": "nothing found, try another subcategory",
        }));
    }

    if preview {
        return json_response(&json!({ "items": &snapshot.listings }));
    }

    let buffer = export_snapshot_xlsx(&snapshot)?;
    xlsx_response(buffer, "finn_listings.xlsx")
}

/// `POST /api/recheck` — re-run the capture recorded in an uploaded
/// workbook's `meta` sheet and diff the result against its `data` sheet.
fn recheck(req: &mut Request) -> ResultResp {
    let boundary = multipart_boundary(req).ok_or_else(|| {
        ServerError::BadRequest("expected a multipart/form-data body".to_string())
    })?;

    let mut file_bytes: Option<Vec<u8>> = None;
    let mut max_items: usize = 50;

    let mut form = Multipart::with_body(req.body_mut().reader(), boundary);
    while let Some(mut field) = form
        .read_entry()
        .map_err(|e| ServerError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        match &*field.headers.name {
            "file" => {
                let mut buf = Vec::new();
                field
                    .data
                    .read_to_end(&mut buf)
                    .map_err(|e| ServerError::BadRequest(format!("Failed to read upload: {e}")))?;
                file_bytes = Some(buf);
            }
            "max_items" => {
                let mut text = String::new();
                field
                    .data
                    .read_to_string(&mut text)
                    .map_err(|e| ServerError::BadRequest(format!("Failed to read upload: {e}")))?;
                if let Ok(n) = text.trim().parse() {
                    max_items = n;
                }
            }
            _ => {}
        }
    }

    let bytes =
        file_bytes.ok_or_else(|| ServerError::BadRequest("file field is required".to_string()))?;
    let old = read_snapshot_xlsx(&bytes)?;

    let new = capture_snapshot(
        &old.meta.category_name,
        &old.meta.subcategory_name,
        &old.meta.subcategory_url,
        &SearchFilters::default(),
        max_items,
    );

    let changes = detect_changes(&old, &new);
    if changes.is_empty() {
        return json_response(&json!({ "message": "changes not found" }));
    }

    let buffer = export_changes_xlsx(&changes)?;
    xlsx_response(buffer, "finn_changes.xlsx")
}

/// Run one capture. Scraper errors are reported once and collapse to an
/// empty snapshot; the caller decides how to present that.
fn capture_snapshot(
    category_name: &str,
    subcategory_name: &str,
    subcategory_url: &str,
    filters: &SearchFilters,
    max_items: usize,
) -> Snapshot {
    let listings = TorgetScraper::new()
        .and_then(|scraper| {
            scraper.scrape_listings(
                category_name,
                subcategory_name,
                subcategory_url,
                filters,
                max_items,
            )
        })
        .unwrap_or_else(|e| {
            eprintln!("⚠️ Capture failed: {e}");
            Vec::new()
        });

    let meta = SnapshotMeta {
        category_name: category_name.to_string(),
        subcategory_name: subcategory_name.to_string(),
        subcategory_url: subcategory_url.to_string(),
        max_items,
        captured_at: chrono::Local::now().naive_local(),
    };

    Snapshot::new(meta, listings)
}

fn parse_form_body(req: &mut Request) -> Result<HashMap<String, String>, ServerError> {
    let mut buf = Vec::new();
    req.body_mut()
        .reader()
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("Failed to read request body: {e}")))?;

    Ok(url::form_urlencoded::parse(&buf).into_owned().collect())
}

fn multipart_boundary(req: &Request) -> Option<String> {
    let content_type = req.headers().get("content-type")?.to_str().ok()?;
    let (kind, rest) = content_type.split_once(';')?;
    if !kind.trim().eq_ignore_ascii_case("multipart/form-data") {
        return None;
    }
    rest.split(';').find_map(|part| {
        let (key, value) = part.trim().split_once('=')?;
        (key == "boundary").then(|| value.trim_matches('"').to_string())
    })
}

fn parse_max_items(form: &HashMap<String, String>) -> usize {
    form.get("max_items")
        .and_then(|v| v.parse().ok())
        .unwrap_or(50)
}

fn truthy(value: Option<&String>) -> bool {
    value.is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("on"))
}
