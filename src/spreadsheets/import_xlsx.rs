// spreadsheets/import_xlsx.rs
//
// Reads a previously exported workbook back into a Snapshot so the recheck
// flow can re-run the capture it records. Columns are resolved by header
// name, so column order in hand-edited files does not matter.

use crate::domain::{Listing, ListingStatus, Snapshot, SnapshotMeta};
use crate::errors::ServerError;
use crate::spreadsheets::{DATA_SHEET, META_SHEET};
use calamine::{Data, Range, Reader, Xlsx};
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::io::Cursor;

pub fn read_snapshot_xlsx(bytes: &[u8]) -> Result<Snapshot, ServerError> {
    let cursor = Cursor::new(bytes);
    let mut workbook: Xlsx<_> = Xlsx::new(cursor)
        .map_err(|_| ServerError::BadRequest("Invalid XLSX file".to_string()))?;

    let data_range = workbook
        .worksheet_range(DATA_SHEET)
        .map_err(|_| ServerError::BadRequest("XLSX must have a 'data' sheet".to_string()))?;
    let meta_range = workbook
        .worksheet_range(META_SHEET)
        .map_err(|_| ServerError::BadRequest("XLSX must have a 'meta' sheet".to_string()))?;

    let meta = read_meta(&meta_range)?;
    let listings = read_listings(&data_range);

    Ok(Snapshot::new(meta, listings))
}

fn read_meta(range: &Range<Data>) -> Result<SnapshotMeta, ServerError> {
    let mut rows = range.rows();
    let columns = header_columns(rows.next().unwrap_or(&[]));
    let row = rows
        .next()
        .ok_or_else(|| ServerError::BadRequest("meta sheet has no data row".to_string()))?;

    let subcategory_url = cell_text(row, columns.get("subcategory_url"));
    if subcategory_url.is_empty() {
        return Err(ServerError::BadRequest(
            "subcategory_url not found in meta sheet".to_string(),
        ));
    }

    let max_items = cell_text(row, columns.get("max_items"))
        .parse::<usize>()
        .unwrap_or(50);

    // Older exports may lack the timestamp column.
    let captured_at = NaiveDateTime::parse_from_str(
        &cell_text(row, columns.get("captured_at")),
        "%Y-%m-%d %H:%M:%S",
    )
    .unwrap_or_else(|_| chrono::DateTime::UNIX_EPOCH.naive_utc());

    Ok(SnapshotMeta {
        category_name: cell_text(row, columns.get("category_name")),
        subcategory_name: cell_text(row, columns.get("subcategory_name")),
        subcategory_url,
        max_items,
        captured_at,
    })
}

fn read_listings(range: &Range<Data>) -> Vec<Listing> {
    let mut rows = range.rows();
    let columns = header_columns(rows.next().unwrap_or(&[]));

    let mut listings = Vec::new();
    for row in rows {
        let url = cell_text(row, columns.get("url"));
        if url.is_empty() {
            continue;
        }
        listings.push(Listing {
            category: cell_text(row, columns.get("category")),
            subcategory: cell_text(row, columns.get("subcategory")),
            url,
            title: cell_text(row, columns.get("title")),
            price: cell_text(row, columns.get("price")),
            status: ListingStatus::parse(&cell_text(row, columns.get("status"))),
            image: cell_text(row, columns.get("image")),
        });
    }
    listings
}

fn header_columns(row: &[Data]) -> HashMap<String, usize> {
    row.iter()
        .enumerate()
        .map(|(idx, cell)| (cell.to_string().trim().to_lowercase(), idx))
        .collect()
}

fn cell_text(row: &[Data], idx: Option<&usize>) -> String {
    let Some(&idx) = idx else {
        return String::new();
    };
    match row.get(idx) {
        None | Some(Data::Empty) => String::new(),
        Some(Data::Float(f)) => {
            // max_items round-trips through a number cell.
            if f.fract() == 0.0 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Some(other) => other.to_string().trim().to_string(),
    }
}
