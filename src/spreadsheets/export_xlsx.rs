use crate::domain::{ChangeRecord, Snapshot};
use crate::errors::ServerError;
use crate::spreadsheets::{CHANGES_SHEET, DATA_SHEET, META_SHEET};
use rust_xlsxwriter::{Workbook, Worksheet};

pub const DATA_HEADERS: [&str; 7] = [
    "category",
    "subcategory",
    "url",
    "title",
    "price",
    "status",
    "image",
];

pub const META_HEADERS: [&str; 5] = [
    "category_name",
    "subcategory_name",
    "subcategory_url",
    "max_items",
    "captured_at",
];

pub const CHANGES_HEADERS: [&str; 5] = ["url", "title", "change", "old_value", "new_value"];

/// Serialize a snapshot into an XLSX workbook with a `data` sheet (one row
/// per listing) and a `meta` sheet (one row of capture parameters).
pub fn export_snapshot_xlsx(snapshot: &Snapshot) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();

    let data_sheet = workbook.add_worksheet();
    data_sheet
        .set_name(DATA_SHEET)
        .map_err(|e| ServerError::XlsxError(format!("Failed to name data sheet: {e}")))?;
    write_headers(data_sheet, &DATA_HEADERS)?;

    for (i, listing) in snapshot.listings.iter().enumerate() {
        let r = (i + 1) as u32;
        let cells = [
            listing.category.as_str(),
            listing.subcategory.as_str(),
            listing.url.as_str(),
            listing.title.as_str(),
            listing.price.as_str(),
            listing.status.label(),
            listing.image.as_str(),
        ];
        for (col, value) in cells.iter().enumerate() {
            data_sheet.write_string(r, col as u16, *value).map_err(|e| {
                ServerError::XlsxError(format!("Failed to write listing row {r}: {e}"))
            })?;
        }
    }

    let meta_sheet = workbook.add_worksheet();
    meta_sheet
        .set_name(META_SHEET)
        .map_err(|e| ServerError::XlsxError(format!("Failed to name meta sheet: {e}")))?;
    write_headers(meta_sheet, &META_HEADERS)?;

    let meta = &snapshot.meta;
    let captured_at = meta.captured_at.format("%Y-%m-%d %H:%M:%S").to_string();
    let cells = [
        meta.category_name.as_str(),
        meta.subcategory_name.as_str(),
        meta.subcategory_url.as_str(),
    ];
    for (col, value) in cells.iter().enumerate() {
        meta_sheet
            .write_string(1, col as u16, *value)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write meta: {e}")))?;
    }
    meta_sheet
        .write_number(1, 3, meta.max_items as f64)
        .map_err(|e| ServerError::XlsxError(format!("Failed to write max_items: {e}")))?;
    meta_sheet
        .write_string(1, 4, &captured_at)
        .map_err(|e| ServerError::XlsxError(format!("Failed to write captured_at: {e}")))?;

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {e}")))
}

/// Serialize a change report into an XLSX workbook with a `changes` sheet.
pub fn export_changes_xlsx(changes: &[ChangeRecord]) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet
        .set_name(CHANGES_SHEET)
        .map_err(|e| ServerError::XlsxError(format!("Failed to name changes sheet: {e}")))?;
    write_headers(sheet, &CHANGES_HEADERS)?;

    for (i, change) in changes.iter().enumerate() {
        let r = (i + 1) as u32;
        let cells = [
            change.url.as_str(),
            change.title.as_str(),
            change.kind.label(),
            change.old_value.as_str(),
            change.new_value.as_str(),
        ];
        for (col, value) in cells.iter().enumerate() {
            sheet.write_string(r, col as u16, *value).map_err(|e| {
                ServerError::XlsxError(format!("Failed to write change row {r}: {e}"))
            })?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {e}")))
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str]) -> Result<(), ServerError> {
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).map_err(|e| {
            ServerError::XlsxError(format!("Failed to write header '{header}': {e}"))
        })?;
    }
    Ok(())
}
