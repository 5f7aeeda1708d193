// src/tests/spreadsheet_tests.rs

use crate::domain::{ChangeKind, ChangeRecord, Listing, ListingStatus, Snapshot, SnapshotMeta};
use crate::errors::ServerError;
use crate::spreadsheets::{export_changes_xlsx, export_snapshot_xlsx, read_snapshot_xlsx};
use calamine::{Reader, Xlsx};
use chrono::NaiveDate;
use std::io::Cursor;

fn sample_snapshot() -> Snapshot {
    let meta = SnapshotMeta {
        category_name: "Torget".to_string(),
        subcategory_name: "Møbler og interiør".to_string(),
        subcategory_url: "https://www.finn.no/recommerce/forsale/search?category=0.78"
            .to_string(),
        max_items: 25,
        captured_at: NaiveDate::from_ymd_opt(2026, 1, 5)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap(),
    };
    let listings = vec![
        Listing {
            category: "Torget".to_string(),
            subcategory: "Møbler og interiør".to_string(),
            url: "https://www.finn.no/recommerce/forsale/item/123456".to_string(),
            title: "Blue sofa".to_string(),
            price: "1 500 kr".to_string(),
            status: ListingStatus::Active,
            image: "https://images.finncdn.no/sofa.jpg".to_string(),
        },
        Listing {
            category: "Torget".to_string(),
            subcategory: "Møbler og interiør".to_string(),
            url: "https://www.finn.no/recommerce/forsale/item/654321".to_string(),
            title: "Old lamp".to_string(),
            price: String::new(),
            status: ListingStatus::Sold,
            image: String::new(),
        },
    ];
    Snapshot::new(meta, listings)
}

#[test]
fn snapshot_round_trips_through_xlsx() {
    let snapshot = sample_snapshot();
    let buffer = export_snapshot_xlsx(&snapshot).unwrap();

    let restored = read_snapshot_xlsx(&buffer).unwrap();

    assert_eq!(restored.meta.category_name, snapshot.meta.category_name);
    assert_eq!(restored.meta.subcategory_name, snapshot.meta.subcategory_name);
    assert_eq!(restored.meta.subcategory_url, snapshot.meta.subcategory_url);
    assert_eq!(restored.meta.max_items, 25);
    assert_eq!(restored.meta.captured_at, snapshot.meta.captured_at);

    assert_eq!(restored.listings.len(), 2);
    assert_eq!(restored.listings[0].url, snapshot.listings[0].url);
    assert_eq!(restored.listings[0].title, "Blue sofa");
    assert_eq!(restored.listings[0].price, "1 500 kr");
    assert_eq!(restored.listings[0].status, ListingStatus::Active);
    assert_eq!(restored.listings[1].status, ListingStatus::Sold);
    assert!(restored.listings[1].price.is_empty());
}

#[test]
fn changes_export_writes_one_row_per_change() {
    let changes = vec![
        ChangeRecord {
            url: "https://www.finn.no/recommerce/forsale/item/123456".to_string(),
            title: "Blue sofa".to_string(),
            kind: ChangeKind::StatusChanged,
            old_value: "Aktiv".to_string(),
            new_value: "Solgt".to_string(),
        },
        ChangeRecord {
            url: "https://www.finn.no/recommerce/forsale/item/654321".to_string(),
            title: "Old lamp".to_string(),
            kind: ChangeKind::Removed,
            old_value: "Aktiv (200 kr)".to_string(),
            new_value: String::new(),
        },
    ];

    let buffer = export_changes_xlsx(&changes).unwrap();

    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(buffer.as_slice())).unwrap();
    let range = workbook.worksheet_range("changes").unwrap();
    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], vec!["url", "title", "change", "old_value", "new_value"]);
    assert_eq!(rows[1][2], "status_changed");
    assert_eq!(rows[1][3], "Aktiv");
    assert_eq!(rows[1][4], "Solgt");
    assert_eq!(rows[2][2], "removed");
}

#[test]
fn garbage_bytes_are_rejected() {
    let err = read_snapshot_xlsx(b"definitely not a workbook").unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));
}

#[test]
fn workbook_without_a_meta_sheet_is_rejected() {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    workbook.add_worksheet().set_name("data").unwrap();
    let buffer = workbook.save_to_buffer().unwrap();

    let err = read_snapshot_xlsx(&buffer).unwrap_err();
    match err {
        ServerError::BadRequest(msg) => assert!(msg.contains("meta")),
        other => panic!("expected BadRequest, got {other:?}"),
    }
}

#[test]
fn meta_without_subcategory_url_is_rejected() {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    workbook.add_worksheet().set_name("data").unwrap();
    let meta = workbook.add_worksheet();
    meta.set_name("meta").unwrap();
    meta.write_string(0, 0, "category_name").unwrap();
    meta.write_string(1, 0, "Torget").unwrap();
    let buffer = workbook.save_to_buffer().unwrap();

    let err = read_snapshot_xlsx(&buffer).unwrap_err();
    match err {
        ServerError::BadRequest(msg) => assert!(msg.contains("subcategory_url")),
        other => panic!("expected BadRequest, got {other:?}"),
    }
}
