pub mod export_xlsx;
pub mod import_xlsx;

pub use export_xlsx::{export_changes_xlsx, export_snapshot_xlsx};
pub use import_xlsx::read_snapshot_xlsx;

pub const DATA_SHEET: &str = "data";
pub const META_SHEET: &str = "meta";
pub const CHANGES_SHEET: &str = "changes";
