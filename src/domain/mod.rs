pub mod changes;
pub mod listing;
pub mod logic;
pub mod snapshot;
pub mod status;

pub use changes::{ChangeKind, ChangeRecord};
pub use listing::Listing;
pub use logic::detect_changes;
pub use snapshot::{Snapshot, SnapshotMeta};
pub use status::ListingStatus;
