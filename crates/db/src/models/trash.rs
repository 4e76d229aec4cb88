//! Trash entry models and DTOs.

use cabinet_core::types::{DbId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `trash_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrashEntry {
    pub id: DbId,
    pub item_type: String,
    pub original_id: String,
    /// Verbatim snapshot of the deleted record.
    pub item_data: serde_json::Value,
    pub deleted_by: UserId,
    pub deleted_at: Timestamp,
    pub origin: String,
    pub original_owner: Option<UserId>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: Timestamp,
}

/// Optional filters for trash listings. All present filters are ANDed.
///
/// `item_type` is expected to be a validated code; see
/// [`cabinet_core::trash::TrashItemType`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrashFilter {
    pub item_type: Option<String>,
    pub deleted_by: Option<UserId>,
    pub original_owner: Option<UserId>,
    /// Inclusive lower bound on `deleted_at`.
    pub deleted_after: Option<Timestamp>,
    /// Exclusive upper bound on `deleted_at`.
    pub deleted_before: Option<Timestamp>,
}

/// Per-item-type count of entries a purge would remove.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PurgeCount {
    pub item_type: String,
    pub count: i64,
}

/// Preview of what the next retention sweep would remove.
#[derive(Debug, Clone, Serialize)]
pub struct PurgePreview {
    pub cutoff: Timestamp,
    pub counts_by_type: Vec<PurgeCount>,
    pub total_count: i64,
}
