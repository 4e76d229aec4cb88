//! Repository for the `trash_entries` table.
//!
//! Records deletion snapshots, lists them with role-scoped filters, and
//! purges entries past the retention window. Entries are never updated in
//! place; the only writes are INSERT and DELETE.

use cabinet_core::error::CoreError;
use cabinet_core::trash::{
    validate_new_entry, CreateTrashEntry, RetentionPolicy, TrashScope, ValidTrashEntry,
};
use cabinet_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::trash::{PurgeCount, PurgePreview, TrashEntry, TrashFilter};

/// Column list for `trash_entries` SELECT / RETURNING clauses.
const COLUMNS: &str = "\
    id, item_type, original_id, item_data, deleted_by, deleted_at, \
    origin, original_owner, metadata, created_at";

/// Shared WHERE clause for listing and counting.
///
/// Binds: `$1` item_type, `$2` deleted_by, `$3` original_owner,
/// `$4` deleted_after, `$5` deleted_before, `$6` scope user (NULL = all).
const FILTER_CLAUSE: &str = "\
    ($1::TEXT IS NULL OR item_type = $1) \
    AND ($2::TEXT IS NULL OR deleted_by = $2) \
    AND ($3::TEXT IS NULL OR original_owner = $3) \
    AND ($4::TIMESTAMPTZ IS NULL OR deleted_at >= $4) \
    AND ($5::TIMESTAMPTZ IS NULL OR deleted_at < $5) \
    AND ($6::TEXT IS NULL OR deleted_by = $6 OR original_owner = $6)";

/// Failure of [`TrashRepo::record_deletion`].
///
/// `Invalid` is the caller's fault and must not be retried; `Store` means the
/// database could not be reached or rejected the write.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error(transparent)]
    Invalid(#[from] CoreError),

    #[error("Database error: {0}")]
    Store(#[from] sqlx::Error),
}

/// Provides persistence for trash entries.
pub struct TrashRepo;

impl TrashRepo {
    // ── Recording ─────────────────────────────────────────────────────

    /// Validate and persist one deletion snapshot.
    ///
    /// Validation runs before any SQL is issued. Callers must not treat the
    /// primary record's deletion as complete until this returns `Ok`.
    pub async fn record_deletion(
        pool: &PgPool,
        input: &CreateTrashEntry,
    ) -> Result<TrashEntry, RecordError> {
        let entry = validate_new_entry(input)?;
        let created = Self::insert(pool, &entry).await?;
        tracing::info!(
            trash_id = created.id,
            item_type = %created.item_type,
            original_id = %created.original_id,
            deleted_by = %created.deleted_by,
            origin = %created.origin,
            "Recorded deletion"
        );
        Ok(created)
    }

    /// Insert an already-validated entry. `deleted_at` defaults to `NOW()`.
    pub async fn insert(
        pool: &PgPool,
        entry: &ValidTrashEntry,
    ) -> Result<TrashEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO trash_entries \
                (item_type, original_id, item_data, deleted_by, origin, original_owner, metadata) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrashEntry>(&query)
            .bind(entry.item_type.as_str())
            .bind(&entry.original_id)
            .bind(&entry.item_data)
            .bind(&entry.deleted_by)
            .bind(&entry.origin)
            .bind(&entry.original_owner)
            .bind(&entry.metadata)
            .fetch_one(pool)
            .await
    }

    // ── Lookup ────────────────────────────────────────────────────────

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TrashEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trash_entries WHERE id = $1");
        sqlx::query_as::<_, TrashEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All snapshots taken of one original record, newest first.
    pub async fn find_by_original_id(
        pool: &PgPool,
        original_id: &str,
    ) -> Result<Vec<TrashEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM trash_entries \
             WHERE original_id = $1 \
             ORDER BY deleted_at DESC, id DESC"
        );
        sqlx::query_as::<_, TrashEntry>(&query)
            .bind(original_id)
            .fetch_all(pool)
            .await
    }

    // ── Listing ───────────────────────────────────────────────────────

    /// List entries visible in `scope` that match `filter`, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &TrashFilter,
        scope: &TrashScope,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TrashEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM trash_entries \
             WHERE {FILTER_CLAUSE} \
             ORDER BY deleted_at DESC, id DESC \
             LIMIT $7 OFFSET $8"
        );
        sqlx::query_as::<_, TrashEntry>(&query)
            .bind(filter.item_type.as_deref())
            .bind(filter.deleted_by.as_deref())
            .bind(filter.original_owner.as_deref())
            .bind(filter.deleted_after)
            .bind(filter.deleted_before)
            .bind(scope_user(scope))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count entries visible in `scope` that match `filter`.
    pub async fn count(
        pool: &PgPool,
        filter: &TrashFilter,
        scope: &TrashScope,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM trash_entries WHERE {FILTER_CLAUSE}");
        let count: Option<i64> = sqlx::query_scalar(&query)
            .bind(filter.item_type.as_deref())
            .bind(filter.deleted_by.as_deref())
            .bind(filter.original_owner.as_deref())
            .bind(filter.deleted_after)
            .bind(filter.deleted_before)
            .bind(scope_user(scope))
            .fetch_one(pool)
            .await?;
        Ok(count.unwrap_or(0))
    }

    // ── Purge preview ─────────────────────────────────────────────────

    /// Count, per item type, the entries a purge at `cutoff` would remove.
    pub async fn purge_preview(
        pool: &PgPool,
        cutoff: Timestamp,
    ) -> Result<PurgePreview, sqlx::Error> {
        let counts_by_type = sqlx::query_as::<_, PurgeCount>(
            "SELECT item_type, COUNT(*) AS count \
             FROM trash_entries \
             WHERE deleted_at < $1 \
             GROUP BY item_type \
             ORDER BY item_type",
        )
        .bind(cutoff)
        .fetch_all(pool)
        .await?;

        let total_count = counts_by_type.iter().map(|c| c.count).sum();
        Ok(PurgePreview {
            cutoff,
            counts_by_type,
            total_count,
        })
    }

    // ── Purge (hard delete) ───────────────────────────────────────────

    /// Delete every entry with `deleted_at` strictly before `cutoff`.
    ///
    /// A single statement, so entries inserted while it runs (which carry
    /// `deleted_at >= cutoff`) are never removed. Returns the number of rows
    /// removed; zero is not an error.
    pub async fn purge_older_than(pool: &PgPool, cutoff: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM trash_entries WHERE deleted_at < $1")
            .bind(cutoff)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Purge everything past `policy`'s window as of `now`.
    pub async fn purge_expired(
        pool: &PgPool,
        policy: RetentionPolicy,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let cutoff = policy.cutoff(now);
        let deleted = Self::purge_older_than(pool, cutoff).await?;
        tracing::debug!(
            %cutoff,
            retention_days = policy.retention_days(),
            deleted,
            "Trash purge pass complete"
        );
        Ok(deleted)
    }

    /// Hard-delete a single entry.
    ///
    /// Returns `true` if a row was removed, `false` if no entry has that id.
    pub async fn purge_one(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM trash_entries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ── Private helpers ──────────────────────────────────────────────────────

fn scope_user(scope: &TrashScope) -> Option<&str> {
    match scope {
        TrashScope::All => None,
        TrashScope::Party(user) => Some(user.as_str()),
    }
}
