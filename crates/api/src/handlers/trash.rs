//! Handlers for the `/trash` resource.
//!
//! Recording a deletion is open to any authenticated user; `deleted_by` is
//! always the caller. Listing and lookup are scoped by role. Purging is
//! admin-only.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cabinet_core::error::CoreError;
use cabinet_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use cabinet_core::trash::{CreateTrashEntry, RetentionPolicy, TrashItemType};
use cabinet_core::types::{DbId, Timestamp};
use cabinet_db::models::trash::{PurgePreview, TrashEntry, TrashFilter};
use cabinet_db::repositories::TrashRepo;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the trash listing endpoint.
#[derive(Debug, Deserialize)]
pub struct TrashListQuery {
    pub item_type: Option<String>,
    pub deleted_by: Option<String>,
    pub original_owner: Option<String>,
    /// Inclusive lower bound on `deleted_at` (RFC 3339).
    pub deleted_after: Option<Timestamp>,
    /// Exclusive upper bound on `deleted_at` (RFC 3339).
    pub deleted_before: Option<Timestamp>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `?days=` override of the configured retention window.
#[derive(Debug, Deserialize)]
pub struct RetentionQuery {
    pub days: Option<i64>,
}

/// One page of trash entries.
#[derive(Debug, Serialize)]
pub struct TrashPage {
    pub items: Vec<TrashEntry>,
    pub total_count: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Outcome of a manual purge.
#[derive(Debug, Serialize)]
pub struct PurgeResult {
    pub purged: u64,
    pub cutoff: Timestamp,
    pub retention_days: i64,
}

/// GET /api/v1/trash
///
/// Admins see every entry; other roles see the entries they deleted or
/// originally owned.
pub async fn list_entries(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<TrashListQuery>,
) -> AppResult<Json<DataResponse<TrashPage>>> {
    if let Some(ref item_type) = params.item_type {
        validate_item_type(item_type)?;
    }

    let filter = TrashFilter {
        item_type: params.item_type,
        deleted_by: params.deleted_by,
        original_owner: params.original_owner,
        deleted_after: params.deleted_after,
        deleted_before: params.deleted_before,
    };
    let scope = user.trash_scope();
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
    let offset = clamp_offset(params.offset);

    let items = TrashRepo::list(&state.pool, &filter, &scope, limit, offset).await?;
    let total_count = TrashRepo::count(&state.pool, &filter, &scope).await?;

    Ok(Json(DataResponse {
        data: TrashPage {
            items,
            total_count,
            limit,
            offset,
        },
    }))
}

/// POST /api/v1/trash
///
/// Record the snapshot of a record the caller is deleting. Any `deleted_by`
/// in the body is replaced by the caller's id.
pub async fn record_deletion(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(mut input): Json<CreateTrashEntry>,
) -> AppResult<(StatusCode, Json<DataResponse<TrashEntry>>)> {
    input.deleted_by = user.user_id;
    let entry = TrashRepo::record_deletion(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// GET /api/v1/trash/{id}
///
/// Entries outside the caller's scope are reported as missing.
pub async fn get_entry(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TrashEntry>>> {
    let scope = user.trash_scope();
    let entry = TrashRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|e| scope.permits(&e.deleted_by, e.original_owner.as_deref()))
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TrashEntry",
            id,
        }))?;
    Ok(Json(DataResponse { data: entry }))
}

/// DELETE /api/v1/trash/{id}
///
/// Hard-delete a single entry (discarded, or restored by its owning module).
pub async fn purge_one(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if TrashRepo::purge_one(&state.pool, id).await? {
        tracing::info!(trash_id = id, admin_id = %admin.user_id, "Trash entry purged");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "TrashEntry",
            id,
        }))
    }
}

/// GET /api/v1/trash/purge-preview
///
/// What a purge would remove right now, broken down by item type.
pub async fn purge_preview(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<RetentionQuery>,
) -> AppResult<Json<DataResponse<PurgePreview>>> {
    let policy = resolve_policy(&state, params.days)?;
    let preview = TrashRepo::purge_preview(&state.pool, policy.cutoff(Utc::now())).await?;
    Ok(Json(DataResponse { data: preview }))
}

/// POST /api/v1/trash/purge
///
/// Run the retention purge immediately instead of waiting for the sweep.
pub async fn purge_expired(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<RetentionQuery>,
) -> AppResult<Json<DataResponse<PurgeResult>>> {
    let policy = resolve_policy(&state, params.days)?;
    let cutoff = policy.cutoff(Utc::now());
    let purged = TrashRepo::purge_older_than(&state.pool, cutoff).await?;

    tracing::info!(
        purged,
        %cutoff,
        retention_days = policy.retention_days(),
        admin_id = %admin.user_id,
        "Manual trash purge"
    );

    Ok(Json(DataResponse {
        data: PurgeResult {
            purged,
            cutoff,
            retention_days: policy.retention_days(),
        },
    }))
}

// ── Private helpers ──────────────────────────────────────────────────────

fn validate_item_type(item_type: &str) -> AppResult<()> {
    item_type
        .parse::<TrashItemType>()
        .map(|_| ())
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))
}

fn resolve_policy(state: &AppState, days: Option<i64>) -> AppResult<RetentionPolicy> {
    match days {
        Some(days) => Ok(RetentionPolicy::new(days)?),
        None => Ok(state.config.retention.policy),
    }
}
