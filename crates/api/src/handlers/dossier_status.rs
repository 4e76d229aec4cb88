//! Handlers for the `/dossier-statuses` resource.
//!
//! Read-only views over the case lifecycle table. Unknown codes are never an
//! error: they render with the fallback label, color, and zero progress.

use axum::extract::Path;
use axum::Json;
use cabinet_core::dossier::{
    describe, order_of, progress_for, timeline_for, DossierStatus, StatusDisplay, TimelineStep,
};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;

/// Timeline payload for one status.
#[derive(Debug, Serialize)]
pub struct DossierTimeline {
    pub code: String,
    pub current_order: u8,
    pub progress: u8,
    pub steps: Vec<TimelineStep>,
}

/// GET /api/v1/dossier-statuses
///
/// Every status in lifecycle order.
pub async fn list_statuses(
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<StatusDisplay>>>> {
    let statuses = DossierStatus::ALL
        .iter()
        .map(|s| describe(s.as_str()))
        .collect();
    Ok(Json(DataResponse { data: statuses }))
}

/// GET /api/v1/dossier-statuses/{code}
pub async fn get_status(
    RequireAuth(_user): RequireAuth,
    Path(code): Path<String>,
) -> AppResult<Json<DataResponse<StatusDisplay>>> {
    Ok(Json(DataResponse {
        data: describe(&code),
    }))
}

/// GET /api/v1/dossier-statuses/{code}/timeline
pub async fn get_timeline(
    RequireAuth(_user): RequireAuth,
    Path(code): Path<String>,
) -> AppResult<Json<DataResponse<DossierTimeline>>> {
    let timeline = DossierTimeline {
        current_order: order_of(&code),
        progress: progress_for(&code),
        steps: timeline_for(&code),
        code,
    };
    Ok(Json(DataResponse { data: timeline }))
}
