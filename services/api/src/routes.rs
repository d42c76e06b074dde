use crate::infra::{AppState, InMemoryMemberDirectory};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use duty_roster::error::AppError;
use duty_roster::workflows::membership::MembershipRegisterImporter;
use duty_roster::workflows::roster::{
    roster_router, AssignmentLedger, MemberDirectory, RosterService,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

pub(crate) fn with_roster_routes<D, L>(service: Arc<RosterService<D, L>>) -> axum::Router
where
    D: MemberDirectory + 'static,
    L: AssignmentLedger + 'static,
{
    roster_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/members/import",
            axum::routing::post(import_members_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImportMembersRequest {
    /// Membership register export, CSV with a header row.
    pub(crate) csv: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ImportMembersResponse {
    pub(crate) members: usize,
    pub(crate) preferences: usize,
}

pub(crate) async fn import_members_endpoint(
    Extension(directory): Extension<Arc<InMemoryMemberDirectory>>,
    Json(payload): Json<ImportMembersRequest>,
) -> Result<Json<ImportMembersResponse>, AppError> {
    let reader = Cursor::new(payload.csv.into_bytes());
    let snapshot = MembershipRegisterImporter::from_reader(reader)?;

    let response = ImportMembersResponse {
        members: snapshot.members.len(),
        preferences: snapshot.preferences.len(),
    };
    directory.replace(snapshot);

    Ok(Json(response))
}
