use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use super::domain::{DutyRole, MemberId};
use super::repository::{AssignmentLedger, MemberDirectory};
use super::service::{RosterService, RosterServiceError};

/// Router builder exposing the generation, scarcity, and diagnosis
/// endpoints.
pub fn roster_router<D, L>(service: Arc<RosterService<D, L>>) -> Router
where
    D: MemberDirectory + 'static,
    L: AssignmentLedger + 'static,
{
    Router::new()
        .route("/api/v1/roster/generate", post(generate_handler::<D, L>))
        .route("/api/v1/roster/scarcity", post(scarcity_handler::<D, L>))
        .route("/api/v1/roster/diagnose", post(diagnose_handler::<D, L>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub struct GenerateRosterRequest {
    pub year: i32,
    pub month: u32,
    /// Omitted roles default to all four schedulable roles.
    #[serde(default)]
    pub roles: Option<Vec<DutyRole>>,
}

#[derive(Debug, Deserialize)]
pub struct ScarcityRequest {
    pub year: i32,
    pub month: u32,
    pub role: DutyRole,
}

#[derive(Debug, Deserialize)]
pub struct DiagnoseRequest {
    pub role: DutyRole,
    pub date: NaiveDate,
    #[serde(default)]
    pub assigned_today: BTreeMap<DutyRole, MemberId>,
    #[serde(default)]
    pub last_assigned: Option<BTreeMap<DutyRole, MemberId>>,
}

pub(crate) async fn generate_handler<D, L>(
    State(service): State<Arc<RosterService<D, L>>>,
    axum::Json(request): axum::Json<GenerateRosterRequest>,
) -> Response
where
    D: MemberDirectory + 'static,
    L: AssignmentLedger + 'static,
{
    match service.generate(request.year, request.month, request.roles) {
        Ok(roster) => (StatusCode::OK, axum::Json(roster)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn scarcity_handler<D, L>(
    State(service): State<Arc<RosterService<D, L>>>,
    axum::Json(request): axum::Json<ScarcityRequest>,
) -> Response
where
    D: MemberDirectory + 'static,
    L: AssignmentLedger + 'static,
{
    match service.role_scarcity(request.year, request.month, request.role) {
        Ok(scarcity) => (StatusCode::OK, axum::Json(scarcity)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn diagnose_handler<D, L>(
    State(service): State<Arc<RosterService<D, L>>>,
    axum::Json(request): axum::Json<DiagnoseRequest>,
) -> Response
where
    D: MemberDirectory + 'static,
    L: AssignmentLedger + 'static,
{
    match service.diagnose(
        request.role,
        request.date,
        &request.assigned_today,
        request.last_assigned.as_ref(),
    ) {
        Ok(diagnostics) => (StatusCode::OK, axum::Json(diagnostics)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: RosterServiceError) -> Response {
    let payload = json!({ "error": error.to_string() });
    let status = match error {
        RosterServiceError::Roster(_) | RosterServiceError::Preference(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        RosterServiceError::Directory(_) | RosterServiceError::Ledger(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, axum::Json(payload)).into_response()
}
