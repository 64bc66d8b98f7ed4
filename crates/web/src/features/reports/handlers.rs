use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    dto::{
        common::{PaginatedResponse, PaginationParams},
        report::{MatchReportListItem, MatchReportResponse},
    },
    services::report_builder,
};
use uuid::Uuid;

use crate::{error::WebError, state::AppState};

#[utoipa::path(
    get,
    path = "/api/reports/matches",
    params(PaginationParams),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Completed matches, latest scheduled first; sort_by and sort_order are ignored", body = PaginatedResponse<MatchReportListItem>),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "reports"
)]
pub async fn list_match_reports(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Response, WebError> {
    params.validate().map_err(WebError::BadRequest)?;

    let page = report_builder::build_report_list(state.store(), &params).await?;

    Ok(Json(page).into_response())
}

#[utoipa::path(
    get,
    path = "/api/reports/matches/{match_id}",
    params(
        ("match_id" = Uuid, Path, description = "Match id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Report of a completed match", body = MatchReportResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Match not found"),
        (status = 409, description = "Match not completed yet")
    ),
    tag = "reports"
)]
pub async fn get_match_report(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let report = report_builder::build_match_report(state.store(), match_id).await?;

    Ok(Json(report).into_response())
}
