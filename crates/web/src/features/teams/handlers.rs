use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    dto::{
        common::{PaginatedResponse, PaginationParams},
        team::{CreateTeamRequest, TeamResponse, UpdateTeamRequest},
    },
    services::teams,
};
use uuid::Uuid;
use validator::Validate;

use crate::{error::WebError, state::AppState};

#[utoipa::path(
    get,
    path = "/api/teams",
    params(PaginationParams),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Teams, newest first unless sort_by is one of created_at, name, founded_year, city", body = PaginatedResponse<TeamResponse>),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "teams"
)]
pub async fn list_teams(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Response, WebError> {
    params.validate().map_err(WebError::BadRequest)?;

    let page = teams::list_teams(state.store(), &params).await?;

    Ok(Json(page).into_response())
}

#[utoipa::path(
    get,
    path = "/api/teams/{team_id}",
    params(
        ("team_id" = Uuid, Path, description = "Team id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Team found", body = TeamResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn get_team(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let team = teams::get_team(state.store(), team_id).await?;

    Ok(Json(TeamResponse::from(team)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/teams",
    request_body = CreateTeamRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Team created successfully", body = TeamResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "teams"
)]
pub async fn create_team(
    State(state): State<AppState>,
    Json(req): Json<CreateTeamRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let team = teams::create_team(state.store(), &req).await?;

    Ok((StatusCode::CREATED, Json(TeamResponse::from(team))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/teams/{team_id}",
    params(
        ("team_id" = Uuid, Path, description = "Team id")
    ),
    request_body = UpdateTeamRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Team updated successfully", body = TeamResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn update_team(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
    Json(req): Json<UpdateTeamRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let team = teams::update_team(state.store(), team_id, &req).await?;

    Ok(Json(TeamResponse::from(team)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/teams/{team_id}",
    params(
        ("team_id" = Uuid, Path, description = "Team id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Team deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn delete_team(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
) -> Result<Response, WebError> {
    teams::delete_team(state.store(), team_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
