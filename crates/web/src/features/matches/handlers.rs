use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    dto::{
        common::{PaginatedResponse, PaginationParams},
        matches::{CreateMatchRequest, MatchResponse, MatchResultRequest, UpdateMatchRequest},
    },
    services::{matches, result_processor},
};
use uuid::Uuid;
use validator::Validate;

use crate::{error::WebError, state::AppState};

#[utoipa::path(
    get,
    path = "/api/matches",
    params(PaginationParams),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Matches with both teams, newest first unless sort_by is one of created_at, match_date, status", body = PaginatedResponse<MatchResponse>),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "matches"
)]
pub async fn list_matches(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Response, WebError> {
    params.validate().map_err(WebError::BadRequest)?;

    let page = matches::list_matches(state.store(), &params).await?;

    Ok(Json(page).into_response())
}

#[utoipa::path(
    get,
    path = "/api/matches/{match_id}",
    params(
        ("match_id" = Uuid, Path, description = "Match id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Match with teams and goals ordered by minute", body = MatchResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Match not found")
    ),
    tag = "matches"
)]
pub async fn get_match(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let details = matches::get_match(state.store(), match_id).await?;

    Ok(Json(MatchResponse::from(details)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/matches",
    request_body = CreateMatchRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Match scheduled", body = MatchResponse),
        (status = 400, description = "Validation error or identical teams"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Team not found")
    ),
    tag = "matches"
)]
pub async fn create_match(
    State(state): State<AppState>,
    Json(req): Json<CreateMatchRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let fixture = result_processor::create_match(state.store(), &req.to_schedule()).await?;

    Ok((StatusCode::CREATED, Json(MatchResponse::from(fixture))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/matches/{match_id}",
    params(
        ("match_id" = Uuid, Path, description = "Match id")
    ),
    request_body = UpdateMatchRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Match rescheduled", body = MatchResponse),
        (status = 400, description = "Validation error or identical teams"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Match or team not found"),
        (status = 409, description = "Match already completed")
    ),
    tag = "matches"
)]
pub async fn update_match(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
    Json(req): Json<UpdateMatchRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let fixture =
        result_processor::update_match(state.store(), match_id, &req.to_schedule()).await?;

    Ok(Json(MatchResponse::from(fixture)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/matches/{match_id}",
    params(
        ("match_id" = Uuid, Path, description = "Match id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Match deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Match not found")
    ),
    tag = "matches"
)]
pub async fn delete_match(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
) -> Result<Response, WebError> {
    matches::delete_match(state.store(), match_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    post,
    path = "/api/matches/{match_id}/result",
    params(
        ("match_id" = Uuid, Path, description = "Match id")
    ),
    request_body = MatchResultRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Result recorded and match completed", body = MatchResponse),
        (status = 400, description = "A goal was rejected"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Match or player not found"),
        (status = 409, description = "Result already submitted")
    ),
    tag = "matches"
)]
pub async fn submit_result(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
    Json(req): Json<MatchResultRequest>,
) -> Result<Response, WebError> {
    let goals = req.into_submissions();

    let details = result_processor::submit_result(state.store(), match_id, &goals).await?;

    Ok(Json(MatchResponse::from(details)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/matches/{match_id}/result",
    params(
        ("match_id" = Uuid, Path, description = "Match id")
    ),
    request_body = MatchResultRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Result replaced", body = MatchResponse),
        (status = 400, description = "A goal was rejected"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Match or player not found"),
        (status = 409, description = "Match has no result yet")
    ),
    tag = "matches"
)]
pub async fn update_result(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
    Json(req): Json<MatchResultRequest>,
) -> Result<Response, WebError> {
    let goals = req.into_submissions();

    let details = result_processor::update_result(state.store(), match_id, &goals).await?;

    Ok(Json(MatchResponse::from(details)).into_response())
}
