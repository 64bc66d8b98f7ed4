use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    dto::{
        common::{PaginatedResponse, PaginationParams},
        player::{CreatePlayerRequest, PlayerResponse, UpdatePlayerRequest},
    },
    services::players,
};
use uuid::Uuid;
use validator::Validate;

use crate::{error::WebError, state::AppState};

#[utoipa::path(
    get,
    path = "/api/teams/{team_id}/players",
    params(
        ("team_id" = Uuid, Path, description = "Team id"),
        PaginationParams
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Players of the team, newest first unless sort_by is one of created_at, name, jersey_number, position", body = PaginatedResponse<PlayerResponse>),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Team not found")
    ),
    tag = "players"
)]
pub async fn list_players(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
    Query(params): Query<PaginationParams>,
) -> Result<Response, WebError> {
    params.validate().map_err(WebError::BadRequest)?;

    let page = players::list_players(state.store(), team_id, &params).await?;

    Ok(Json(page).into_response())
}

#[utoipa::path(
    post,
    path = "/api/teams/{team_id}/players",
    params(
        ("team_id" = Uuid, Path, description = "Team id")
    ),
    request_body = CreatePlayerRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Player created successfully", body = PlayerResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Team not found"),
        (status = 409, description = "Jersey number already used in the team")
    ),
    tag = "players"
)]
pub async fn create_player(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
    Json(req): Json<CreatePlayerRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let player = players::create_player(state.store(), team_id, &req).await?;

    Ok((StatusCode::CREATED, Json(PlayerResponse::from(player))).into_response())
}

#[utoipa::path(
    get,
    path = "/api/players/{player_id}",
    params(
        ("player_id" = Uuid, Path, description = "Player id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Player found", body = PlayerResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Player not found")
    ),
    tag = "players"
)]
pub async fn get_player(
    State(state): State<AppState>,
    Path(player_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let player = players::get_player(state.store(), player_id).await?;

    Ok(Json(PlayerResponse::from(player)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/players/{player_id}",
    params(
        ("player_id" = Uuid, Path, description = "Player id")
    ),
    request_body = UpdatePlayerRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Player updated successfully", body = PlayerResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Player not found"),
        (status = 409, description = "Jersey number already used in the team")
    ),
    tag = "players"
)]
pub async fn update_player(
    State(state): State<AppState>,
    Path(player_id): Path<Uuid>,
    Json(req): Json<UpdatePlayerRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let player = players::update_player(state.store(), player_id, &req).await?;

    Ok(Json(PlayerResponse::from(player)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/players/{player_id}",
    params(
        ("player_id" = Uuid, Path, description = "Player id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Player deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Player not found")
    ),
    tag = "players"
)]
pub async fn delete_player(
    State(state): State<AppState>,
    Path(player_id): Path<Uuid>,
) -> Result<Response, WebError> {
    players::delete_player(state.store(), player_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
