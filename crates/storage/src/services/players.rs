use uuid::Uuid;

use super::error::{DomainError, DomainResult, OrNotFound};
use crate::dto::common::{PaginatedResponse, PaginationParams};
use crate::dto::player::{CreatePlayerRequest, PlayerResponse, UpdatePlayerRequest};
use crate::models::Player;
use crate::store::EntityStore;

/// Players of an active team, newest first unless another order is asked for.
pub async fn list_players(
    store: &dyn EntityStore,
    team_id: Uuid,
    params: &PaginationParams,
) -> DomainResult<PaginatedResponse<PlayerResponse>> {
    store
        .find_team_by_id(team_id)
        .await
        .or_not_found(DomainError::TeamNotFound(team_id))?;

    let total = store.count_players_by_team(team_id).await?;
    let players = store
        .list_players_by_team(team_id, &params.list_query())
        .await?;

    Ok(PaginatedResponse::new(players, params, total).map(PlayerResponse::from))
}

pub async fn get_player(store: &dyn EntityStore, player_id: Uuid) -> DomainResult<Player> {
    store
        .find_player_by_id(player_id)
        .await
        .or_not_found(DomainError::PlayerNotFound(player_id))
}

pub async fn create_player(
    store: &dyn EntityStore,
    team_id: Uuid,
    req: &CreatePlayerRequest,
) -> DomainResult<Player> {
    store
        .find_team_by_id(team_id)
        .await
        .or_not_found(DomainError::TeamNotFound(team_id))?;

    ensure_jersey_free(store, team_id, req.jersey_number, None).await?;

    let player = store.create_player(team_id, req).await?;
    tracing::info!(
        player_id = %player.player_id,
        %team_id,
        jersey_number = player.jersey_number,
        "Player created"
    );
    Ok(player)
}

pub async fn update_player(
    store: &dyn EntityStore,
    player_id: Uuid,
    req: &UpdatePlayerRequest,
) -> DomainResult<Player> {
    let current = get_player(store, player_id).await?;

    if let Some(jersey_number) = req.jersey_number.filter(|n| *n != current.jersey_number) {
        ensure_jersey_free(store, current.team_id, jersey_number, Some(player_id)).await?;
    }

    store
        .update_player(player_id, req)
        .await
        .or_not_found(DomainError::PlayerNotFound(player_id))
}

/// Soft delete; the jersey number becomes available straight away.
pub async fn delete_player(store: &dyn EntityStore, player_id: Uuid) -> DomainResult<()> {
    store
        .delete_player(player_id)
        .await
        .or_not_found(DomainError::PlayerNotFound(player_id))?;
    tracing::info!(%player_id, "Player deleted");
    Ok(())
}

async fn ensure_jersey_free(
    store: &dyn EntityStore,
    team_id: Uuid,
    jersey_number: i32,
    owner: Option<Uuid>,
) -> DomainResult<()> {
    match store.find_player_by_jersey(team_id, jersey_number).await? {
        Some(holder) if Some(holder.player_id) != owner => {
            Err(DomainError::JerseyNumberTaken(jersey_number))
        }
        _ => Ok(()),
    }
}
