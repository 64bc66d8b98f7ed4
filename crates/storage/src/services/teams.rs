use uuid::Uuid;

use super::error::{DomainError, DomainResult, OrNotFound};
use crate::dto::common::{PaginatedResponse, PaginationParams};
use crate::dto::team::{CreateTeamRequest, TeamResponse, UpdateTeamRequest};
use crate::models::Team;
use crate::store::EntityStore;

pub async fn list_teams(
    store: &dyn EntityStore,
    params: &PaginationParams,
) -> DomainResult<PaginatedResponse<TeamResponse>> {
    let total = store.count_teams().await?;
    let teams = store.list_teams(&params.list_query()).await?;

    Ok(PaginatedResponse::new(teams, params, total).map(TeamResponse::from))
}

pub async fn get_team(store: &dyn EntityStore, team_id: Uuid) -> DomainResult<Team> {
    store
        .find_team_by_id(team_id)
        .await
        .or_not_found(DomainError::TeamNotFound(team_id))
}

pub async fn create_team(store: &dyn EntityStore, req: &CreateTeamRequest) -> DomainResult<Team> {
    let team = store.create_team(req).await?;
    tracing::info!(team_id = %team.team_id, name = %team.name, "Team created");
    Ok(team)
}

pub async fn update_team(
    store: &dyn EntityStore,
    team_id: Uuid,
    req: &UpdateTeamRequest,
) -> DomainResult<Team> {
    store
        .update_team(team_id, req)
        .await
        .or_not_found(DomainError::TeamNotFound(team_id))
}

/// Soft delete; matches and goals keep resolving the team's name.
pub async fn delete_team(store: &dyn EntityStore, team_id: Uuid) -> DomainResult<()> {
    store
        .delete_team(team_id)
        .await
        .or_not_found(DomainError::TeamNotFound(team_id))?;
    tracing::info!(%team_id, "Team deleted");
    Ok(())
}
