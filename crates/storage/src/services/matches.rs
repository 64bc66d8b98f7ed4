use uuid::Uuid;

use super::error::{DomainError, DomainResult, OrNotFound};
use crate::dto::common::{PaginatedResponse, PaginationParams};
use crate::dto::matches::MatchResponse;
use crate::models::MatchDetails;
use crate::store::EntityStore;

/// Matches with both teams, newest-created first unless another order is
/// asked for.
pub async fn list_matches(
    store: &dyn EntityStore,
    params: &PaginationParams,
) -> DomainResult<PaginatedResponse<MatchResponse>> {
    let total = store.count_matches().await?;
    let rows = store.list_matches(&params.list_query()).await?;

    Ok(PaginatedResponse::new(rows, params, total).map(MatchResponse::from))
}

pub async fn get_match(store: &dyn EntityStore, match_id: Uuid) -> DomainResult<MatchDetails> {
    store
        .find_match_by_id_with_details(match_id)
        .await
        .or_not_found(DomainError::MatchNotFound)
}

pub async fn delete_match(store: &dyn EntityStore, match_id: Uuid) -> DomainResult<()> {
    store
        .delete_match(match_id)
        .await
        .or_not_found(DomainError::MatchNotFound)?;
    tracing::info!(%match_id, "Match deleted");
    Ok(())
}
