//! The persistence seam used by the services.
//!
//! [`EntityStore`] is implemented for Postgres by [`crate::Database`] and in
//! process by [`MemoryStore`]. Lookups of a missing or soft-deleted row fail
//! with [`StorageError::NotFound`](crate::error::StorageError::NotFound),
//! except where a method says it includes deleted rows.
//!
//! Listings order by the requested column first and break ties by creation
//! order in the same direction, then by id.

pub mod memory;
mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::dto::common::ListQuery;
use crate::dto::matches::MatchSort;
use crate::dto::player::{CreatePlayerRequest, PlayerSort, UpdatePlayerRequest};
use crate::dto::team::{CreateTeamRequest, TeamSort, UpdateTeamRequest};
use crate::error::Result;
use crate::models::{
    Goal, Match, MatchDetails, MatchSchedule, MatchStatus, MatchWithTeams, NewGoal, Player, Team,
};

pub use memory::MemoryStore;

#[async_trait]
pub trait EntityStore: Send + Sync {
    // Teams

    async fn find_team_by_id(&self, id: Uuid) -> Result<Team>;

    async fn list_teams(&self, query: &ListQuery<TeamSort>) -> Result<Vec<Team>>;

    async fn count_teams(&self) -> Result<i64>;

    async fn create_team(&self, req: &CreateTeamRequest) -> Result<Team>;

    async fn update_team(&self, id: Uuid, req: &UpdateTeamRequest) -> Result<Team>;

    async fn delete_team(&self, id: Uuid) -> Result<()>;

    // Players

    async fn find_player_by_id(&self, id: Uuid) -> Result<Player>;

    /// Active player of `team_id` wearing `jersey_number`, if any.
    async fn find_player_by_jersey(&self, team_id: Uuid, jersey_number: i32)
    -> Result<Option<Player>>;

    async fn list_players_by_team(&self, team_id: Uuid, query: &ListQuery<PlayerSort>)
    -> Result<Vec<Player>>;

    async fn count_players_by_team(&self, team_id: Uuid) -> Result<i64>;

    async fn create_player(&self, team_id: Uuid, req: &CreatePlayerRequest) -> Result<Player>;

    async fn update_player(&self, id: Uuid, req: &UpdatePlayerRequest) -> Result<Player>;

    async fn delete_player(&self, id: Uuid) -> Result<()>;

    // Matches

    async fn find_match_by_id(&self, id: Uuid) -> Result<Match>;

    /// Match with both teams and its goals ordered by minute. Teams and
    /// scorers are resolved even when soft-deleted.
    async fn find_match_by_id_with_details(&self, id: Uuid) -> Result<MatchDetails>;

    /// Matches with both teams, in the order `query` asks for.
    async fn list_matches(&self, query: &ListQuery<MatchSort>) -> Result<Vec<MatchWithTeams>>;

    async fn count_matches(&self) -> Result<i64>;

    async fn create_match(&self, schedule: &MatchSchedule) -> Result<Match>;

    /// Rewrites the schedule of a match that is still scheduled. Fails with
    /// `StatusConflict` when the match has been completed.
    async fn update_match_schedule(&self, id: Uuid, schedule: &MatchSchedule) -> Result<Match>;

    async fn delete_match(&self, id: Uuid) -> Result<()>;

    /// Atomically replaces the goals of a match and marks it completed.
    ///
    /// The match must still be in `expected` status when the write happens,
    /// otherwise nothing is written and `StatusConflict` carries the status
    /// found. Existing goals are deleted, `goals` inserted in order, and the
    /// scores set to the given tally.
    async fn commit_result(
        &self,
        match_id: Uuid,
        expected: MatchStatus,
        goals: &[NewGoal],
        home_score: i32,
        away_score: i32,
    ) -> Result<Match>;

    // Goals

    /// Goals of a match ordered by minute, then by submission order.
    async fn find_goals_by_match_id(&self, match_id: Uuid) -> Result<Vec<Goal>>;

    // Reports

    async fn count_completed_matches(&self) -> Result<i64>;

    /// Completed matches, latest scheduled first.
    async fn find_completed_matches(&self, offset: u64, limit: u32)
    -> Result<Vec<MatchWithTeams>>;

    /// Number of completed matches `team_id` won, as home or away side.
    async fn count_wins_for_team(&self, team_id: Uuid) -> Result<i64>;
}
