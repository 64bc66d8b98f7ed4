use async_trait::async_trait;
use uuid::Uuid;

use super::EntityStore;
use crate::Database;
use crate::dto::common::ListQuery;
use crate::dto::matches::MatchSort;
use crate::dto::player::{CreatePlayerRequest, PlayerSort, UpdatePlayerRequest};
use crate::dto::team::{CreateTeamRequest, TeamSort, UpdateTeamRequest};
use crate::error::Result;
use crate::models::{
    Goal, Match, MatchDetails, MatchSchedule, MatchStatus, MatchWithTeams, NewGoal, Player, Team,
};
use crate::repository::{
    goal::GoalRepository, matches::MatchRepository, player::PlayerRepository, team::TeamRepository,
};

#[async_trait]
impl EntityStore for Database {
    async fn find_team_by_id(&self, id: Uuid) -> Result<Team> {
        TeamRepository::new(self.pool()).find_by_id(id).await
    }

    async fn list_teams(&self, query: &ListQuery<TeamSort>) -> Result<Vec<Team>> {
        TeamRepository::new(self.pool()).list(query).await
    }

    async fn count_teams(&self) -> Result<i64> {
        TeamRepository::new(self.pool()).count().await
    }

    async fn create_team(&self, req: &CreateTeamRequest) -> Result<Team> {
        TeamRepository::new(self.pool()).create(req).await
    }

    async fn update_team(&self, id: Uuid, req: &UpdateTeamRequest) -> Result<Team> {
        TeamRepository::new(self.pool()).update(id, req).await
    }

    async fn delete_team(&self, id: Uuid) -> Result<()> {
        TeamRepository::new(self.pool()).delete(id).await
    }

    async fn find_player_by_id(&self, id: Uuid) -> Result<Player> {
        PlayerRepository::new(self.pool()).find_by_id(id).await
    }

    async fn find_player_by_jersey(
        &self,
        team_id: Uuid,
        jersey_number: i32,
    ) -> Result<Option<Player>> {
        PlayerRepository::new(self.pool())
            .find_by_jersey(team_id, jersey_number)
            .await
    }

    async fn list_players_by_team(
        &self,
        team_id: Uuid,
        query: &ListQuery<PlayerSort>,
    ) -> Result<Vec<Player>> {
        PlayerRepository::new(self.pool())
            .list_by_team(team_id, query)
            .await
    }

    async fn count_players_by_team(&self, team_id: Uuid) -> Result<i64> {
        PlayerRepository::new(self.pool()).count_by_team(team_id).await
    }

    async fn create_player(&self, team_id: Uuid, req: &CreatePlayerRequest) -> Result<Player> {
        PlayerRepository::new(self.pool()).create(team_id, req).await
    }

    async fn update_player(&self, id: Uuid, req: &UpdatePlayerRequest) -> Result<Player> {
        PlayerRepository::new(self.pool()).update(id, req).await
    }

    async fn delete_player(&self, id: Uuid) -> Result<()> {
        PlayerRepository::new(self.pool()).delete(id).await
    }

    async fn find_match_by_id(&self, id: Uuid) -> Result<Match> {
        MatchRepository::new(self.pool()).find_by_id(id).await
    }

    async fn find_match_by_id_with_details(&self, id: Uuid) -> Result<MatchDetails> {
        MatchRepository::new(self.pool())
            .find_by_id_with_details(id)
            .await
    }

    async fn list_matches(&self, query: &ListQuery<MatchSort>) -> Result<Vec<MatchWithTeams>> {
        MatchRepository::new(self.pool()).list(query).await
    }

    async fn count_matches(&self) -> Result<i64> {
        MatchRepository::new(self.pool()).count().await
    }

    async fn create_match(&self, schedule: &MatchSchedule) -> Result<Match> {
        MatchRepository::new(self.pool()).create(schedule).await
    }

    async fn update_match_schedule(&self, id: Uuid, schedule: &MatchSchedule) -> Result<Match> {
        MatchRepository::new(self.pool())
            .update_schedule(id, schedule)
            .await
    }

    async fn delete_match(&self, id: Uuid) -> Result<()> {
        MatchRepository::new(self.pool()).delete(id).await
    }

    async fn commit_result(
        &self,
        match_id: Uuid,
        expected: MatchStatus,
        goals: &[NewGoal],
        home_score: i32,
        away_score: i32,
    ) -> Result<Match> {
        MatchRepository::new(self.pool())
            .commit_result(match_id, expected, goals, home_score, away_score)
            .await
    }

    async fn find_goals_by_match_id(&self, match_id: Uuid) -> Result<Vec<Goal>> {
        GoalRepository::new(self.pool())
            .find_by_match_id(match_id)
            .await
    }

    async fn count_completed_matches(&self) -> Result<i64> {
        MatchRepository::new(self.pool()).count_completed().await
    }

    async fn find_completed_matches(
        &self,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<MatchWithTeams>> {
        MatchRepository::new(self.pool())
            .find_completed(offset, limit)
            .await
    }

    async fn count_wins_for_team(&self, team_id: Uuid) -> Result<i64> {
        MatchRepository::new(self.pool()).count_wins(team_id).await
    }
}
