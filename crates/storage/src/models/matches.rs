use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Goal, Team};

/// Lifecycle state of a match.
///
/// A match only ever moves forward: `Scheduled` becomes `Completed` when a
/// result is submitted, and a completed match stays completed when its
/// result is replaced.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
    ToSchema,
)]
#[sqlx(type_name = "match_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Scheduled,
    Completed,
}

impl MatchStatus {
    pub fn is_completed(self) -> bool {
        matches!(self, MatchStatus::Completed)
    }
}

/// A fixture between two distinct teams.
///
/// `home_score` and `away_score` are a denormalised tally of the match's
/// goal rows and are only ever written together with those rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Match {
    pub match_id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub match_date: String,
    pub match_time: String,
    pub home_score: i32,
    pub away_score: i32,
    pub status: MatchStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(skip)]
    pub deleted_at: Option<NaiveDateTime>,
}

impl Match {
    pub fn involves(&self, team_id: Uuid) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }
}

/// Schedule fields shared by match creation and schedule edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSchedule {
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub match_date: String,
    pub match_time: String,
}

/// A goal joined with the names of its scorer and scoring team.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalDetail {
    pub goal: Goal,
    pub player_name: String,
    pub team_name: String,
}

/// A match with both teams and its goals ordered by minute.
///
/// Teams and scorers are resolved even when they have since been
/// soft-deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchDetails {
    pub fixture: Match,
    pub home_team: Team,
    pub away_team: Team,
    pub goals: Vec<GoalDetail>,
}

/// A match with both teams resolved, used by listings.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchWithTeams {
    pub fixture: Match,
    pub home_team: Team,
    pub away_team: Team,
}

/// Result of a completed match from the home side's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum MatchOutcome {
    #[serde(rename = "Home Win")]
    HomeWin,
    #[serde(rename = "Away Win")]
    AwayWin,
    Draw,
}
