use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::common::SortColumn;
use super::team::TeamSummary;
use crate::models::{
    GoalDetail, GoalSubmission, Match, MatchDetails, MatchSchedule, MatchStatus, MatchWithTeams,
};

/// Request payload for scheduling a match
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateMatchRequest {
    pub home_team_id: Uuid,

    pub away_team_id: Uuid,

    /// Opaque date label, conventionally `YYYY-MM-DD`
    #[validate(length(min = 1, max = 32, message = "Match date is required"))]
    pub match_date: String,

    /// Opaque kick-off label, conventionally `HH:MM`
    #[validate(length(min = 1, max = 32, message = "Match time is required"))]
    pub match_time: String,
}

/// Request payload for rescheduling a match that has not been played
pub type UpdateMatchRequest = CreateMatchRequest;

impl CreateMatchRequest {
    pub fn to_schedule(&self) -> MatchSchedule {
        MatchSchedule {
            home_team_id: self.home_team_id,
            away_team_id: self.away_team_id,
            match_date: self.match_date.clone(),
            match_time: self.match_time.clone(),
        }
    }
}

/// Request payload for submitting or replacing a match result
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MatchResultRequest {
    pub goals: Vec<GoalInput>,
}

/// A single goal of a match result
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GoalInput {
    pub player_id: Uuid,
    pub team_id: Uuid,
    /// Minute of the match, starting at 1
    pub minute: i32,
}

impl MatchResultRequest {
    pub fn into_submissions(self) -> Vec<GoalSubmission> {
        self.goals
            .into_iter()
            .map(|goal| GoalSubmission {
                player_id: goal.player_id,
                team_id: goal.team_id,
                minute: goal.minute,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GoalResponse {
    pub goal_id: Uuid,
    pub player_id: Uuid,
    pub player_name: String,
    pub team_id: Uuid,
    pub team_name: String,
    pub minute: i32,
}

/// Match payload; teams and goals are included when they were loaded
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MatchResponse {
    pub match_id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub match_date: String,
    pub match_time: String,
    pub home_score: i32,
    pub away_score: i32,
    pub status: MatchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_team: Option<TeamSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub away_team: Option<TeamSummary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub goals: Vec<GoalResponse>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Match> for MatchResponse {
    fn from(fixture: Match) -> Self {
        Self {
            match_id: fixture.match_id,
            home_team_id: fixture.home_team_id,
            away_team_id: fixture.away_team_id,
            match_date: fixture.match_date,
            match_time: fixture.match_time,
            home_score: fixture.home_score,
            away_score: fixture.away_score,
            status: fixture.status,
            home_team: None,
            away_team: None,
            goals: Vec::new(),
            created_at: fixture.created_at,
            updated_at: fixture.updated_at,
        }
    }
}

impl From<MatchWithTeams> for MatchResponse {
    fn from(row: MatchWithTeams) -> Self {
        let mut response = Self::from(row.fixture);
        response.home_team = Some(row.home_team.into());
        response.away_team = Some(row.away_team.into());
        response
    }
}

impl From<MatchDetails> for MatchResponse {
    fn from(details: MatchDetails) -> Self {
        let mut response = Self::from(details.fixture);
        response.home_team = Some(details.home_team.into());
        response.away_team = Some(details.away_team.into());
        response.goals = details.goals.into_iter().map(GoalResponse::from).collect();
        response
    }
}

impl From<GoalDetail> for GoalResponse {
    fn from(detail: GoalDetail) -> Self {
        Self {
            goal_id: detail.goal.goal_id,
            player_id: detail.goal.player_id,
            player_name: detail.player_name,
            team_id: detail.goal.team_id,
            team_name: detail.team_name,
            minute: detail.goal.minute,
        }
    }
}

/// Columns a match listing can be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchSort {
    #[default]
    CreatedAt,
    MatchDate,
    Status,
}

impl SortColumn for MatchSort {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "created_at" => Some(Self::CreatedAt),
            "match_date" => Some(Self::MatchDate),
            "status" => Some(Self::Status),
            _ => None,
        }
    }

    // qualified: the listing query joins both teams
    fn as_column(self) -> &'static str {
        match self {
            Self::CreatedAt => "m.created_at",
            Self::MatchDate => "m.match_date",
            Self::Status => "m.status",
        }
    }
}
