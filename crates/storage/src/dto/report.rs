use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::team::TeamSummary;
use crate::models::MatchOutcome;

/// Detailed report for a single completed match
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MatchReportResponse {
    pub match_id: Uuid,
    pub match_date: String,
    pub match_time: String,
    pub home_team: TeamSummary,
    pub away_team: TeamSummary,
    pub home_score: i32,
    pub away_score: i32,
    pub match_result: MatchOutcome,
    /// Goals ordered by minute
    pub goals: Vec<MatchReportGoal>,
    /// `null` when the match ended without goals
    pub top_scorer: Option<TopScorer>,
    pub home_team_total_wins: i64,
    pub away_team_total_wins: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MatchReportGoal {
    pub player_name: String,
    pub team_name: String,
    pub minute: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TopScorer {
    pub player_id: Uuid,
    pub player_name: String,
    pub team_name: String,
    pub goals_in_match: u32,
}

/// Summary row of the completed match report listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MatchReportListItem {
    pub match_id: Uuid,
    pub match_date: String,
    pub match_time: String,
    pub home_team: TeamSummary,
    pub away_team: TeamSummary,
    pub home_score: i32,
    pub away_score: i32,
    pub match_result: MatchOutcome,
}
