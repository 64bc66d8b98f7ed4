use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Goal {
    pub goal_id: Uuid,
    pub match_id: Uuid,
    pub player_id: Uuid,
    pub team_id: Uuid,
    pub minute: i32,
    pub created_at: NaiveDateTime,
}

/// A validated goal ready to be written as part of a result batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewGoal {
    pub player_id: Uuid,
    pub team_id: Uuid,
    pub minute: i32,
}

/// One goal of a submitted result, with identifiers already parsed.
///
/// Nothing about it has been checked against the match yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalSubmission {
    pub player_id: Uuid,
    pub team_id: Uuid,
    pub minute: i32,
}
