use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::common::SortColumn;
use crate::models::{Player, Position};

/// Request payload for adding a player to a team
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePlayerRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    /// Height in centimetres
    #[validate(range(min = 1, message = "Height must be positive"))]
    pub height: Option<i32>,

    /// Weight in kilograms
    #[validate(range(min = 1, message = "Weight must be positive"))]
    pub weight: Option<i32>,

    pub position: Position,

    #[validate(range(min = 1, message = "Jersey number must be positive"))]
    pub jersey_number: i32,
}

/// Request payload for updating a player; absent fields keep their value
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdatePlayerRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(range(min = 1))]
    pub height: Option<i32>,

    #[validate(range(min = 1))]
    pub weight: Option<i32>,

    pub position: Option<Position>,

    #[validate(range(min = 1))]
    pub jersey_number: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlayerResponse {
    pub player_id: Uuid,
    pub team_id: Uuid,
    pub name: String,
    pub height: Option<i32>,
    pub weight: Option<i32>,
    pub position: Position,
    pub jersey_number: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Player> for PlayerResponse {
    fn from(player: Player) -> Self {
        Self {
            player_id: player.player_id,
            team_id: player.team_id,
            name: player.name,
            height: player.height,
            weight: player.weight,
            position: player.position,
            jersey_number: player.jersey_number,
            created_at: player.created_at,
            updated_at: player.updated_at,
        }
    }
}

/// Columns a squad listing can be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlayerSort {
    #[default]
    CreatedAt,
    Name,
    JerseyNumber,
    Position,
}

impl SortColumn for PlayerSort {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "created_at" => Some(Self::CreatedAt),
            "name" => Some(Self::Name),
            "jersey_number" => Some(Self::JerseyNumber),
            "position" => Some(Self::Position),
            _ => None,
        }
    }

    fn as_column(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Name => "name",
            Self::JerseyNumber => "jersey_number",
            Self::Position => "position",
        }
    }
}
