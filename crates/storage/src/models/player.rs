use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Playing position, stored as the `player_position` Postgres enum.
///
/// Variants are declared in the enum's Postgres order, so `Ord` sorts the
/// way the database does.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
    ToSchema,
)]
#[sqlx(type_name = "player_position", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Attacker,
    Midfielder,
    Defender,
    Goalkeeper,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Player {
    pub player_id: Uuid,
    pub team_id: Uuid,
    pub name: String,
    pub height: Option<i32>,
    pub weight: Option<i32>,
    pub position: Position,
    pub jersey_number: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(skip)]
    pub deleted_at: Option<NaiveDateTime>,
}

impl Player {
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}
