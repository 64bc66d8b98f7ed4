use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::common::SortColumn;
use crate::models::Team;

/// Request payload for creating a new team
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTeamRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(url(message = "Logo must be a valid URL"))]
    pub logo_url: Option<String>,

    #[validate(range(
        min = 1800,
        max = 2100,
        message = "Founded year must be between 1800 and 2100"
    ))]
    pub founded_year: Option<i32>,

    #[validate(length(max = 255))]
    pub address: Option<String>,

    #[validate(length(max = 255))]
    pub city: Option<String>,
}

/// Request payload for updating an existing team; absent fields keep their value
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTeamRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(url)]
    pub logo_url: Option<String>,

    #[validate(range(min = 1800, max = 2100))]
    pub founded_year: Option<i32>,

    #[validate(length(max = 255))]
    pub address: Option<String>,

    #[validate(length(max = 255))]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamResponse {
    pub team_id: Uuid,
    pub name: String,
    pub logo_url: Option<String>,
    pub founded_year: Option<i32>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Compact team reference embedded in match and report payloads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TeamSummary {
    pub team_id: Uuid,
    pub name: String,
    pub logo_url: Option<String>,
    pub city: Option<String>,
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        Self {
            team_id: team.team_id,
            name: team.name,
            logo_url: team.logo_url,
            founded_year: team.founded_year,
            address: team.address,
            city: team.city,
            created_at: team.created_at,
            updated_at: team.updated_at,
        }
    }
}

impl From<Team> for TeamSummary {
    fn from(team: Team) -> Self {
        Self {
            team_id: team.team_id,
            name: team.name,
            logo_url: team.logo_url,
            city: team.city,
        }
    }
}

/// Columns a team listing can be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TeamSort {
    #[default]
    CreatedAt,
    Name,
    FoundedYear,
    City,
}

impl SortColumn for TeamSort {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "created_at" => Some(Self::CreatedAt),
            "name" => Some(Self::Name),
            "founded_year" => Some(Self::FoundedYear),
            "city" => Some(Self::City),
            _ => None,
        }
    }

    fn as_column(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Name => "name",
            Self::FoundedYear => "founded_year",
            Self::City => "city",
        }
    }
}
