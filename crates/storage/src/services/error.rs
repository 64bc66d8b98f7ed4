use thiserror::Error;
use uuid::Uuid;

use crate::error::StorageError;

/// Why a single submitted goal was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GoalViolation {
    #[error("team is neither the home nor the away team of the match")]
    TeamNotInMatch,

    #[error("player does not belong to the specified team")]
    PlayerTeamMismatch,

    #[error("minute must be at least 1")]
    InvalidMinute,
}

impl GoalViolation {
    pub fn code(&self) -> &'static str {
        match self {
            Self::TeamNotInMatch => "team_not_in_match",
            Self::PlayerTeamMismatch => "player_team_mismatch",
            Self::InvalidMinute => "invalid_minute",
        }
    }
}

/// Broad class of a [`DomainError`], used to pick the caller-facing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Validation,
    Internal,
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Team {0} not found")]
    TeamNotFound(Uuid),

    #[error("Player {0} not found")]
    PlayerNotFound(Uuid),

    /// A submitted goal names a player that does not exist or was deleted.
    #[error("Goal #{goal}: player {player_id} not found")]
    GoalPlayerNotFound { goal: usize, player_id: Uuid },

    #[error("Match not found")]
    MatchNotFound,

    #[error("Home team and away team cannot be the same")]
    InvalidTeams,

    #[error("Match result already submitted, update it instead")]
    AlreadyCompleted,

    #[error("Match has not been completed, submit a result first")]
    NotYetCompleted,

    #[error("Cannot update the schedule of a completed match")]
    MatchAlreadyCompleted,

    #[error("Match has not been completed yet")]
    NotCompleted,

    /// `goal` is the 1-based position of the goal in the submitted list.
    #[error("Goal #{goal}: {violation}")]
    InvalidGoal { goal: usize, violation: GoalViolation },

    #[error("Jersey number {0} is already used in this team")]
    JerseyNumberTaken(i32),

    #[error(transparent)]
    Internal(#[from] StorageError),
}

impl DomainError {
    /// Storage failures other than a missing row are `Internal`; their
    /// message never reaches the caller.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TeamNotFound(_)
            | Self::PlayerNotFound(_)
            | Self::GoalPlayerNotFound { .. }
            | Self::MatchNotFound => ErrorKind::NotFound,
            Self::AlreadyCompleted
            | Self::NotYetCompleted
            | Self::MatchAlreadyCompleted
            | Self::NotCompleted
            | Self::JerseyNumberTaken(_) => ErrorKind::Conflict,
            Self::InvalidTeams | Self::InvalidGoal { .. } => ErrorKind::Validation,
            Self::Internal(StorageError::NotFound) => ErrorKind::NotFound,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Stable machine-readable identifier of the rejection
    pub fn code(&self) -> &'static str {
        match self {
            Self::TeamNotFound(_) => "team_not_found",
            Self::PlayerNotFound(_) | Self::GoalPlayerNotFound { .. } => "player_not_found",
            Self::MatchNotFound => "match_not_found",
            Self::InvalidTeams => "invalid_teams",
            Self::AlreadyCompleted => "already_completed",
            Self::NotYetCompleted => "not_yet_completed",
            Self::MatchAlreadyCompleted => "match_already_completed",
            Self::NotCompleted => "not_completed",
            Self::InvalidGoal { violation, .. } => violation.code(),
            Self::JerseyNumberTaken(_) => "jersey_number_taken",
            Self::Internal(StorageError::NotFound) => "not_found",
            Self::Internal(_) => "internal",
        }
    }
}

pub type DomainResult<T> = std::result::Result<T, DomainError>;

/// Turns a storage `NotFound` into the given domain error and any other
/// storage failure into `Internal`.
pub(crate) trait OrNotFound<T> {
    fn or_not_found(self, error: DomainError) -> DomainResult<T>;
}

impl<T> OrNotFound<T> for crate::error::Result<T> {
    fn or_not_found(self, error: DomainError) -> DomainResult<T> {
        self.map_err(|e| match e {
            StorageError::NotFound => error,
            other => DomainError::Internal(other),
        })
    }
}
