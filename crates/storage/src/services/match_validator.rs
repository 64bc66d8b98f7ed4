//! Stateless checks applied before a schedule or a result is written.

use uuid::Uuid;

use super::error::{DomainError, DomainResult, GoalViolation};
use crate::models::{GoalSubmission, Match, Player};

/// A match needs two different teams. Whether they exist is up to the caller.
pub fn validate_schedule(home_team_id: Uuid, away_team_id: Uuid) -> DomainResult<()> {
    if home_team_id == away_team_id {
        return Err(DomainError::InvalidTeams);
    }
    Ok(())
}

/// Checks one goal against its match and the player it names.
///
/// Checks run in a fixed order: the scoring team must play in the match,
/// the player must belong to that team, and the minute must be positive.
pub fn validate_goal(
    goal: &GoalSubmission,
    fixture: &Match,
    player: &Player,
) -> Result<(), GoalViolation> {
    if !fixture.involves(goal.team_id) {
        return Err(GoalViolation::TeamNotInMatch);
    }
    if player.team_id != goal.team_id {
        return Err(GoalViolation::PlayerTeamMismatch);
    }
    if goal.minute < 1 {
        return Err(GoalViolation::InvalidMinute);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::models::{MatchStatus, Position};

    fn epoch() -> NaiveDateTime {
        NaiveDateTime::default()
    }

    fn fixture(home: Uuid, away: Uuid) -> Match {
        Match {
            match_id: Uuid::new_v4(),
            home_team_id: home,
            away_team_id: away,
            match_date: "2025-06-15".to_string(),
            match_time: "19:30".to_string(),
            home_score: 0,
            away_score: 0,
            status: MatchStatus::Scheduled,
            created_at: epoch(),
            updated_at: epoch(),
            deleted_at: None,
        }
    }

    fn player_of(team_id: Uuid) -> Player {
        Player {
            player_id: Uuid::new_v4(),
            team_id,
            name: "Marko Simic".to_string(),
            height: Some(185),
            weight: Some(80),
            position: Position::Attacker,
            jersey_number: 9,
            created_at: epoch(),
            updated_at: epoch(),
            deleted_at: None,
        }
    }

    fn goal(player: &Player, team_id: Uuid, minute: i32) -> GoalSubmission {
        GoalSubmission {
            player_id: player.player_id,
            team_id,
            minute,
        }
    }

    #[test]
    fn test_schedule_rejects_same_team() {
        let team = Uuid::new_v4();
        assert!(matches!(
            validate_schedule(team, team),
            Err(DomainError::InvalidTeams)
        ));
        assert!(validate_schedule(team, Uuid::new_v4()).is_ok());
    }

    #[test]
    fn test_goal_for_either_side_is_accepted() {
        let (home, away) = (Uuid::new_v4(), Uuid::new_v4());
        let m = fixture(home, away);
        let home_player = player_of(home);
        let away_player = player_of(away);

        assert_eq!(validate_goal(&goal(&home_player, home, 1), &m, &home_player), Ok(()));
        assert_eq!(validate_goal(&goal(&away_player, away, 130), &m, &away_player), Ok(()));
    }

    #[test]
    fn test_goal_for_outside_team_is_rejected() {
        let (home, away, other) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let m = fixture(home, away);
        let outsider = player_of(other);

        assert_eq!(
            validate_goal(&goal(&outsider, other, 10), &m, &outsider),
            Err(GoalViolation::TeamNotInMatch)
        );
    }

    #[test]
    fn test_goal_credited_to_wrong_side_is_rejected() {
        let (home, away) = (Uuid::new_v4(), Uuid::new_v4());
        let m = fixture(home, away);
        let home_player = player_of(home);

        assert_eq!(
            validate_goal(&goal(&home_player, away, 10), &m, &home_player),
            Err(GoalViolation::PlayerTeamMismatch)
        );
    }

    #[test]
    fn test_minute_must_be_positive() {
        let (home, away) = (Uuid::new_v4(), Uuid::new_v4());
        let m = fixture(home, away);
        let p = player_of(home);

        assert_eq!(
            validate_goal(&goal(&p, home, 0), &m, &p),
            Err(GoalViolation::InvalidMinute)
        );
        assert_eq!(
            validate_goal(&goal(&p, home, -5), &m, &p),
            Err(GoalViolation::InvalidMinute)
        );
    }

    #[test]
    fn test_team_check_runs_before_minute_check() {
        let (home, away, other) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let m = fixture(home, away);
        let outsider = player_of(other);

        assert_eq!(
            validate_goal(&goal(&outsider, other, 0), &m, &outsider),
            Err(GoalViolation::TeamNotInMatch)
        );
    }
}
