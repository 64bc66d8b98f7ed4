//! Match lifecycle: scheduling, result submission and result replacement.
//!
//! A match is created `Scheduled`, may be rescheduled while it stays
//! scheduled, becomes `Completed` once through [`submit_result`], and can
//! afterwards only have its result replaced through [`update_result`].
//! Scores are always the tally of the goals written in the same commit.

use uuid::Uuid;

use super::error::{DomainError, DomainResult, OrNotFound};
use super::match_validator::{validate_goal, validate_schedule};
use crate::error::StorageError;
use crate::models::{GoalSubmission, Match, MatchDetails, MatchSchedule, MatchStatus, NewGoal};
use crate::store::EntityStore;

/// Goals that passed validation together with the score they produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedResult {
    pub goals: Vec<NewGoal>,
    pub home_score: i32,
    pub away_score: i32,
}

/// Schedule a new match between two existing teams.
pub async fn create_match(
    store: &dyn EntityStore,
    schedule: &MatchSchedule,
) -> DomainResult<Match> {
    check_teams(store, schedule).await?;

    let fixture = store.create_match(schedule).await?;
    tracing::info!(
        match_id = %fixture.match_id,
        home_team_id = %fixture.home_team_id,
        away_team_id = %fixture.away_team_id,
        "Match scheduled"
    );

    Ok(fixture)
}

/// Change the teams, date or time of a match that has not been played.
pub async fn update_match(
    store: &dyn EntityStore,
    match_id: Uuid,
    schedule: &MatchSchedule,
) -> DomainResult<Match> {
    let fixture = store
        .find_match_by_id(match_id)
        .await
        .or_not_found(DomainError::MatchNotFound)?;

    if fixture.status.is_completed() {
        return Err(DomainError::MatchAlreadyCompleted);
    }

    check_teams(store, schedule).await?;

    store
        .update_match_schedule(match_id, schedule)
        .await
        .map_err(reschedule_error)
}

/// A match completed between the status check and the write.
fn reschedule_error(error: StorageError) -> DomainError {
    match error {
        StorageError::StatusConflict(_) => DomainError::MatchAlreadyCompleted,
        StorageError::NotFound => DomainError::MatchNotFound,
        other => DomainError::Internal(other),
    }
}

/// Record the result of a scheduled match and complete it.
pub async fn submit_result(
    store: &dyn EntityStore,
    match_id: Uuid,
    goals: &[GoalSubmission],
) -> DomainResult<MatchDetails> {
    let fixture = store
        .find_match_by_id(match_id)
        .await
        .or_not_found(DomainError::MatchNotFound)?;

    if fixture.status != MatchStatus::Scheduled {
        return Err(DomainError::AlreadyCompleted);
    }

    commit(store, &fixture, goals).await
}

/// Replace the result of a completed match, recomputing it from scratch.
pub async fn update_result(
    store: &dyn EntityStore,
    match_id: Uuid,
    goals: &[GoalSubmission],
) -> DomainResult<MatchDetails> {
    let fixture = store
        .find_match_by_id(match_id)
        .await
        .or_not_found(DomainError::MatchNotFound)?;

    if fixture.status != MatchStatus::Completed {
        return Err(DomainError::NotYetCompleted);
    }

    commit(store, &fixture, goals).await
}

/// Validate every goal of a submission and tally the score.
///
/// Goals are checked in the order given; the first failure rejects the
/// whole submission.
pub async fn process_result(
    store: &dyn EntityStore,
    fixture: &Match,
    goals: &[GoalSubmission],
) -> DomainResult<ProcessedResult> {
    let mut processed = ProcessedResult {
        goals: Vec::with_capacity(goals.len()),
        home_score: 0,
        away_score: 0,
    };

    for (index, goal) in goals.iter().enumerate() {
        let player = store
            .find_player_by_id(goal.player_id)
            .await
            .or_not_found(DomainError::GoalPlayerNotFound {
                goal: index + 1,
                player_id: goal.player_id,
            })?;

        validate_goal(goal, fixture, &player).map_err(|violation| DomainError::InvalidGoal {
            goal: index + 1,
            violation,
        })?;

        if goal.team_id == fixture.home_team_id {
            processed.home_score += 1;
        } else {
            processed.away_score += 1;
        }

        processed.goals.push(NewGoal {
            player_id: goal.player_id,
            team_id: goal.team_id,
            minute: goal.minute,
        });
    }

    Ok(processed)
}

async fn commit(
    store: &dyn EntityStore,
    fixture: &Match,
    goals: &[GoalSubmission],
) -> DomainResult<MatchDetails> {
    let processed = process_result(store, fixture, goals).await?;

    store
        .commit_result(
            fixture.match_id,
            fixture.status,
            &processed.goals,
            processed.home_score,
            processed.away_score,
        )
        .await
        .map_err(|e| match e {
            // status seen by the locked write, not the one read earlier
            StorageError::StatusConflict(MatchStatus::Completed) => DomainError::AlreadyCompleted,
            StorageError::StatusConflict(MatchStatus::Scheduled) => DomainError::NotYetCompleted,
            StorageError::NotFound => DomainError::MatchNotFound,
            other => DomainError::Internal(other),
        })?;

    tracing::info!(
        match_id = %fixture.match_id,
        replaced = fixture.status.is_completed(),
        home_score = processed.home_score,
        away_score = processed.away_score,
        goals = processed.goals.len(),
        "Match result recorded"
    );

    store
        .find_match_by_id_with_details(fixture.match_id)
        .await
        .or_not_found(DomainError::MatchNotFound)
}

async fn check_teams(store: &dyn EntityStore, schedule: &MatchSchedule) -> DomainResult<()> {
    validate_schedule(schedule.home_team_id, schedule.away_team_id)?;

    for team_id in [schedule.home_team_id, schedule.away_team_id] {
        store
            .find_team_by_id(team_id)
            .await
            .or_not_found(DomainError::TeamNotFound(team_id))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{League, goal};
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_create_match_starts_scheduled_at_nil_nil() {
        let league = League::seed().await;

        let fixture = create_match(&league.store, &league.schedule()).await.unwrap();

        assert_eq!(fixture.status, MatchStatus::Scheduled);
        assert_eq!((fixture.home_score, fixture.away_score), (0, 0));
        assert_eq!(fixture.home_team_id, league.home.team_id);
    }

    #[tokio::test]
    async fn test_create_match_with_same_team_fails_before_lookup() {
        // an empty store would answer TeamNotFound if a lookup happened
        let store = MemoryStore::new();
        let team_id = Uuid::new_v4();
        let schedule = MatchSchedule {
            home_team_id: team_id,
            away_team_id: team_id,
            match_date: "2025-06-15".to_string(),
            match_time: "19:30".to_string(),
        };

        let err = create_match(&store, &schedule).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidTeams));
    }

    #[tokio::test]
    async fn test_create_match_with_unknown_team() {
        let league = League::seed().await;
        let missing = Uuid::new_v4();
        let mut schedule = league.schedule();
        schedule.away_team_id = missing;

        let err = create_match(&league.store, &schedule).await.unwrap_err();
        assert!(matches!(err, DomainError::TeamNotFound(id) if id == missing));
    }

    #[tokio::test]
    async fn test_create_match_with_deleted_team() {
        let league = League::seed().await;
        league.store.delete_team(league.away.team_id).await.unwrap();

        let err = create_match(&league.store, &league.schedule()).await.unwrap_err();
        assert!(matches!(err, DomainError::TeamNotFound(id) if id == league.away.team_id));
    }

    #[tokio::test]
    async fn test_update_match_reschedules() {
        let league = League::seed().await;
        let fixture = league.scheduled_match().await;
        let mut schedule = league.schedule();
        schedule.home_team_id = league.away.team_id;
        schedule.away_team_id = league.home.team_id;
        schedule.match_date = "2025-07-01".to_string();

        let updated = update_match(&league.store, fixture.match_id, &schedule)
            .await
            .unwrap();

        assert_eq!(updated.home_team_id, league.away.team_id);
        assert_eq!(updated.match_date, "2025-07-01");
        assert_eq!(updated.status, MatchStatus::Scheduled);
    }

    #[tokio::test]
    async fn test_update_match_rejects_completed() {
        let league = League::seed().await;
        let fixture = league.scheduled_match().await;
        submit_result(&league.store, fixture.match_id, &[]).await.unwrap();

        let err = update_match(&league.store, fixture.match_id, &league.schedule())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::MatchAlreadyCompleted));
    }

    #[test]
    fn test_reschedule_losing_race_to_result() {
        let err = reschedule_error(StorageError::StatusConflict(MatchStatus::Completed));
        assert!(matches!(err, DomainError::MatchAlreadyCompleted));
        assert!(matches!(reschedule_error(StorageError::NotFound), DomainError::MatchNotFound));
    }

    #[tokio::test]
    async fn test_update_match_unknown() {
        let league = League::seed().await;

        let err = update_match(&league.store, Uuid::new_v4(), &league.schedule())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::MatchNotFound));
    }

    #[tokio::test]
    async fn test_submit_result_tallies_and_completes() {
        let league = League::seed().await;
        let fixture = league.scheduled_match().await;
        let goals = [
            goal(&league.home_striker, 10),
            goal(&league.away_striker, 55),
            goal(&league.home_striker, 80),
        ];

        let details = submit_result(&league.store, fixture.match_id, &goals)
            .await
            .unwrap();

        assert_eq!(details.fixture.status, MatchStatus::Completed);
        assert_eq!(details.fixture.home_score, 2);
        assert_eq!(details.fixture.away_score, 1);
        let minutes: Vec<i32> = details.goals.iter().map(|g| g.goal.minute).collect();
        assert_eq!(minutes, vec![10, 55, 80]);
        assert_eq!(details.goals[0].player_name, league.home_striker.name);
    }

    #[tokio::test]
    async fn test_submit_result_without_goals_is_a_draw() {
        let league = League::seed().await;
        let fixture = league.scheduled_match().await;

        let details = submit_result(&league.store, fixture.match_id, &[])
            .await
            .unwrap();

        assert_eq!(details.fixture.status, MatchStatus::Completed);
        assert_eq!((details.fixture.home_score, details.fixture.away_score), (0, 0));
        assert!(details.goals.is_empty());
    }

    #[tokio::test]
    async fn test_submit_result_twice_fails_regardless_of_payload() {
        let league = League::seed().await;
        let fixture = league.scheduled_match().await;
        submit_result(&league.store, fixture.match_id, &[goal(&league.home_striker, 5)])
            .await
            .unwrap();

        let outsider_goal = GoalSubmission {
            player_id: Uuid::new_v4(),
            team_id: Uuid::new_v4(),
            minute: 0,
        };
        let err = submit_result(&league.store, fixture.match_id, &[outsider_goal])
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::AlreadyCompleted));
    }

    #[tokio::test]
    async fn test_submit_result_unknown_match() {
        let league = League::seed().await;

        let err = submit_result(&league.store, Uuid::new_v4(), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::MatchNotFound));
    }

    #[tokio::test]
    async fn test_submit_result_rejects_outside_team_without_writing() {
        let league = League::seed().await;
        let fixture = league.scheduled_match().await;
        let goals = [
            goal(&league.home_striker, 10),
            goal(&league.outsider, 20),
        ];

        let err = submit_result(&league.store, fixture.match_id, &goals)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidGoal {
                goal: 2,
                violation: crate::services::GoalViolation::TeamNotInMatch
            }
        ));

        let reloaded = league.store.find_match_by_id(fixture.match_id).await.unwrap();
        assert_eq!(reloaded.status, MatchStatus::Scheduled);
        assert!(
            league
                .store
                .find_goals_by_match_id(fixture.match_id)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_submit_result_rejects_player_of_other_side() {
        let league = League::seed().await;
        let fixture = league.scheduled_match().await;
        let misattributed = GoalSubmission {
            player_id: league.home_striker.player_id,
            team_id: league.away.team_id,
            minute: 30,
        };

        let err = submit_result(&league.store, fixture.match_id, &[misattributed])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidGoal {
                goal: 1,
                violation: crate::services::GoalViolation::PlayerTeamMismatch
            }
        ));
    }

    #[tokio::test]
    async fn test_submit_result_rejects_unknown_or_deleted_player() {
        let league = League::seed().await;
        let fixture = league.scheduled_match().await;
        let ghost = Uuid::new_v4();
        let unknown = GoalSubmission {
            player_id: ghost,
            team_id: league.home.team_id,
            minute: 30,
        };

        let err = submit_result(&league.store, fixture.match_id, &[unknown])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::GoalPlayerNotFound { goal: 1, player_id } if player_id == ghost
        ));

        league
            .store
            .delete_player(league.away_striker.player_id)
            .await
            .unwrap();
        let goals = [goal(&league.home_striker, 1), goal(&league.away_striker, 3)];
        let err = submit_result(&league.store, fixture.match_id, &goals)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::GoalPlayerNotFound { goal: 2, .. }));
        assert_eq!(err.code(), "player_not_found");
    }

    #[tokio::test]
    async fn test_submit_result_rejects_non_positive_minute() {
        let league = League::seed().await;
        let fixture = league.scheduled_match().await;

        let err = submit_result(&league.store, fixture.match_id, &[goal(&league.home_striker, 0)])
            .await
            .unwrap_err();
        assert_eq!(err.code(), "invalid_minute");
    }

    #[tokio::test]
    async fn test_commit_loses_race_to_earlier_submission() {
        let league = League::seed().await;
        let snapshot = league.scheduled_match().await;
        submit_result(&league.store, snapshot.match_id, &[goal(&league.home_striker, 10)])
            .await
            .unwrap();

        // a second submitter that read the match while it was still scheduled
        let err = commit(&league.store, &snapshot, &[goal(&league.away_striker, 20)])
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::AlreadyCompleted));

        let reloaded = league.store.find_match_by_id(snapshot.match_id).await.unwrap();
        assert_eq!((reloaded.home_score, reloaded.away_score), (1, 0));
        let goals = league
            .store
            .find_goals_by_match_id(snapshot.match_id)
            .await
            .unwrap();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].player_id, league.home_striker.player_id);
    }

    #[tokio::test]
    async fn test_commit_replacement_of_match_that_is_not_completed() {
        let league = League::seed().await;
        let fixture = league.scheduled_match().await;
        let mut stale = fixture.clone();
        stale.status = MatchStatus::Completed;

        let err = commit(&league.store, &stale, &[goal(&league.home_striker, 5)])
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotYetCompleted));

        let reloaded = league.store.find_match_by_id(fixture.match_id).await.unwrap();
        assert_eq!(reloaded.status, MatchStatus::Scheduled);
        assert_eq!((reloaded.home_score, reloaded.away_score), (0, 0));
    }

    #[tokio::test]
    async fn test_update_result_on_scheduled_match() {
        let league = League::seed().await;
        let fixture = league.scheduled_match().await;

        let err = update_result(&league.store, fixture.match_id, &[goal(&league.home_striker, 1)])
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotYetCompleted));

        let reloaded = league.store.find_match_by_id(fixture.match_id).await.unwrap();
        assert_eq!(reloaded.status, MatchStatus::Scheduled);
        assert!(
            league
                .store
                .find_goals_by_match_id(fixture.match_id)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_update_result_replaces_goals() {
        let league = League::seed().await;
        let fixture = league.scheduled_match().await;
        submit_result(
            &league.store,
            fixture.match_id,
            &[goal(&league.home_striker, 10), goal(&league.home_striker, 20)],
        )
        .await
        .unwrap();

        let details = update_result(&league.store, fixture.match_id, &[goal(&league.away_striker, 90)])
            .await
            .unwrap();

        assert_eq!(details.fixture.status, MatchStatus::Completed);
        assert_eq!((details.fixture.home_score, details.fixture.away_score), (0, 1));
        assert_eq!(details.goals.len(), 1);
        assert_eq!(details.goals[0].goal.player_id, league.away_striker.player_id);
    }

    #[tokio::test]
    async fn test_failed_update_keeps_previous_result() {
        let league = League::seed().await;
        let fixture = league.scheduled_match().await;
        submit_result(&league.store, fixture.match_id, &[goal(&league.home_striker, 10)])
            .await
            .unwrap();

        let err = update_result(
            &league.store,
            fixture.match_id,
            &[goal(&league.away_striker, 15), goal(&league.outsider, 70)],
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), "team_not_in_match");

        let reloaded = league.store.find_match_by_id(fixture.match_id).await.unwrap();
        assert_eq!((reloaded.home_score, reloaded.away_score), (1, 0));
        let goals = league
            .store
            .find_goals_by_match_id(fixture.match_id)
            .await
            .unwrap();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].player_id, league.home_striker.player_id);
    }

    #[tokio::test]
    async fn test_update_result_replay_is_stable() {
        let league = League::seed().await;
        let fixture = league.scheduled_match().await;
        let goals = [
            goal(&league.away_striker, 12),
            goal(&league.home_striker, 44),
            goal(&league.away_striker, 61),
        ];
        submit_result(&league.store, fixture.match_id, &[]).await.unwrap();

        let first = update_result(&league.store, fixture.match_id, &goals).await.unwrap();
        let second = update_result(&league.store, fixture.match_id, &goals).await.unwrap();

        assert_eq!(
            (first.fixture.home_score, first.fixture.away_score),
            (second.fixture.home_score, second.fixture.away_score)
        );
        let shape = |d: &MatchDetails| -> Vec<(Uuid, Uuid, i32)> {
            d.goals
                .iter()
                .map(|g| (g.goal.player_id, g.goal.team_id, g.goal.minute))
                .collect()
        };
        assert_eq!(shape(&first), shape(&second));
        assert_eq!(second.goals.len(), 3);
    }

    #[tokio::test]
    async fn test_process_result_keeps_submission_order() {
        let league = League::seed().await;
        let fixture = league.scheduled_match().await;
        let goals = [goal(&league.away_striker, 80), goal(&league.home_striker, 3)];

        let processed = process_result(&league.store, &fixture, &goals).await.unwrap();

        assert_eq!(processed.home_score, 1);
        assert_eq!(processed.away_score, 1);
        assert_eq!(processed.goals[0].minute, 80);
        assert_eq!(processed.goals[1].minute, 3);
    }
}
