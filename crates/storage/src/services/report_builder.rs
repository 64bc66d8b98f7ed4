//! Derived views over completed matches: outcome, top scorer and the
//! running win count of each side.

use uuid::Uuid;

use super::error::{DomainError, DomainResult, OrNotFound};
use crate::dto::common::{PaginatedResponse, PaginationParams};
use crate::dto::report::{MatchReportGoal, MatchReportListItem, MatchReportResponse, TopScorer};
use crate::models::{GoalDetail, MatchOutcome, MatchStatus, MatchWithTeams};
use crate::store::EntityStore;

pub fn classify_outcome(home_score: i32, away_score: i32) -> MatchOutcome {
    match home_score.cmp(&away_score) {
        std::cmp::Ordering::Greater => MatchOutcome::HomeWin,
        std::cmp::Ordering::Less => MatchOutcome::AwayWin,
        std::cmp::Ordering::Equal => MatchOutcome::Draw,
    }
}

/// Player with the most goals in the list.
///
/// A tie goes to the player who scored first, by minute and then by
/// position in the list. `None` when there are no goals.
pub fn compute_top_scorer(goals: &[GoalDetail]) -> Option<TopScorer> {
    let mut ordered: Vec<&GoalDetail> = goals.iter().collect();
    ordered.sort_by_key(|g| g.goal.minute);

    // first-seen order, so earlier scorers come first
    let mut tally: Vec<(&GoalDetail, u32)> = Vec::new();
    for goal in ordered {
        match tally
            .iter_mut()
            .find(|(seen, _)| seen.goal.player_id == goal.goal.player_id)
        {
            Some((_, count)) => *count += 1,
            None => tally.push((goal, 1)),
        }
    }

    let mut best: Option<(&GoalDetail, u32)> = None;
    for (goal, count) in tally {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((goal, count));
        }
    }

    best.map(|(goal, goals_in_match)| TopScorer {
        player_id: goal.goal.player_id,
        player_name: goal.player_name.clone(),
        team_name: goal.team_name.clone(),
        goals_in_match,
    })
}

/// Completed matches won by the team so far, home or away.
pub async fn compute_cumulative_wins(store: &dyn EntityStore, team_id: Uuid) -> DomainResult<i64> {
    Ok(store.count_wins_for_team(team_id).await?)
}

pub async fn build_match_report(
    store: &dyn EntityStore,
    match_id: Uuid,
) -> DomainResult<MatchReportResponse> {
    let details = store
        .find_match_by_id_with_details(match_id)
        .await
        .or_not_found(DomainError::MatchNotFound)?;

    if details.fixture.status != MatchStatus::Completed {
        return Err(DomainError::NotCompleted);
    }

    let top_scorer = compute_top_scorer(&details.goals);
    let home_team_total_wins = compute_cumulative_wins(store, details.home_team.team_id).await?;
    let away_team_total_wins = compute_cumulative_wins(store, details.away_team.team_id).await?;

    let fixture = details.fixture;
    Ok(MatchReportResponse {
        match_id: fixture.match_id,
        match_date: fixture.match_date,
        match_time: fixture.match_time,
        home_team: details.home_team.into(),
        away_team: details.away_team.into(),
        home_score: fixture.home_score,
        away_score: fixture.away_score,
        match_result: classify_outcome(fixture.home_score, fixture.away_score),
        goals: details
            .goals
            .into_iter()
            .map(|g| MatchReportGoal {
                player_name: g.player_name,
                team_name: g.team_name,
                minute: g.goal.minute,
            })
            .collect(),
        top_scorer,
        home_team_total_wins,
        away_team_total_wins,
    })
}

/// One page of completed matches, latest scheduled first.
pub async fn build_report_list(
    store: &dyn EntityStore,
    params: &PaginationParams,
) -> DomainResult<PaginatedResponse<MatchReportListItem>> {
    let total = store.count_completed_matches().await?;
    let rows = store
        .find_completed_matches(params.offset(), params.limit())
        .await?;

    Ok(PaginatedResponse::new(rows, params, total).map(MatchReportListItem::from))
}

impl From<MatchWithTeams> for MatchReportListItem {
    fn from(row: MatchWithTeams) -> Self {
        let fixture = row.fixture;
        Self {
            match_id: fixture.match_id,
            match_date: fixture.match_date,
            match_time: fixture.match_time,
            home_team: row.home_team.into(),
            away_team: row.away_team.into(),
            home_score: fixture.home_score,
            away_score: fixture.away_score,
            match_result: classify_outcome(fixture.home_score, fixture.away_score),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use proptest::prelude::*;

    use super::*;
    use crate::models::{Goal, MatchSchedule};
    use crate::services::result_processor::submit_result;
    use crate::services::testing::{League, add_player, goal};

    fn detail(player_id: Uuid, name: &str, minute: i32) -> GoalDetail {
        GoalDetail {
            goal: Goal {
                goal_id: Uuid::new_v4(),
                match_id: Uuid::nil(),
                player_id,
                team_id: Uuid::nil(),
                minute,
                created_at: NaiveDateTime::default(),
            },
            player_name: name.to_string(),
            team_name: "Persija".to_string(),
        }
    }

    #[test]
    fn test_classify_outcome() {
        assert_eq!(classify_outcome(2, 1), MatchOutcome::HomeWin);
        assert_eq!(classify_outcome(0, 3), MatchOutcome::AwayWin);
        assert_eq!(classify_outcome(0, 0), MatchOutcome::Draw);
        assert_eq!(classify_outcome(4, 4), MatchOutcome::Draw);
    }

    #[test]
    fn test_outcome_serializes_as_label() {
        let json = serde_json::to_string(&MatchOutcome::HomeWin).unwrap();
        assert_eq!(json, "\"Home Win\"");
    }

    #[test]
    fn test_top_scorer_none_without_goals() {
        assert_eq!(compute_top_scorer(&[]), None);
    }

    #[test]
    fn test_top_scorer_counts_goals() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let goals = [detail(a, "A", 10), detail(b, "B", 20), detail(a, "A", 30)];

        let top = compute_top_scorer(&goals).unwrap();
        assert_eq!(top.player_id, a);
        assert_eq!(top.goals_in_match, 2);
    }

    #[test]
    fn test_top_scorer_tie_goes_to_earliest_scorer() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        // listed out of minute order on purpose
        let goals = [detail(a, "A", 50), detail(b, "B", 5), detail(a, "A", 60), detail(b, "B", 70)];

        let top = compute_top_scorer(&goals).unwrap();
        assert_eq!(top.player_id, b);
        assert_eq!(top.player_name, "B");
    }

    #[test]
    fn test_top_scorer_same_minute_falls_back_to_list_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let goals = [detail(b, "B", 45), detail(a, "A", 45)];

        assert_eq!(compute_top_scorer(&goals).unwrap().player_id, b);
    }

    #[tokio::test]
    async fn test_report_of_scheduled_match_is_rejected() {
        let league = League::seed().await;
        let fixture = league.scheduled_match().await;

        let err = build_match_report(&league.store, fixture.match_id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotCompleted));
    }

    #[tokio::test]
    async fn test_report_of_unknown_match() {
        let league = League::seed().await;

        let err = build_match_report(&league.store, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::MatchNotFound));
    }

    #[tokio::test]
    async fn test_report_of_completed_match() {
        let league = League::seed().await;
        let fixture = league.scheduled_match().await;
        submit_result(
            &league.store,
            fixture.match_id,
            &[
                goal(&league.home_striker, 10),
                goal(&league.away_striker, 55),
                goal(&league.home_striker, 80),
            ],
        )
        .await
        .unwrap();

        let report = build_match_report(&league.store, fixture.match_id)
            .await
            .unwrap();

        assert_eq!(report.match_result, MatchOutcome::HomeWin);
        assert_eq!((report.home_score, report.away_score), (2, 1));
        let minutes: Vec<i32> = report.goals.iter().map(|g| g.minute).collect();
        assert_eq!(minutes, vec![10, 55, 80]);
        let top = report.top_scorer.unwrap();
        assert_eq!(top.player_id, league.home_striker.player_id);
        assert_eq!(top.goals_in_match, 2);
        assert_eq!(top.team_name, league.home.name);
        assert_eq!(report.home_team_total_wins, 1);
        assert_eq!(report.away_team_total_wins, 0);
        assert_eq!(report.home_team.name, league.home.name);
    }

    #[tokio::test]
    async fn test_goalless_draw_report() {
        let league = League::seed().await;
        let fixture = league.scheduled_match().await;
        submit_result(&league.store, fixture.match_id, &[]).await.unwrap();

        let report = build_match_report(&league.store, fixture.match_id)
            .await
            .unwrap();

        assert_eq!(report.match_result, MatchOutcome::Draw);
        assert!(report.goals.is_empty());
        assert_eq!(report.top_scorer, None);
        assert_eq!(report.home_team_total_wins, 0);
        assert_eq!(report.away_team_total_wins, 0);
    }

    #[tokio::test]
    async fn test_cumulative_wins_count_home_and_away() {
        let league = League::seed().await;
        let first = league.scheduled_match().await;
        submit_result(&league.store, first.match_id, &[goal(&league.home_striker, 3)])
            .await
            .unwrap();

        // home side plays away against the third team and wins again
        let second = league
            .store
            .create_match(&MatchSchedule {
                home_team_id: league.third.team_id,
                away_team_id: league.home.team_id,
                match_date: "2025-06-22".to_string(),
                match_time: "15:00".to_string(),
            })
            .await
            .unwrap();
        submit_result(&league.store, second.match_id, &[goal(&league.home_striker, 70)])
            .await
            .unwrap();

        // a draw counts for nobody
        let third = league.scheduled_match().await;
        submit_result(&league.store, third.match_id, &[]).await.unwrap();

        assert_eq!(compute_cumulative_wins(&league.store, league.home.team_id).await.unwrap(), 2);
        assert_eq!(compute_cumulative_wins(&league.store, league.away.team_id).await.unwrap(), 0);
        assert_eq!(compute_cumulative_wins(&league.store, league.third.team_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_cumulative_wins_ignore_deleted_matches() {
        let league = League::seed().await;
        let fixture = league.scheduled_match().await;
        submit_result(&league.store, fixture.match_id, &[goal(&league.away_striker, 88)])
            .await
            .unwrap();
        assert_eq!(compute_cumulative_wins(&league.store, league.away.team_id).await.unwrap(), 1);

        league.store.delete_match(fixture.match_id).await.unwrap();

        assert_eq!(compute_cumulative_wins(&league.store, league.away.team_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_report_list_orders_by_schedule_and_skips_scheduled() {
        let league = League::seed().await;
        let dates = ["2025-06-01", "2025-08-01", "2025-07-01"];
        for date in dates {
            let mut schedule = league.schedule();
            schedule.match_date = date.to_string();
            let fixture = league.store.create_match(&schedule).await.unwrap();
            submit_result(&league.store, fixture.match_id, &[]).await.unwrap();
        }
        league.scheduled_match().await;

        let page = build_report_list(&league.store, &PaginationParams::new(1, 2))
            .await
            .unwrap();

        assert_eq!(page.pagination.total_items, 3);
        assert_eq!(page.pagination.total_pages, 2);
        let listed: Vec<&str> = page.data.iter().map(|r| r.match_date.as_str()).collect();
        assert_eq!(listed, vec!["2025-08-01", "2025-07-01"]);
        assert_eq!(page.data[0].match_result, MatchOutcome::Draw);

        let rest = build_report_list(&league.store, &PaginationParams::new(2, 2))
            .await
            .unwrap();
        assert_eq!(rest.data.len(), 1);
        assert_eq!(rest.data[0].match_date, "2025-06-01");
    }

    #[tokio::test]
    async fn test_report_list_last_possible_page_is_empty() {
        let league = League::seed().await;
        let fixture = league.scheduled_match().await;
        submit_result(&league.store, fixture.match_id, &[]).await.unwrap();

        let params = PaginationParams::new(u32::MAX, 100);
        let page = build_report_list(&league.store, &params).await.unwrap();

        assert!(page.data.is_empty());
        assert_eq!(page.pagination.page, u32::MAX);
        assert_eq!(page.pagination.total_items, 1);
    }

    #[tokio::test]
    async fn test_report_names_deleted_scorer() {
        let league = League::seed().await;
        let loanee = add_player(&league.store, &league.away, "Ezra", 22).await;
        let fixture = league.scheduled_match().await;
        submit_result(&league.store, fixture.match_id, &[goal(&loanee, 12)])
            .await
            .unwrap();
        league.store.delete_player(loanee.player_id).await.unwrap();

        let report = build_match_report(&league.store, fixture.match_id)
            .await
            .unwrap();

        assert_eq!(report.goals[0].player_name, "Ezra");
        assert_eq!(report.top_scorer.unwrap().player_name, "Ezra");
    }

    fn roster() -> Vec<Uuid> {
        (0..4).map(|_| Uuid::new_v4()).collect()
    }

    proptest! {
        /// Exactly one outcome, and swapping the sides mirrors it.
        #[test]
        fn prop_outcome_mirrors_when_sides_swap(home in 0i32..20, away in 0i32..20) {
            let outcome = classify_outcome(home, away);
            let mirrored = match outcome {
                MatchOutcome::HomeWin => MatchOutcome::AwayWin,
                MatchOutcome::AwayWin => MatchOutcome::HomeWin,
                MatchOutcome::Draw => MatchOutcome::Draw,
            };
            prop_assert_eq!(classify_outcome(away, home), mirrored);
            prop_assert_eq!(outcome == MatchOutcome::Draw, home == away);
        }

        /// With distinct minutes the top scorer does not depend on list order
        /// and holds the highest goal count.
        #[test]
        fn prop_top_scorer_is_order_independent(
            scorers in proptest::collection::vec(0usize..4, 1..25),
            rotation in 0usize..25,
        ) {
            let players = roster();
            let goals: Vec<GoalDetail> = scorers
                .iter()
                .enumerate()
                .map(|(i, &p)| detail(players[p], &format!("P{p}"), i as i32 + 1))
                .collect();

            let top = compute_top_scorer(&goals).unwrap();

            let mut reversed = goals.clone();
            reversed.reverse();
            let from_reversed = compute_top_scorer(&reversed);
            prop_assert_eq!(from_reversed.as_ref(), Some(&top));

            let mut rotated = goals.clone();
            rotated.rotate_left(rotation % goals.len());
            let from_rotated = compute_top_scorer(&rotated);
            prop_assert_eq!(from_rotated.as_ref(), Some(&top));

            let most = (0..4).map(|p| scorers.iter().filter(|&&s| s == p).count()).max().unwrap();
            prop_assert_eq!(top.goals_in_match as usize, most);
        }
    }
}
