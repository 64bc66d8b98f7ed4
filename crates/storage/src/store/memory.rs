//! An in-process [`EntityStore`] for tests and local experiments.
//!
//! Every call takes a single lock over the whole store, which makes result
//! commits all-or-nothing the same way the Postgres transaction does.

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::EntityStore;
use crate::dto::common::{ListQuery, SortOrder};
use crate::dto::matches::MatchSort;
use crate::dto::player::{CreatePlayerRequest, PlayerSort, UpdatePlayerRequest};
use crate::dto::team::{CreateTeamRequest, TeamSort, UpdateTeamRequest};
use crate::error::{Result, StorageError};
use crate::models::{
    Goal, GoalDetail, Match, MatchDetails, MatchOutcome, MatchSchedule, MatchStatus,
    MatchWithTeams, NewGoal, Player, Team,
};
use crate::services::report_builder::classify_outcome;

#[derive(Debug, Default)]
struct Tables {
    teams: Vec<Team>,
    players: Vec<Player>,
    matches: Vec<Match>,
    /// Kept in insertion order, which is submission order within a match.
    goals: Vec<Goal>,
}

impl Tables {
    fn team(&self, id: Uuid) -> Option<&Team> {
        self.teams.iter().find(|t| t.team_id == id)
    }

    fn active_team(&self, id: Uuid) -> Result<&Team> {
        self.team(id)
            .filter(|t| t.is_active())
            .ok_or(StorageError::NotFound)
    }

    fn active_team_mut(&mut self, id: Uuid) -> Result<&mut Team> {
        self.teams
            .iter_mut()
            .find(|t| t.team_id == id && t.is_active())
            .ok_or(StorageError::NotFound)
    }

    fn player(&self, id: Uuid) -> Option<&Player> {
        self.players.iter().find(|p| p.player_id == id)
    }

    fn active_player_mut(&mut self, id: Uuid) -> Result<&mut Player> {
        self.players
            .iter_mut()
            .find(|p| p.player_id == id && p.is_active())
            .ok_or(StorageError::NotFound)
    }

    fn active_match(&self, id: Uuid) -> Result<&Match> {
        self.matches
            .iter()
            .find(|m| m.match_id == id && m.deleted_at.is_none())
            .ok_or(StorageError::NotFound)
    }

    fn active_match_mut(&mut self, id: Uuid) -> Result<&mut Match> {
        self.matches
            .iter_mut()
            .find(|m| m.match_id == id && m.deleted_at.is_none())
            .ok_or(StorageError::NotFound)
    }

    fn with_teams(&self, fixture: &Match) -> Result<MatchWithTeams> {
        let home_team = self.team(fixture.home_team_id).ok_or(StorageError::NotFound)?;
        let away_team = self.team(fixture.away_team_id).ok_or(StorageError::NotFound)?;
        Ok(MatchWithTeams {
            fixture: fixture.clone(),
            home_team: home_team.clone(),
            away_team: away_team.clone(),
        })
    }

    fn goals_of(&self, match_id: Uuid) -> Vec<Goal> {
        let mut goals: Vec<Goal> = self
            .goals
            .iter()
            .filter(|g| g.match_id == match_id)
            .cloned()
            .collect();
        // stable: equal minutes stay in submission order
        goals.sort_by_key(|g| g.minute);
        goals
    }

    fn active_completed(&self) -> impl Iterator<Item = &Match> {
        self.matches
            .iter()
            .filter(|m| m.deleted_at.is_none() && m.status.is_completed())
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

fn page<T>(items: impl Iterator<Item = T>, offset: u64, limit: u32) -> Vec<T> {
    let skip = usize::try_from(offset).unwrap_or(usize::MAX);
    items.skip(skip).take(limit as usize).collect()
}

/// Orders rows given in insertion order by `key`, then by insertion order,
/// both in the direction of `order`.
fn sorted<'a, T>(
    rows: impl Iterator<Item = &'a T>,
    order: SortOrder,
    key: impl Fn(&T, &T) -> Ordering,
) -> Vec<&'a T> {
    let mut rows: Vec<(usize, &T)> = rows.enumerate().collect();
    rows.sort_by(|(ia, a), (ib, b)| {
        let ordering = key(*a, *b).then(ia.cmp(ib));
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    rows.into_iter().map(|(_, row)| row).collect()
}

/// Postgres places NULLs after every value when ascending.
fn nulls_last<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}

fn team_order(sort: TeamSort) -> impl Fn(&Team, &Team) -> Ordering {
    move |a, b| match sort {
        TeamSort::CreatedAt => a.created_at.cmp(&b.created_at),
        TeamSort::Name => a.name.cmp(&b.name),
        TeamSort::FoundedYear => nulls_last(&a.founded_year, &b.founded_year),
        TeamSort::City => nulls_last(&a.city, &b.city),
    }
}

fn player_order(sort: PlayerSort) -> impl Fn(&Player, &Player) -> Ordering {
    move |a, b| match sort {
        PlayerSort::CreatedAt => a.created_at.cmp(&b.created_at),
        PlayerSort::Name => a.name.cmp(&b.name),
        PlayerSort::JerseyNumber => a.jersey_number.cmp(&b.jersey_number),
        PlayerSort::Position => a.position.cmp(&b.position),
    }
}

fn match_order(sort: MatchSort) -> impl Fn(&Match, &Match) -> Ordering {
    move |a, b| match sort {
        MatchSort::CreatedAt => a.created_at.cmp(&b.created_at),
        MatchSort::MatchDate => a.match_date.cmp(&b.match_date),
        MatchSort::Status => a.status.cmp(&b.status),
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn find_team_by_id(&self, id: Uuid) -> Result<Team> {
        let tables = self.tables.lock().await;
        tables.active_team(id).cloned()
    }

    async fn list_teams(&self, query: &ListQuery<TeamSort>) -> Result<Vec<Team>> {
        let tables = self.tables.lock().await;
        let active = tables.teams.iter().filter(|t| t.is_active());
        let ordered = sorted(active, query.order, team_order(query.sort));
        Ok(page(ordered.into_iter().cloned(), query.offset, query.limit))
    }

    async fn count_teams(&self) -> Result<i64> {
        let tables = self.tables.lock().await;
        Ok(tables.teams.iter().filter(|t| t.is_active()).count() as i64)
    }

    async fn create_team(&self, req: &CreateTeamRequest) -> Result<Team> {
        let mut tables = self.tables.lock().await;
        let created_at = now();
        let team = Team {
            team_id: Uuid::new_v4(),
            name: req.name.clone(),
            logo_url: req.logo_url.clone(),
            founded_year: req.founded_year,
            address: req.address.clone(),
            city: req.city.clone(),
            created_at,
            updated_at: created_at,
            deleted_at: None,
        };
        tables.teams.push(team.clone());
        Ok(team)
    }

    async fn update_team(&self, id: Uuid, req: &UpdateTeamRequest) -> Result<Team> {
        let mut tables = self.tables.lock().await;
        let team = tables.active_team_mut(id)?;
        if let Some(name) = &req.name {
            team.name = name.clone();
        }
        if req.logo_url.is_some() {
            team.logo_url = req.logo_url.clone();
        }
        if req.founded_year.is_some() {
            team.founded_year = req.founded_year;
        }
        if req.address.is_some() {
            team.address = req.address.clone();
        }
        if req.city.is_some() {
            team.city = req.city.clone();
        }
        team.updated_at = now();
        Ok(team.clone())
    }

    async fn delete_team(&self, id: Uuid) -> Result<()> {
        let mut tables = self.tables.lock().await;
        tables.active_team_mut(id)?.deleted_at = Some(now());
        Ok(())
    }

    async fn find_player_by_id(&self, id: Uuid) -> Result<Player> {
        let tables = self.tables.lock().await;
        tables
            .player(id)
            .filter(|p| p.is_active())
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn find_player_by_jersey(
        &self,
        team_id: Uuid,
        jersey_number: i32,
    ) -> Result<Option<Player>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .players
            .iter()
            .find(|p| p.team_id == team_id && p.jersey_number == jersey_number && p.is_active())
            .cloned())
    }

    async fn list_players_by_team(
        &self,
        team_id: Uuid,
        query: &ListQuery<PlayerSort>,
    ) -> Result<Vec<Player>> {
        let tables = self.tables.lock().await;
        let squad = tables
            .players
            .iter()
            .filter(|p| p.team_id == team_id && p.is_active());
        let ordered = sorted(squad, query.order, player_order(query.sort));
        Ok(page(ordered.into_iter().cloned(), query.offset, query.limit))
    }

    async fn count_players_by_team(&self, team_id: Uuid) -> Result<i64> {
        let tables = self.tables.lock().await;
        Ok(tables
            .players
            .iter()
            .filter(|p| p.team_id == team_id && p.is_active())
            .count() as i64)
    }

    async fn create_player(&self, team_id: Uuid, req: &CreatePlayerRequest) -> Result<Player> {
        let mut tables = self.tables.lock().await;
        if tables.team(team_id).is_none() {
            return Err(StorageError::ConstraintViolation(
                "Team does not exist".to_string(),
            ));
        }
        let created_at = now();
        let player = Player {
            player_id: Uuid::new_v4(),
            team_id,
            name: req.name.clone(),
            height: req.height,
            weight: req.weight,
            position: req.position,
            jersey_number: req.jersey_number,
            created_at,
            updated_at: created_at,
            deleted_at: None,
        };
        tables.players.push(player.clone());
        Ok(player)
    }

    async fn update_player(&self, id: Uuid, req: &UpdatePlayerRequest) -> Result<Player> {
        let mut tables = self.tables.lock().await;
        let player = tables.active_player_mut(id)?;
        if let Some(name) = &req.name {
            player.name = name.clone();
        }
        if req.height.is_some() {
            player.height = req.height;
        }
        if req.weight.is_some() {
            player.weight = req.weight;
        }
        if let Some(position) = req.position {
            player.position = position;
        }
        if let Some(jersey_number) = req.jersey_number {
            player.jersey_number = jersey_number;
        }
        player.updated_at = now();
        Ok(player.clone())
    }

    async fn delete_player(&self, id: Uuid) -> Result<()> {
        let mut tables = self.tables.lock().await;
        tables.active_player_mut(id)?.deleted_at = Some(now());
        Ok(())
    }

    async fn find_match_by_id(&self, id: Uuid) -> Result<Match> {
        let tables = self.tables.lock().await;
        tables.active_match(id).cloned()
    }

    async fn find_match_by_id_with_details(&self, id: Uuid) -> Result<MatchDetails> {
        let tables = self.tables.lock().await;
        let row = tables.with_teams(tables.active_match(id)?)?;

        let goals = tables
            .goals_of(id)
            .into_iter()
            .map(|goal| {
                let player_name = tables
                    .player(goal.player_id)
                    .map(|p| p.name.clone())
                    .ok_or(StorageError::NotFound)?;
                let team_name = tables
                    .team(goal.team_id)
                    .map(|t| t.name.clone())
                    .ok_or(StorageError::NotFound)?;
                Ok(GoalDetail {
                    goal,
                    player_name,
                    team_name,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(MatchDetails {
            fixture: row.fixture,
            home_team: row.home_team,
            away_team: row.away_team,
            goals,
        })
    }

    async fn list_matches(&self, query: &ListQuery<MatchSort>) -> Result<Vec<MatchWithTeams>> {
        let tables = self.tables.lock().await;
        let active = tables.matches.iter().filter(|m| m.deleted_at.is_none());
        let ordered = sorted(active, query.order, match_order(query.sort));
        page(ordered.into_iter(), query.offset, query.limit)
            .into_iter()
            .map(|m| tables.with_teams(m))
            .collect()
    }

    async fn count_matches(&self) -> Result<i64> {
        let tables = self.tables.lock().await;
        Ok(tables
            .matches
            .iter()
            .filter(|m| m.deleted_at.is_none())
            .count() as i64)
    }

    async fn create_match(&self, schedule: &MatchSchedule) -> Result<Match> {
        let mut tables = self.tables.lock().await;
        if tables.team(schedule.home_team_id).is_none()
            || tables.team(schedule.away_team_id).is_none()
        {
            return Err(StorageError::ConstraintViolation(
                "Team does not exist".to_string(),
            ));
        }
        let created_at = now();
        let fixture = Match {
            match_id: Uuid::new_v4(),
            home_team_id: schedule.home_team_id,
            away_team_id: schedule.away_team_id,
            match_date: schedule.match_date.clone(),
            match_time: schedule.match_time.clone(),
            home_score: 0,
            away_score: 0,
            status: MatchStatus::Scheduled,
            created_at,
            updated_at: created_at,
            deleted_at: None,
        };
        tables.matches.push(fixture.clone());
        Ok(fixture)
    }

    async fn update_match_schedule(&self, id: Uuid, schedule: &MatchSchedule) -> Result<Match> {
        let mut tables = self.tables.lock().await;
        let fixture = tables.active_match_mut(id)?;
        if fixture.status != MatchStatus::Scheduled {
            return Err(StorageError::StatusConflict(fixture.status));
        }
        fixture.home_team_id = schedule.home_team_id;
        fixture.away_team_id = schedule.away_team_id;
        fixture.match_date = schedule.match_date.clone();
        fixture.match_time = schedule.match_time.clone();
        fixture.updated_at = now();
        Ok(fixture.clone())
    }

    async fn delete_match(&self, id: Uuid) -> Result<()> {
        let mut tables = self.tables.lock().await;
        tables.active_match_mut(id)?.deleted_at = Some(now());
        Ok(())
    }

    async fn commit_result(
        &self,
        match_id: Uuid,
        expected: MatchStatus,
        goals: &[NewGoal],
        home_score: i32,
        away_score: i32,
    ) -> Result<Match> {
        let mut tables = self.tables.lock().await;

        let status = tables.active_match(match_id)?.status;
        if status != expected {
            return Err(StorageError::StatusConflict(status));
        }
        let references_known = goals
            .iter()
            .all(|g| tables.player(g.player_id).is_some() && tables.team(g.team_id).is_some());
        if !references_known {
            return Err(StorageError::ConstraintViolation(
                "Goal references an unknown player or team".to_string(),
            ));
        }

        let written_at = now();
        tables.goals.retain(|g| g.match_id != match_id);
        tables.goals.extend(goals.iter().map(|g| Goal {
            goal_id: Uuid::new_v4(),
            match_id,
            player_id: g.player_id,
            team_id: g.team_id,
            minute: g.minute,
            created_at: written_at,
        }));

        let fixture = tables.active_match_mut(match_id)?;
        fixture.home_score = home_score;
        fixture.away_score = away_score;
        fixture.status = MatchStatus::Completed;
        fixture.updated_at = written_at;
        Ok(fixture.clone())
    }

    async fn find_goals_by_match_id(&self, match_id: Uuid) -> Result<Vec<Goal>> {
        let tables = self.tables.lock().await;
        Ok(tables.goals_of(match_id))
    }

    async fn count_completed_matches(&self) -> Result<i64> {
        let tables = self.tables.lock().await;
        Ok(tables.active_completed().count() as i64)
    }

    async fn find_completed_matches(
        &self,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<MatchWithTeams>> {
        let tables = self.tables.lock().await;
        // newest inserted first, then a stable sort on the schedule
        let mut completed: Vec<&Match> = tables.active_completed().collect();
        completed.reverse();
        completed.sort_by(|a, b| {
            (&b.match_date, &b.match_time).cmp(&(&a.match_date, &a.match_time))
        });
        page(completed.into_iter(), offset, limit)
            .into_iter()
            .map(|m| tables.with_teams(m))
            .collect()
    }

    async fn count_wins_for_team(&self, team_id: Uuid) -> Result<i64> {
        let tables = self.tables.lock().await;
        let wins = tables
            .active_completed()
            .filter(|m| {
                match classify_outcome(m.home_score, m.away_score) {
                    MatchOutcome::HomeWin => m.home_team_id == team_id,
                    MatchOutcome::AwayWin => m.away_team_id == team_id,
                    MatchOutcome::Draw => false,
                }
            })
            .count();
        Ok(wins as i64)
    }
}
