use chrono::NaiveDateTime;
use sqlx::{FromRow, PgPool, QueryBuilder};
use uuid::Uuid;

use super::goal::GoalRepository;
use super::team::TeamRepository;
use super::{order_by, sql_offset};
use crate::dto::common::ListQuery;
use crate::dto::matches::MatchSort;
use crate::error::{Result, StorageError, map_foreign_key};
use crate::models::{
    Match, MatchDetails, MatchSchedule, MatchStatus, MatchWithTeams, NewGoal, Team,
};

/// A match row joined with both of its teams
#[derive(FromRow)]
struct MatchTeamsRow {
    #[sqlx(flatten)]
    fixture: Match,
    home_name: String,
    home_logo_url: Option<String>,
    home_founded_year: Option<i32>,
    home_address: Option<String>,
    home_city: Option<String>,
    home_created_at: NaiveDateTime,
    home_updated_at: NaiveDateTime,
    home_deleted_at: Option<NaiveDateTime>,
    away_name: String,
    away_logo_url: Option<String>,
    away_founded_year: Option<i32>,
    away_address: Option<String>,
    away_city: Option<String>,
    away_created_at: NaiveDateTime,
    away_updated_at: NaiveDateTime,
    away_deleted_at: Option<NaiveDateTime>,
}

impl From<MatchTeamsRow> for MatchWithTeams {
    fn from(row: MatchTeamsRow) -> Self {
        let home_team = Team {
            team_id: row.fixture.home_team_id,
            name: row.home_name,
            logo_url: row.home_logo_url,
            founded_year: row.home_founded_year,
            address: row.home_address,
            city: row.home_city,
            created_at: row.home_created_at,
            updated_at: row.home_updated_at,
            deleted_at: row.home_deleted_at,
        };
        let away_team = Team {
            team_id: row.fixture.away_team_id,
            name: row.away_name,
            logo_url: row.away_logo_url,
            founded_year: row.away_founded_year,
            address: row.away_address,
            city: row.away_city,
            created_at: row.away_created_at,
            updated_at: row.away_updated_at,
            deleted_at: row.away_deleted_at,
        };

        Self {
            fixture: row.fixture,
            home_team,
            away_team,
        }
    }
}

/// Repository for Match database operations
pub struct MatchRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MatchRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get an active match by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Match> {
        let fixture = sqlx::query_as::<_, Match>(
            r#"
            SELECT match_id, home_team_id, away_team_id, match_date, match_time,
                   home_score, away_score, status, created_at, updated_at, deleted_at
            FROM matches
            WHERE match_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(fixture)
    }

    /// Get a match with both teams and its goals
    pub async fn find_by_id_with_details(&self, id: Uuid) -> Result<MatchDetails> {
        let fixture = self.find_by_id(id).await?;

        let teams = TeamRepository::new(self.pool);
        let home_team = teams.find_any_by_id(fixture.home_team_id).await?;
        let away_team = teams.find_any_by_id(fixture.away_team_id).await?;

        let goals = GoalRepository::new(self.pool)
            .find_details_by_match_id(fixture.match_id)
            .await?;

        Ok(MatchDetails {
            fixture,
            home_team,
            away_team,
            goals,
        })
    }

    /// List active matches with their teams in the requested order
    pub async fn list(&self, query: &ListQuery<MatchSort>) -> Result<Vec<MatchWithTeams>> {
        let mut builder = QueryBuilder::new(
            r#"
            SELECT m.match_id, m.home_team_id, m.away_team_id, m.match_date, m.match_time,
                   m.home_score, m.away_score, m.status, m.created_at, m.updated_at, m.deleted_at,
                   h.name AS home_name, h.logo_url AS home_logo_url,
                   h.founded_year AS home_founded_year, h.address AS home_address,
                   h.city AS home_city, h.created_at AS home_created_at,
                   h.updated_at AS home_updated_at, h.deleted_at AS home_deleted_at,
                   a.name AS away_name, a.logo_url AS away_logo_url,
                   a.founded_year AS away_founded_year, a.address AS away_address,
                   a.city AS away_city, a.created_at AS away_created_at,
                   a.updated_at AS away_updated_at, a.deleted_at AS away_deleted_at
            FROM matches m
            INNER JOIN teams h ON h.team_id = m.home_team_id
            INNER JOIN teams a ON a.team_id = m.away_team_id
            WHERE m.deleted_at IS NULL
            "#,
        );
        builder.push(order_by(query, "m.created_at", "m.match_id"));
        builder.push(" LIMIT ");
        builder.push_bind(i64::from(query.limit));
        builder.push(" OFFSET ");
        builder.push_bind(sql_offset(query.offset));

        let rows = builder
            .build_query_as::<MatchTeamsRow>()
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(MatchWithTeams::from).collect())
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM matches WHERE deleted_at IS NULL",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Create a scheduled match with a 0-0 score
    pub async fn create(&self, schedule: &MatchSchedule) -> Result<Match> {
        let fixture = sqlx::query_as::<_, Match>(
            r#"
            INSERT INTO matches (home_team_id, away_team_id, match_date, match_time, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING match_id, home_team_id, away_team_id, match_date, match_time,
                      home_score, away_score, status, created_at, updated_at, deleted_at
            "#,
        )
        .bind(schedule.home_team_id)
        .bind(schedule.away_team_id)
        .bind(&schedule.match_date)
        .bind(&schedule.match_time)
        .bind(MatchStatus::Scheduled)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_foreign_key(e, "Team does not exist"))?;

        Ok(fixture)
    }

    /// Rewrite the schedule of a match that has not been completed
    pub async fn update_schedule(&self, id: Uuid, schedule: &MatchSchedule) -> Result<Match> {
        let mut tx = self.pool.begin().await?;

        let status = lock_status(&mut tx, id).await?;
        if status != MatchStatus::Scheduled {
            return Err(StorageError::StatusConflict(status));
        }

        let fixture = sqlx::query_as::<_, Match>(
            r#"
            UPDATE matches
            SET home_team_id = $2,
                away_team_id = $3,
                match_date = $4,
                match_time = $5,
                updated_at = NOW()
            WHERE match_id = $1
            RETURNING match_id, home_team_id, away_team_id, match_date, match_time,
                      home_score, away_score, status, created_at, updated_at, deleted_at
            "#,
        )
        .bind(id)
        .bind(schedule.home_team_id)
        .bind(schedule.away_team_id)
        .bind(&schedule.match_date)
        .bind(&schedule.match_time)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_foreign_key(e, "Team does not exist"))?;

        tx.commit().await?;

        Ok(fixture)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query(
            "UPDATE matches SET deleted_at = NOW() WHERE match_id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Replace the goals of a match and record its final score.
    ///
    /// Runs in one transaction holding the match row lock, so concurrent
    /// result writes to the same match are serialised and a failure leaves
    /// the previous goals untouched.
    pub async fn commit_result(
        &self,
        id: Uuid,
        expected: MatchStatus,
        goals: &[NewGoal],
        home_score: i32,
        away_score: i32,
    ) -> Result<Match> {
        let mut tx = self.pool.begin().await?;

        let status = lock_status(&mut tx, id).await?;
        if status != expected {
            return Err(StorageError::StatusConflict(status));
        }

        let removed = GoalRepository::delete_by_match_id(&mut tx, id).await?;
        GoalRepository::create_batch(&mut tx, id, goals).await?;

        let fixture = sqlx::query_as::<_, Match>(
            r#"
            UPDATE matches
            SET home_score = $2,
                away_score = $3,
                status = $4,
                updated_at = NOW()
            WHERE match_id = $1
            RETURNING match_id, home_team_id, away_team_id, match_date, match_time,
                      home_score, away_score, status, created_at, updated_at, deleted_at
            "#,
        )
        .bind(id)
        .bind(home_score)
        .bind(away_score)
        .bind(MatchStatus::Completed)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(
            match_id = %id,
            removed_goals = removed,
            inserted_goals = goals.len(),
            "Match result committed"
        );

        Ok(fixture)
    }

    pub async fn count_completed(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM matches WHERE status = $1 AND deleted_at IS NULL",
        )
        .bind(MatchStatus::Completed)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Completed matches with their teams, latest scheduled first
    pub async fn find_completed(&self, offset: u64, limit: u32) -> Result<Vec<MatchWithTeams>> {
        let rows = sqlx::query_as::<_, MatchTeamsRow>(
            r#"
            SELECT m.match_id, m.home_team_id, m.away_team_id, m.match_date, m.match_time,
                   m.home_score, m.away_score, m.status, m.created_at, m.updated_at, m.deleted_at,
                   h.name AS home_name, h.logo_url AS home_logo_url,
                   h.founded_year AS home_founded_year, h.address AS home_address,
                   h.city AS home_city, h.created_at AS home_created_at,
                   h.updated_at AS home_updated_at, h.deleted_at AS home_deleted_at,
                   a.name AS away_name, a.logo_url AS away_logo_url,
                   a.founded_year AS away_founded_year, a.address AS away_address,
                   a.city AS away_city, a.created_at AS away_created_at,
                   a.updated_at AS away_updated_at, a.deleted_at AS away_deleted_at
            FROM matches m
            INNER JOIN teams h ON h.team_id = m.home_team_id
            INNER JOIN teams a ON a.team_id = m.away_team_id
            WHERE m.status = $1 AND m.deleted_at IS NULL
            ORDER BY m.match_date DESC, m.match_time DESC, m.created_at DESC, m.match_id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(MatchStatus::Completed)
        .bind(i64::from(limit))
        .bind(sql_offset(offset))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(MatchWithTeams::from).collect())
    }

    /// Count completed matches won by a team on either side
    pub async fn count_wins(&self, team_id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM matches
            WHERE status = $1
              AND deleted_at IS NULL
              AND ((home_team_id = $2 AND home_score > away_score)
                OR (away_team_id = $2 AND away_score > home_score))
            "#,
        )
        .bind(MatchStatus::Completed)
        .bind(team_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }
}

/// Lock an active match row for the rest of the transaction and read its status
async fn lock_status(conn: &mut sqlx::PgConnection, id: Uuid) -> Result<MatchStatus> {
    sqlx::query_scalar::<_, MatchStatus>(
        "SELECT status FROM matches WHERE match_id = $1 AND deleted_at IS NULL FOR UPDATE",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?
    .ok_or(StorageError::NotFound)
}
