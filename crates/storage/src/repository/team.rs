use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use super::{order_by, sql_offset};
use crate::dto::common::ListQuery;
use crate::dto::team::{CreateTeamRequest, TeamSort, UpdateTeamRequest};
use crate::error::{Result, StorageError};
use crate::models::Team;

/// Repository for Team database operations
pub struct TeamRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TeamRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List active teams in the requested order
    pub async fn list(&self, query: &ListQuery<TeamSort>) -> Result<Vec<Team>> {
        let mut builder = QueryBuilder::new(
            r#"
            SELECT team_id, name, logo_url, founded_year, address, city,
                   created_at, updated_at, deleted_at
            FROM teams
            WHERE deleted_at IS NULL
            "#,
        );
        builder.push(order_by(query, "created_at", "team_id"));
        builder.push(" LIMIT ");
        builder.push_bind(i64::from(query.limit));
        builder.push(" OFFSET ");
        builder.push_bind(sql_offset(query.offset));

        let teams = builder.build_query_as::<Team>().fetch_all(self.pool).await?;

        Ok(teams)
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM teams WHERE deleted_at IS NULL",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Get an active team by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Team> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            SELECT team_id, name, logo_url, founded_year, address, city,
                   created_at, updated_at, deleted_at
            FROM teams
            WHERE team_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(team)
    }

    /// Get a team by ID whether or not it has been deleted
    pub async fn find_any_by_id(&self, id: Uuid) -> Result<Team> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            SELECT team_id, name, logo_url, founded_year, address, city,
                   created_at, updated_at, deleted_at
            FROM teams
            WHERE team_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(team)
    }

    pub async fn create(&self, req: &CreateTeamRequest) -> Result<Team> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO teams (name, logo_url, founded_year, address, city)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING team_id, name, logo_url, founded_year, address, city,
                      created_at, updated_at, deleted_at
            "#,
        )
        .bind(&req.name)
        .bind(&req.logo_url)
        .bind(req.founded_year)
        .bind(&req.address)
        .bind(&req.city)
        .fetch_one(self.pool)
        .await?;

        Ok(team)
    }

    /// Update an active team, keeping fields absent from the request
    pub async fn update(&self, id: Uuid, req: &UpdateTeamRequest) -> Result<Team> {
        let existing = self.find_by_id(id).await?;

        let name = req.name.as_ref().unwrap_or(&existing.name);
        let logo_url = req.logo_url.as_ref().or(existing.logo_url.as_ref());
        let founded_year = req.founded_year.or(existing.founded_year);
        let address = req.address.as_ref().or(existing.address.as_ref());
        let city = req.city.as_ref().or(existing.city.as_ref());

        let team = sqlx::query_as::<_, Team>(
            r#"
            UPDATE teams
            SET name = $2,
                logo_url = $3,
                founded_year = $4,
                address = $5,
                city = $6,
                updated_at = NOW()
            WHERE team_id = $1 AND deleted_at IS NULL
            RETURNING team_id, name, logo_url, founded_year, address, city,
                      created_at, updated_at, deleted_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(logo_url)
        .bind(founded_year)
        .bind(address)
        .bind(city)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(team)
    }

    /// Soft-delete a team so historical matches keep resolving it
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query(
            "UPDATE teams SET deleted_at = NOW() WHERE team_id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
