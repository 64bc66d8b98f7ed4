use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use super::{order_by, sql_offset};
use crate::dto::common::ListQuery;
use crate::dto::player::{CreatePlayerRequest, PlayerSort, UpdatePlayerRequest};
use crate::error::{Result, StorageError, map_foreign_key};
use crate::models::Player;

/// Repository for Player database operations
pub struct PlayerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PlayerRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a team's active players in the requested order
    pub async fn list_by_team(
        &self,
        team_id: Uuid,
        query: &ListQuery<PlayerSort>,
    ) -> Result<Vec<Player>> {
        let mut builder = QueryBuilder::new(
            r#"
            SELECT player_id, team_id, name, height, weight, position, jersey_number,
                   created_at, updated_at, deleted_at
            FROM players
            WHERE deleted_at IS NULL AND team_id = "#,
        );
        builder.push_bind(team_id);
        builder.push(" ");
        builder.push(order_by(query, "created_at", "player_id"));
        builder.push(" LIMIT ");
        builder.push_bind(i64::from(query.limit));
        builder.push(" OFFSET ");
        builder.push_bind(sql_offset(query.offset));

        let players = builder
            .build_query_as::<Player>()
            .fetch_all(self.pool)
            .await?;

        Ok(players)
    }

    pub async fn count_by_team(&self, team_id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM players WHERE team_id = $1 AND deleted_at IS NULL",
        )
        .bind(team_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Get an active player by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Player> {
        let player = sqlx::query_as::<_, Player>(
            r#"
            SELECT player_id, team_id, name, height, weight, position, jersey_number,
                   created_at, updated_at, deleted_at
            FROM players
            WHERE player_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(player)
    }

    pub async fn find_by_jersey(&self, team_id: Uuid, jersey_number: i32) -> Result<Option<Player>> {
        let player = sqlx::query_as::<_, Player>(
            r#"
            SELECT player_id, team_id, name, height, weight, position, jersey_number,
                   created_at, updated_at, deleted_at
            FROM players
            WHERE team_id = $1 AND jersey_number = $2 AND deleted_at IS NULL
            LIMIT 1
            "#,
        )
        .bind(team_id)
        .bind(jersey_number)
        .fetch_optional(self.pool)
        .await?;

        Ok(player)
    }

    pub async fn create(&self, team_id: Uuid, req: &CreatePlayerRequest) -> Result<Player> {
        let player = sqlx::query_as::<_, Player>(
            r#"
            INSERT INTO players (team_id, name, height, weight, position, jersey_number)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING player_id, team_id, name, height, weight, position, jersey_number,
                      created_at, updated_at, deleted_at
            "#,
        )
        .bind(team_id)
        .bind(&req.name)
        .bind(req.height)
        .bind(req.weight)
        .bind(req.position)
        .bind(req.jersey_number)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_foreign_key(e, "Team does not exist"))?;

        Ok(player)
    }

    /// Update an active player, keeping fields absent from the request
    pub async fn update(&self, id: Uuid, req: &UpdatePlayerRequest) -> Result<Player> {
        let existing = self.find_by_id(id).await?;

        let name = req.name.as_ref().unwrap_or(&existing.name);
        let height = req.height.or(existing.height);
        let weight = req.weight.or(existing.weight);
        let position = req.position.unwrap_or(existing.position);
        let jersey_number = req.jersey_number.unwrap_or(existing.jersey_number);

        let player = sqlx::query_as::<_, Player>(
            r#"
            UPDATE players
            SET name = $2,
                height = $3,
                weight = $4,
                position = $5,
                jersey_number = $6,
                updated_at = NOW()
            WHERE player_id = $1 AND deleted_at IS NULL
            RETURNING player_id, team_id, name, height, weight, position, jersey_number,
                      created_at, updated_at, deleted_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(height)
        .bind(weight)
        .bind(position)
        .bind(jersey_number)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(player)
    }

    /// Soft-delete a player; the jersey number becomes free for the team
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query(
            "UPDATE players SET deleted_at = NOW() WHERE player_id = $1 AND deleted_at IS NULL",
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
