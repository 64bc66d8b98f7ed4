use sqlx::{FromRow, PgConnection, PgPool, QueryBuilder};
use uuid::Uuid;

use crate::error::{Result, map_foreign_key};
use crate::models::{Goal, GoalDetail, NewGoal};

#[derive(FromRow)]
struct GoalDetailRow {
    #[sqlx(flatten)]
    goal: Goal,
    player_name: String,
    team_name: String,
}

/// Repository for Goal database operations
pub struct GoalRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> GoalRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Goals of a match in minute order
    pub async fn find_by_match_id(&self, match_id: Uuid) -> Result<Vec<Goal>> {
        let goals = sqlx::query_as::<_, Goal>(
            r#"
            SELECT goal_id, match_id, player_id, team_id, minute, created_at
            FROM goals
            WHERE match_id = $1
            ORDER BY minute, batch_index
            "#,
        )
        .bind(match_id)
        .fetch_all(self.pool)
        .await?;

        Ok(goals)
    }

    /// Goals of a match in minute order with scorer and team names,
    /// including players and teams deleted since
    pub async fn find_details_by_match_id(&self, match_id: Uuid) -> Result<Vec<GoalDetail>> {
        let rows = sqlx::query_as::<_, GoalDetailRow>(
            r#"
            SELECT g.goal_id, g.match_id, g.player_id, g.team_id, g.minute, g.created_at,
                   p.name AS player_name,
                   t.name AS team_name
            FROM goals g
            INNER JOIN players p ON p.player_id = g.player_id
            INNER JOIN teams t ON t.team_id = g.team_id
            WHERE g.match_id = $1
            ORDER BY g.minute, g.batch_index
            "#,
        )
        .bind(match_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| GoalDetail {
                goal: row.goal,
                player_name: row.player_name,
                team_name: row.team_name,
            })
            .collect())
    }

    /// Remove every goal of a match inside an open transaction
    pub async fn delete_by_match_id(conn: &mut PgConnection, match_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM goals WHERE match_id = $1")
            .bind(match_id)
            .execute(conn)
            .await?;

        Ok(result.rows_affected())
    }

    /// Insert a batch of goals in one statement inside an open transaction
    pub async fn create_batch(
        conn: &mut PgConnection,
        match_id: Uuid,
        goals: &[NewGoal],
    ) -> Result<()> {
        if goals.is_empty() {
            return Ok(());
        }

        let mut query =
            QueryBuilder::new("INSERT INTO goals (match_id, player_id, team_id, minute, batch_index) ");
        query.push_values(goals.iter().enumerate(), |mut row, (index, goal)| {
            row.push_bind(match_id)
                .push_bind(goal.player_id)
                .push_bind(goal.team_id)
                .push_bind(goal.minute)
                .push_bind(index as i32);
        });

        query
            .build()
            .execute(conn)
            .await
            .map_err(|e| map_foreign_key(e, "Goal references an unknown player or team"))?;

        Ok(())
    }
}
