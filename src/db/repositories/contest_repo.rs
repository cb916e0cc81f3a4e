//! Contest repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Contest, NewContest},
};

/// Repository for contest database operations
pub struct ContestRepository;

impl ContestRepository {
    /// Create a new contest
    pub async fn create(pool: &PgPool, contest: &NewContest) -> AppResult<Contest> {
        let contest = sqlx::query_as::<_, Contest>(
            r#"
            INSERT INTO contests (
                external_id, test_system, api_key, api_secret,
                colors_layout, teams_layout, admin_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(contest.external_id)
        .bind(contest.test_system.code())
        .bind(&contest.api_key)
        .bind(&contest.api_secret)
        .bind(&contest.colors_layout)
        .bind(&contest.teams_layout)
        .bind(contest.admin_id)
        .fetch_one(pool)
        .await?;

        Ok(contest)
    }

    /// Find contest by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Contest>> {
        let contest = sqlx::query_as::<_, Contest>(r#"SELECT * FROM contests WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(contest)
    }

    /// List every contest, oldest first
    pub async fn list(pool: &PgPool) -> AppResult<Vec<Contest>> {
        let contests =
            sqlx::query_as::<_, Contest>(r#"SELECT * FROM contests ORDER BY created_at, id"#)
                .fetch_all(pool)
                .await?;

        Ok(contests)
    }

    /// Replace both layouts
    pub async fn update_layouts(
        pool: &PgPool,
        id: &Uuid,
        colors_layout: &str,
        teams_layout: &str,
    ) -> AppResult<Contest> {
        let contest = sqlx::query_as::<_, Contest>(
            r#"
            UPDATE contests
            SET colors_layout = $2, teams_layout = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(colors_layout)
        .bind(teams_layout)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Contest {id} not found")))?;

        Ok(contest)
    }

    /// Delete contest, refusing while it still owns submissions
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        let has_submissions: bool = sqlx::query_scalar(
            r#"SELECT EXISTS(SELECT 1 FROM submissions WHERE contest_id = $1)"#,
        )
        .bind(id)
        .fetch_one(pool)
        .await?;

        if has_submissions {
            return Err(AppError::Conflict(format!(
                "Contest {id} still has submissions"
            )));
        }

        let result = sqlx::query(r#"DELETE FROM contests WHERE id = $1"#)
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Contest {id} not found")));
        }

        Ok(())
    }
}
