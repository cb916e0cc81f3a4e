//! Submission repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Submission, SubmissionUpsert, Verdict},
};

/// Repository for submission database operations
pub struct SubmissionRepository;

impl SubmissionRepository {
    /// Find submission by its judge identifier within a contest
    pub async fn find_by_external_id(
        pool: &PgPool,
        contest_id: &Uuid,
        external_id: i64,
    ) -> AppResult<Option<Submission>> {
        let submission = sqlx::query_as::<_, Submission>(
            r#"SELECT * FROM submissions WHERE contest_id = $1 AND external_id = $2"#,
        )
        .bind(contest_id)
        .bind(external_id)
        .fetch_optional(pool)
        .await?;

        Ok(submission)
    }

    /// Insert or overwrite by `(contest_id, external_id)`
    pub async fn upsert(pool: &PgPool, fields: &SubmissionUpsert) -> AppResult<Submission> {
        let submission = sqlx::query_as::<_, Submission>(
            r#"
            INSERT INTO submissions (
                contest_id, external_id, problem_index, author, time_from_start, verdict
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (contest_id, external_id) DO UPDATE
            SET
                problem_index = EXCLUDED.problem_index,
                author = EXCLUDED.author,
                time_from_start = EXCLUDED.time_from_start,
                verdict = EXCLUDED.verdict
            RETURNING *
            "#,
        )
        .bind(fields.contest_id)
        .bind(fields.external_id)
        .bind(&fields.problem_index)
        .bind(&fields.author)
        .bind(fields.time_from_start)
        .bind(fields.verdict)
        .fetch_one(pool)
        .await?;

        Ok(submission)
    }

    /// OK submissions of a contest, earliest first
    pub async fn list_accepted(pool: &PgPool, contest_id: &Uuid) -> AppResult<Vec<Submission>> {
        let submissions = sqlx::query_as::<_, Submission>(
            r#"
            SELECT * FROM submissions
            WHERE contest_id = $1 AND verdict = $2
            ORDER BY time_from_start, external_id
            "#,
        )
        .bind(contest_id)
        .bind(Verdict::Ok)
        .fetch_all(pool)
        .await?;

        Ok(submissions)
    }

    /// Delete submission, refusing once it has an order
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        let has_order: bool =
            sqlx::query_scalar(r#"SELECT EXISTS(SELECT 1 FROM orders WHERE submission_id = $1)"#)
                .bind(id)
                .fetch_one(pool)
                .await?;

        if has_order {
            return Err(AppError::Conflict(format!(
                "Submission {id} already has an order"
            )));
        }

        let result = sqlx::query(r#"DELETE FROM submissions WHERE id = $1"#)
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Submission {id} not found")));
        }

        Ok(())
    }
}
