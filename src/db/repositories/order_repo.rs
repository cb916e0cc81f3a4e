//! Order repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{NewOrder, Order},
};

/// Repository for order database operations
pub struct OrderRepository;

impl OrderRepository {
    /// Create a new order
    pub async fn create(pool: &PgPool, order: &NewOrder) -> AppResult<Order> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (
                submission_id, balloon_color, room, place, author_name, volunteer_id
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(order.submission_id)
        .bind(&order.balloon_color)
        .bind(&order.room)
        .bind(&order.place)
        .bind(&order.author_name)
        .bind(order.volunteer_id)
        .fetch_one(pool)
        .await?;

        Ok(order)
    }

    /// Find order by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(r#"SELECT * FROM orders WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(order)
    }

    /// Check whether the author already got a balloon for the problem
    pub async fn exists_for_author_problem(
        pool: &PgPool,
        contest_id: &Uuid,
        author: &str,
        problem_index: &str,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM orders o
                JOIN submissions s ON s.id = o.submission_id
                WHERE s.contest_id = $1 AND s.author = $2 AND s.problem_index = $3
            )
            "#,
        )
        .bind(contest_id)
        .bind(author)
        .bind(problem_index)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Close the order
    pub async fn mark_done(pool: &PgPool, id: &Uuid) -> AppResult<Order> {
        let order = sqlx::query_as::<_, Order>(
            r#"UPDATE orders SET done = TRUE WHERE id = $1 RETURNING *"#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {id} not found")))?;

        Ok(order)
    }

    /// Orders assigned to a volunteer, newest first
    pub async fn list_by_volunteer(pool: &PgPool, volunteer_id: &Uuid) -> AppResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"SELECT * FROM orders WHERE volunteer_id = $1 ORDER BY created_at DESC"#,
        )
        .bind(volunteer_id)
        .fetch_all(pool)
        .await?;

        Ok(orders)
    }

    /// Every order, oldest first
    pub async fn list(pool: &PgPool) -> AppResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(r#"SELECT * FROM orders ORDER BY created_at"#)
            .fetch_all(pool)
            .await?;

        Ok(orders)
    }
}
