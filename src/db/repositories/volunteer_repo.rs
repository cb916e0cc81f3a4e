//! Volunteer repository

use sqlx::PgPool;

use crate::{
    error::AppResult,
    models::{Volunteer, VolunteerLoad},
};

/// Repository for volunteer database operations
pub struct VolunteerRepository;

impl VolunteerRepository {
    /// Create a new volunteer
    pub async fn create(pool: &PgPool, username: &str, rooms_layout: &str) -> AppResult<Volunteer> {
        let volunteer = sqlx::query_as::<_, Volunteer>(
            r#"
            INSERT INTO volunteers (username, rooms_layout)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(rooms_layout)
        .fetch_one(pool)
        .await?;

        Ok(volunteer)
    }

    /// Every volunteer with the number of orders not yet delivered
    pub async fn list_with_open_orders(pool: &PgPool) -> AppResult<Vec<VolunteerLoad>> {
        let loads = sqlx::query_as::<_, VolunteerLoad>(
            r#"
            SELECT
                v.id, v.username, v.rooms_layout, v.created_at,
                COUNT(o.id) FILTER (WHERE NOT o.done) AS open_orders
            FROM volunteers v
            LEFT JOIN orders o ON o.volunteer_id = v.id
            GROUP BY v.id
            ORDER BY v.created_at, v.id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(loads)
    }
}
