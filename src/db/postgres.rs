//! PostgreSQL store

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repositories::{
    ContestRepository, OrderRepository, SubmissionRepository, VolunteerRepository,
};
use super::Store;
use crate::error::AppResult;
use crate::models::{
    Contest, NewContest, NewOrder, Order, Submission, SubmissionUpsert, Volunteer, VolunteerLoad,
};

/// Store backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list_contests(&self) -> AppResult<Vec<Contest>> {
        ContestRepository::list(&self.pool).await
    }

    async fn find_contest(&self, id: &Uuid) -> AppResult<Option<Contest>> {
        ContestRepository::find_by_id(&self.pool, id).await
    }

    async fn create_contest(&self, contest: &NewContest) -> AppResult<Contest> {
        ContestRepository::create(&self.pool, contest).await
    }

    async fn update_contest_layouts(
        &self,
        id: &Uuid,
        colors_layout: &str,
        teams_layout: &str,
    ) -> AppResult<Contest> {
        ContestRepository::update_layouts(&self.pool, id, colors_layout, teams_layout).await
    }

    async fn delete_contest(&self, id: &Uuid) -> AppResult<()> {
        ContestRepository::delete(&self.pool, id).await
    }

    async fn find_submission(
        &self,
        contest_id: &Uuid,
        external_id: i64,
    ) -> AppResult<Option<Submission>> {
        SubmissionRepository::find_by_external_id(&self.pool, contest_id, external_id).await
    }

    async fn upsert_submission(&self, fields: &SubmissionUpsert) -> AppResult<Submission> {
        SubmissionRepository::upsert(&self.pool, fields).await
    }

    async fn accepted_submissions(&self, contest_id: &Uuid) -> AppResult<Vec<Submission>> {
        SubmissionRepository::list_accepted(&self.pool, contest_id).await
    }

    async fn delete_submission(&self, id: &Uuid) -> AppResult<()> {
        SubmissionRepository::delete(&self.pool, id).await
    }

    async fn order_exists_for(
        &self,
        contest_id: &Uuid,
        author: &str,
        problem_index: &str,
    ) -> AppResult<bool> {
        OrderRepository::exists_for_author_problem(&self.pool, contest_id, author, problem_index)
            .await
    }

    async fn create_order(&self, order: &NewOrder) -> AppResult<Order> {
        OrderRepository::create(&self.pool, order).await
    }

    async fn find_order(&self, id: &Uuid) -> AppResult<Option<Order>> {
        OrderRepository::find_by_id(&self.pool, id).await
    }

    async fn mark_order_done(&self, id: &Uuid) -> AppResult<Order> {
        OrderRepository::mark_done(&self.pool, id).await
    }

    async fn orders_for_volunteer(&self, volunteer_id: &Uuid) -> AppResult<Vec<Order>> {
        OrderRepository::list_by_volunteer(&self.pool, volunteer_id).await
    }

    async fn list_orders(&self) -> AppResult<Vec<Order>> {
        OrderRepository::list(&self.pool).await
    }

    async fn create_volunteer(&self, username: &str, rooms_layout: &str) -> AppResult<Volunteer> {
        VolunteerRepository::create(&self.pool, username, rooms_layout).await
    }

    async fn volunteer_loads(&self) -> AppResult<Vec<VolunteerLoad>> {
        VolunteerRepository::list_with_open_orders(&self.pool).await
    }
}
