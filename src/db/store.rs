//! Persistence boundary of the dispatcher

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{
    Contest, NewContest, NewOrder, Order, Submission, SubmissionUpsert, Volunteer, VolunteerLoad,
};

/// Every read and write the pipeline and its collaborators need.
///
/// Deletes are protected: a contest with submissions, or a submission with
/// an order, is refused with [`AppError::Conflict`](crate::error::AppError::Conflict).
#[async_trait]
pub trait Store: Send + Sync {
    // Contests

    async fn list_contests(&self) -> AppResult<Vec<Contest>>;

    async fn find_contest(&self, id: &Uuid) -> AppResult<Option<Contest>>;

    /// Persist a contest; layouts are expected to be validated by the caller
    async fn create_contest(&self, contest: &NewContest) -> AppResult<Contest>;

    async fn update_contest_layouts(
        &self,
        id: &Uuid,
        colors_layout: &str,
        teams_layout: &str,
    ) -> AppResult<Contest>;

    async fn delete_contest(&self, id: &Uuid) -> AppResult<()>;

    // Submissions

    async fn find_submission(
        &self,
        contest_id: &Uuid,
        external_id: i64,
    ) -> AppResult<Option<Submission>>;

    /// Insert or overwrite the submission keyed by `(contest_id, external_id)`
    async fn upsert_submission(&self, fields: &SubmissionUpsert) -> AppResult<Submission>;

    /// OK submissions of a contest, earliest first
    async fn accepted_submissions(&self, contest_id: &Uuid) -> AppResult<Vec<Submission>>;

    async fn delete_submission(&self, id: &Uuid) -> AppResult<()>;

    // Orders

    /// Whether any submission of `author` on `problem_index` in the contest already has an order
    async fn order_exists_for(
        &self,
        contest_id: &Uuid,
        author: &str,
        problem_index: &str,
    ) -> AppResult<bool>;

    async fn create_order(&self, order: &NewOrder) -> AppResult<Order>;

    async fn find_order(&self, id: &Uuid) -> AppResult<Option<Order>>;

    /// Set `done`; repeating it is a no-op
    async fn mark_order_done(&self, id: &Uuid) -> AppResult<Order>;

    async fn orders_for_volunteer(&self, volunteer_id: &Uuid) -> AppResult<Vec<Order>>;

    async fn list_orders(&self) -> AppResult<Vec<Order>>;

    // Volunteers

    async fn create_volunteer(&self, username: &str, rooms_layout: &str) -> AppResult<Volunteer>;

    /// All volunteers with their open order counts, in registration order
    async fn volunteer_loads(&self) -> AppResult<Vec<VolunteerLoad>>;
}
