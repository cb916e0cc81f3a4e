//! In-process store
//!
//! Same semantics as the PostgreSQL store, kept behind a single lock.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::Store;
use crate::error::{AppError, AppResult};
use crate::models::{
    Contest, NewContest, NewOrder, Order, Submission, SubmissionUpsert, Verdict, Volunteer,
    VolunteerLoad,
};

#[derive(Debug, Default)]
struct MemoryState {
    volunteers: Vec<Volunteer>,
    contests: Vec<Contest>,
    submissions: Vec<Submission>,
    orders: Vec<Order>,
}

/// Store backed by process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a contest row as-is, bypassing validation (imports, fixtures)
    pub async fn insert_contest(&self, contest: Contest) {
        self.state.write().await.contests.push(contest);
    }
}

fn contest_not_found(id: &Uuid) -> AppError {
    AppError::NotFound(format!("Contest {id} not found"))
}

fn order_not_found(id: &Uuid) -> AppError {
    AppError::NotFound(format!("Order {id} not found"))
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_contests(&self) -> AppResult<Vec<Contest>> {
        let state = self.state.read().await;
        let mut contests = state.contests.clone();
        contests.sort_by_key(|c| c.created_at);
        Ok(contests)
    }

    async fn find_contest(&self, id: &Uuid) -> AppResult<Option<Contest>> {
        let state = self.state.read().await;
        Ok(state.contests.iter().find(|c| c.id == *id).cloned())
    }

    async fn create_contest(&self, contest: &NewContest) -> AppResult<Contest> {
        let mut state = self.state.write().await;
        if !state.volunteers.iter().any(|v| v.id == contest.admin_id) {
            return Err(AppError::NotFound(format!(
                "Volunteer {} not found",
                contest.admin_id
            )));
        }

        let created = Contest {
            id: Uuid::new_v4(),
            external_id: contest.external_id,
            test_system: contest.test_system.code(),
            api_key: contest.api_key.clone(),
            api_secret: contest.api_secret.clone(),
            colors_layout: contest.colors_layout.clone(),
            teams_layout: contest.teams_layout.clone(),
            admin_id: contest.admin_id,
            created_at: Utc::now(),
        };
        state.contests.push(created.clone());
        Ok(created)
    }

    async fn update_contest_layouts(
        &self,
        id: &Uuid,
        colors_layout: &str,
        teams_layout: &str,
    ) -> AppResult<Contest> {
        let mut state = self.state.write().await;
        let contest = state
            .contests
            .iter_mut()
            .find(|c| c.id == *id)
            .ok_or_else(|| contest_not_found(id))?;

        contest.colors_layout = colors_layout.to_string();
        contest.teams_layout = teams_layout.to_string();
        Ok(contest.clone())
    }

    async fn delete_contest(&self, id: &Uuid) -> AppResult<()> {
        let mut state = self.state.write().await;
        if !state.contests.iter().any(|c| c.id == *id) {
            return Err(contest_not_found(id));
        }
        if state.submissions.iter().any(|s| s.contest_id == *id) {
            return Err(AppError::Conflict(format!(
                "Contest {id} still has submissions"
            )));
        }

        state.contests.retain(|c| c.id != *id);
        Ok(())
    }

    async fn find_submission(
        &self,
        contest_id: &Uuid,
        external_id: i64,
    ) -> AppResult<Option<Submission>> {
        let state = self.state.read().await;
        Ok(state
            .submissions
            .iter()
            .find(|s| s.contest_id == *contest_id && s.external_id == external_id)
            .cloned())
    }

    async fn upsert_submission(&self, fields: &SubmissionUpsert) -> AppResult<Submission> {
        let mut state = self.state.write().await;
        if !state.contests.iter().any(|c| c.id == fields.contest_id) {
            return Err(contest_not_found(&fields.contest_id));
        }

        let existing = state
            .submissions
            .iter_mut()
            .find(|s| s.contest_id == fields.contest_id && s.external_id == fields.external_id);

        let saved = match existing {
            Some(submission) => {
                submission.problem_index = fields.problem_index.clone();
                submission.author = fields.author.clone();
                submission.time_from_start = fields.time_from_start;
                submission.verdict = fields.verdict;
                submission.clone()
            }
            None => {
                let submission = Submission {
                    id: Uuid::new_v4(),
                    contest_id: fields.contest_id,
                    external_id: fields.external_id,
                    problem_index: fields.problem_index.clone(),
                    author: fields.author.clone(),
                    time_from_start: fields.time_from_start,
                    verdict: fields.verdict,
                };
                state.submissions.push(submission.clone());
                submission
            }
        };

        Ok(saved)
    }

    async fn accepted_submissions(&self, contest_id: &Uuid) -> AppResult<Vec<Submission>> {
        let state = self.state.read().await;
        let mut accepted: Vec<Submission> = state
            .submissions
            .iter()
            .filter(|s| s.contest_id == *contest_id && s.verdict == Verdict::Ok)
            .cloned()
            .collect();
        accepted.sort_by_key(|s| (s.time_from_start, s.external_id));
        Ok(accepted)
    }

    async fn delete_submission(&self, id: &Uuid) -> AppResult<()> {
        let mut state = self.state.write().await;
        if !state.submissions.iter().any(|s| s.id == *id) {
            return Err(AppError::NotFound(format!("Submission {id} not found")));
        }
        if state.orders.iter().any(|o| o.submission_id == *id) {
            return Err(AppError::Conflict(format!(
                "Submission {id} already has an order"
            )));
        }

        state.submissions.retain(|s| s.id != *id);
        Ok(())
    }

    async fn order_exists_for(
        &self,
        contest_id: &Uuid,
        author: &str,
        problem_index: &str,
    ) -> AppResult<bool> {
        let state = self.state.read().await;
        Ok(state.orders.iter().any(|order| {
            state.submissions.iter().any(|s| {
                s.id == order.submission_id
                    && s.contest_id == *contest_id
                    && s.author == author
                    && s.problem_index == problem_index
            })
        }))
    }

    async fn create_order(&self, order: &NewOrder) -> AppResult<Order> {
        let mut state = self.state.write().await;
        if !state.submissions.iter().any(|s| s.id == order.submission_id) {
            return Err(AppError::NotFound(format!(
                "Submission {} not found",
                order.submission_id
            )));
        }
        if !state.volunteers.iter().any(|v| v.id == order.volunteer_id) {
            return Err(AppError::NotFound(format!(
                "Volunteer {} not found",
                order.volunteer_id
            )));
        }
        if state.orders.iter().any(|o| o.submission_id == order.submission_id) {
            return Err(AppError::Conflict("Resource already exists".to_string()));
        }

        let created = Order {
            id: Uuid::new_v4(),
            submission_id: order.submission_id,
            balloon_color: order.balloon_color.clone(),
            room: order.room.clone(),
            place: order.place.clone(),
            author_name: order.author_name.clone(),
            volunteer_id: order.volunteer_id,
            done: false,
            created_at: Utc::now(),
        };
        state.orders.push(created.clone());
        Ok(created)
    }

    async fn find_order(&self, id: &Uuid) -> AppResult<Option<Order>> {
        let state = self.state.read().await;
        Ok(state.orders.iter().find(|o| o.id == *id).cloned())
    }

    async fn mark_order_done(&self, id: &Uuid) -> AppResult<Order> {
        let mut state = self.state.write().await;
        let order = state
            .orders
            .iter_mut()
            .find(|o| o.id == *id)
            .ok_or_else(|| order_not_found(id))?;

        order.done = true;
        Ok(order.clone())
    }

    async fn orders_for_volunteer(&self, volunteer_id: &Uuid) -> AppResult<Vec<Order>> {
        let state = self.state.read().await;
        Ok(state
            .orders
            .iter()
            .filter(|o| o.volunteer_id == *volunteer_id)
            .cloned()
            .collect())
    }

    async fn list_orders(&self) -> AppResult<Vec<Order>> {
        let state = self.state.read().await;
        Ok(state.orders.clone())
    }

    async fn create_volunteer(&self, username: &str, rooms_layout: &str) -> AppResult<Volunteer> {
        let mut state = self.state.write().await;
        if state.volunteers.iter().any(|v| v.username == username) {
            return Err(AppError::Conflict("Resource already exists".to_string()));
        }

        let volunteer = Volunteer {
            id: Uuid::new_v4(),
            username: username.to_string(),
            rooms_layout: rooms_layout.to_string(),
            created_at: Utc::now(),
        };
        state.volunteers.push(volunteer.clone());
        Ok(volunteer)
    }

    async fn volunteer_loads(&self) -> AppResult<Vec<VolunteerLoad>> {
        let state = self.state.read().await;
        Ok(state
            .volunteers
            .iter()
            .map(|volunteer| VolunteerLoad {
                volunteer: volunteer.clone(),
                open_orders: state
                    .orders
                    .iter()
                    .filter(|o| o.volunteer_id == volunteer.id && !o.done)
                    .count() as i64,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TestSystem;

    async fn seeded() -> (MemoryStore, Contest) {
        let store = MemoryStore::new();
        let admin = store.create_volunteer("admin", "").await.unwrap();
        let contest = store
            .create_contest(&NewContest {
                external_id: 7,
                test_system: TestSystem::Codeforces,
                api_key: "key".to_string(),
                api_secret: "secret".to_string(),
                colors_layout: "A=red".to_string(),
                teams_layout: "alice:R:1:Alice".to_string(),
                admin_id: admin.id,
            })
            .await
            .unwrap();
        (store, contest)
    }

    fn fields(contest_id: Uuid, external_id: i64, verdict: Verdict) -> SubmissionUpsert {
        SubmissionUpsert {
            contest_id,
            external_id,
            problem_index: "A".to_string(),
            author: "alice".to_string(),
            time_from_start: 60,
            verdict,
        }
    }

    #[tokio::test]
    async fn test_upsert_keeps_one_record_per_key() {
        let (store, contest) = seeded().await;

        let first = store
            .upsert_submission(&fields(contest.id, 1, Verdict::Testing))
            .await
            .unwrap();
        let second = store
            .upsert_submission(&fields(contest.id, 1, Verdict::Ok))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.verdict, Verdict::Ok);
        assert_eq!(store.accepted_submissions(&contest.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_protected_deletes() {
        let (store, contest) = seeded().await;
        let submission = store
            .upsert_submission(&fields(contest.id, 1, Verdict::Ok))
            .await
            .unwrap();
        store
            .create_order(&NewOrder {
                submission_id: submission.id,
                volunteer_id: contest.admin_id,
                ..NewOrder::default()
            })
            .await
            .unwrap();

        assert!(matches!(
            store.delete_contest(&contest.id).await,
            Err(AppError::Conflict(_))
        ));
        assert!(matches!(
            store.delete_submission(&submission.id).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_empty_contest() {
        let (store, contest) = seeded().await;
        store.delete_contest(&contest.id).await.unwrap();
        assert!(store.find_contest(&contest.id).await.unwrap().is_none());
    }
}
