//! Contest processing
//!
//! One pass over one contest: sync submissions from its judge, then create
//! orders for accepted (author, problem) pairs that have none yet, earliest
//! submission first.

use crate::{
    clients::ContestClient,
    error::AppResult,
    models::Contest,
    services::{OrderAssignmentService, SubmissionSyncService, SyncStats},
    state::AppState,
};

/// Outcome of processing one contest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessStats {
    pub sync: SyncStats,
    pub orders_created: usize,
}

/// Sync-then-assign pipeline for a single contest
#[derive(Clone)]
pub struct ContestProcessor {
    state: AppState,
}

impl ContestProcessor {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Process a contest with the client matching its judging system
    pub async fn process(&self, contest: &Contest) -> AppResult<ProcessStats> {
        let client = self.state.clients().client_for(contest)?;
        self.process_with(contest, client.as_ref()).await
    }

    /// Process a contest with an explicit client
    pub async fn process_with(
        &self,
        contest: &Contest,
        client: &dyn ContestClient,
    ) -> AppResult<ProcessStats> {
        let store = self.state.store();
        let sync = SubmissionSyncService::sync(store, contest, client).await?;

        let mut orders_created = 0;
        for submission in store.accepted_submissions(&contest.id).await? {
            if store
                .order_exists_for(&contest.id, &submission.author, &submission.problem_index)
                .await?
            {
                continue;
            }

            OrderAssignmentService::assign(store, self.state.room_locks(), contest, &submission)
                .await?;
            orders_created += 1;
        }

        Ok(ProcessStats {
            sync,
            orders_created,
        })
    }
}
