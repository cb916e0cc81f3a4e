//! Submission synchronization
//!
//! Reconciles a judge's submission feed into the local cache. Records are
//! keyed by `(contest, external id)`; every fetched record overwrites its
//! cached fields, so repeated syncs of the same feed converge to the same
//! state. Submissions that disappear upstream are left untouched.

use crate::{
    clients::{ContestClient, RawSubmission},
    db::Store,
    error::AppResult,
    models::{Contest, SubmissionUpsert, Verdict},
};

/// Outcome of one sync
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub fetched: usize,
    pub created: usize,
    pub updated: usize,
}

/// Submission sync service
pub struct SubmissionSyncService;

impl SubmissionSyncService {
    /// Fetch every submission of the contest and upsert it into the store
    pub async fn sync(
        store: &dyn Store,
        contest: &Contest,
        client: &dyn ContestClient,
    ) -> AppResult<SyncStats> {
        let remote = client.fetch_all_submissions().await?;
        let mut stats = SyncStats {
            fetched: remote.len(),
            ..SyncStats::default()
        };

        for raw in remote {
            let fields = Self::to_upsert(contest, raw);

            match store.find_submission(&contest.id, fields.external_id).await? {
                Some(existing) if existing.verdict != fields.verdict => {
                    tracing::debug!(
                        contest = %contest.id,
                        external_id = fields.external_id,
                        from = %existing.verdict,
                        to = %fields.verdict,
                        "Submission verdict changed"
                    );
                    stats.updated += 1;
                }
                Some(_) => stats.updated += 1,
                None => stats.created += 1,
            }

            store.upsert_submission(&fields).await?;
        }

        tracing::info!(
            contest = %contest.id,
            label = %contest.label(),
            fetched = stats.fetched,
            created = stats.created,
            updated = stats.updated,
            "Submissions synchronized"
        );

        Ok(stats)
    }

    fn to_upsert(contest: &Contest, raw: RawSubmission) -> SubmissionUpsert {
        SubmissionUpsert {
            contest_id: contest.id,
            external_id: raw.external_id,
            problem_index: raw.problem_index,
            author: raw.author,
            time_from_start: raw.time_from_start.max(0),
            verdict: Verdict::from_judge(&raw.verdict),
        }
    }
}
