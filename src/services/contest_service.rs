//! Contest service
//!
//! Administrative entry points. Layouts are validated here, at edit time,
//! so the processing pipeline only ever sees well-formed text.

use uuid::Uuid;

use crate::{
    db::Store,
    error::{AppError, AppResult},
    layout::{ColorLayout, TeamLayout},
    models::{Contest, NewContest},
};

/// Contest service for business logic
pub struct ContestService;

impl ContestService {
    /// Register a contest after validating both layouts
    pub async fn create_contest(store: &dyn Store, payload: NewContest) -> AppResult<Contest> {
        Self::validate_layouts(&payload.colors_layout, &payload.teams_layout)?;
        if payload.api_key.trim().is_empty() {
            return Err(AppError::Configuration("API key must not be empty".to_string()));
        }

        let contest = store.create_contest(&payload).await?;
        tracing::info!(contest = %contest.id, label = %contest.label(), "Contest registered");
        Ok(contest)
    }

    /// Replace both layouts after validating them
    pub async fn update_layouts(
        store: &dyn Store,
        id: &Uuid,
        colors_layout: &str,
        teams_layout: &str,
    ) -> AppResult<Contest> {
        Self::validate_layouts(colors_layout, teams_layout)?;
        store.update_contest_layouts(id, colors_layout, teams_layout).await
    }

    /// Delete a contest that has no cached submissions
    pub async fn delete_contest(store: &dyn Store, id: &Uuid) -> AppResult<()> {
        store.delete_contest(id).await
    }

    fn validate_layouts(colors_layout: &str, teams_layout: &str) -> AppResult<()> {
        ColorLayout::validate(colors_layout)?;
        TeamLayout::validate(teams_layout)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::layout::LayoutKind;
    use crate::models::TestSystem;

    async fn payload(store: &MemoryStore, colors: &str, teams: &str) -> NewContest {
        let admin = store.create_volunteer("admin", "").await.unwrap();
        NewContest {
            external_id: 1,
            test_system: TestSystem::Codeforces,
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            colors_layout: colors.to_string(),
            teams_layout: teams.to_string(),
            admin_id: admin.id,
        }
    }

    #[tokio::test]
    async fn test_rejects_malformed_layouts() {
        let store = MemoryStore::new();
        let bad_colors = payload(&store, "A=red\nB: blue", "alice:R:1:Alice").await;

        match ContestService::create_contest(&store, bad_colors).await {
            Err(AppError::Layout(err)) => {
                assert_eq!(err.kind, LayoutKind::Color);
                assert_eq!(err.line_number, 2);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(store.list_contests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_layouts_validates() {
        let store = MemoryStore::new();
        let contest = ContestService::create_contest(
            &store,
            payload(&store, "A=red", "alice:R:1:Alice").await,
        )
        .await
        .unwrap();

        let err = ContestService::update_layouts(&store, &contest.id, "A=red", "alice R 1")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Layout(ref e) if e.kind == LayoutKind::Team));

        let updated = ContestService::update_layouts(&store, &contest.id, "A=blue", "bob:S:2:Bob")
            .await
            .unwrap();
        assert_eq!(updated.colors_layout, "A=blue");
        assert_eq!(updated.teams_layout, "bob:S:2:Bob");
    }
}
