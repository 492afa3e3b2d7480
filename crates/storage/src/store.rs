use std::sync::Arc;

use tracing::{debug, warn};

use booster_core::model::{Progress, ProgressPatch};

use crate::repository::ProgressRepository;

/// Facade over the primary and secondary stores, owning the persistence
/// contract for the progress aggregate.
///
/// Loading prefers the primary store; the secondary is consulted only when
/// the primary errors, never both. Saving targets the primary and falls back
/// to the secondary on failure. Routine save failures are swallowed (logged
/// only): a save always follows a committed in-memory change, so the caller
/// has nothing useful to do with the error.
#[derive(Clone)]
pub struct ProgressStore {
    primary: Arc<dyn ProgressRepository>,
    secondary: Option<Arc<dyn ProgressRepository>>,
}

impl ProgressStore {
    #[must_use]
    pub fn new(
        primary: Arc<dyn ProgressRepository>,
        secondary: Option<Arc<dyn ProgressRepository>>,
    ) -> Self {
        Self { primary, secondary }
    }

    /// Loads the durable document, deep-merged into defaults.
    ///
    /// Total: a missing, unreadable, or malformed document yields defaults.
    pub async fn load(&self) -> Progress {
        let document = match self.primary.load_document().await {
            Ok(document) => document,
            Err(err) => {
                warn!(error = %err, "primary store unavailable, trying secondary");
                match &self.secondary {
                    Some(secondary) => secondary.load_document().await.unwrap_or_else(|err| {
                        warn!(error = %err, "secondary store unavailable");
                        None
                    }),
                    None => None,
                }
            }
        };

        let Some(json) = document else {
            return Progress::default();
        };

        match ProgressPatch::from_json(&json) {
            Ok(patch) => Progress::default().merged(patch),
            Err(err) => {
                warn!(error = %err, "stored progress document is malformed, starting fresh");
                Progress::default()
            }
        }
    }

    /// Persists the full aggregate, falling back to the secondary store.
    ///
    /// Never fails from the caller's perspective. Concurrent saves are
    /// allowed; the backing store's last observed write wins.
    pub async fn save(&self, progress: &Progress) {
        let json = match serde_json::to_string(progress) {
            Ok(json) => json,
            Err(err) => {
                warn!(error = %err, "progress document failed to serialize");
                return;
            }
        };

        if let Err(err) = self.primary.save_document(&json).await {
            warn!(error = %err, "primary save failed, falling back to secondary");
            match &self.secondary {
                Some(secondary) => {
                    if let Err(err) = secondary.save_document(&json).await {
                        warn!(error = %err, "secondary save failed, progress not persisted");
                    }
                }
                None => warn!("no secondary store configured, progress not persisted"),
            }
        } else {
            debug!("progress saved");
        }
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryRepository, StorageError};
    use async_trait::async_trait;
    use booster_core::model::{ItemId, ItemStat};

    /// A repository that always fails, for exercising the fallback path.
    struct BrokenRepository;

    #[async_trait]
    impl ProgressRepository for BrokenRepository {
        async fn load_document(&self) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("broken".into()))
        }

        async fn save_document(&self, _json: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("broken".into()))
        }
    }

    fn progress_with_stat() -> Progress {
        Progress::default().with_question_result(
            ItemId::new(1),
            ItemStat {
                attempts: 1,
                correct: 1,
                mastery: 0.264,
                ..ItemStat::default()
            },
            None,
        )
    }

    #[tokio::test]
    async fn load_from_empty_store_yields_defaults() {
        let store = ProgressStore::new(Arc::new(InMemoryRepository::new()), None);
        assert_eq!(store.load().await, Progress::default());
    }

    #[tokio::test]
    async fn save_then_load_round_trips_through_primary() {
        let primary = Arc::new(InMemoryRepository::new());
        let store = ProgressStore::new(primary.clone(), None);

        let progress = progress_with_stat();
        store.save(&progress).await;
        assert!(primary.snapshot().is_some());
        assert_eq!(store.load().await, progress);
    }

    #[tokio::test]
    async fn broken_primary_falls_back_to_secondary_for_saves() {
        let secondary = Arc::new(InMemoryRepository::new());
        let store = ProgressStore::new(Arc::new(BrokenRepository), Some(secondary.clone()));

        let progress = progress_with_stat();
        store.save(&progress).await;
        assert!(secondary.snapshot().is_some());
        assert_eq!(store.load().await, progress);
    }

    #[tokio::test]
    async fn healthy_primary_never_consults_secondary() {
        let primary = Arc::new(InMemoryRepository::new());
        let secondary = Arc::new(InMemoryRepository::new());
        secondary
            .save_document(r#"{"settings":{"dailyQuizGoal":99}}"#)
            .await
            .unwrap();

        let store = ProgressStore::new(primary, Some(secondary));
        // Primary is readable but empty: defaults, not the secondary's data.
        let loaded = store.load().await;
        assert_eq!(loaded.settings.daily_quiz_goal, 12);
    }

    #[tokio::test]
    async fn total_failure_is_swallowed() {
        let store = ProgressStore::new(Arc::new(BrokenRepository), Some(Arc::new(BrokenRepository)));
        store.save(&progress_with_stat()).await;
        assert_eq!(store.load().await, Progress::default());
    }

    #[tokio::test]
    async fn malformed_stored_document_loads_as_defaults() {
        let primary = Arc::new(InMemoryRepository::new());
        primary.save_document("{definitely not json").await.unwrap();

        let store = ProgressStore::new(primary, None);
        assert_eq!(store.load().await, Progress::default());
    }
}
