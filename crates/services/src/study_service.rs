use std::sync::Arc;

use tracing::debug;

use booster_core::linker::linked_vocab_ids;
use booster_core::mastery::update_stat;
use booster_core::model::{
    ItemId, MistakeRecord, Progress, ProgressPatch, Question, SessionState, StudySettings,
    VocabCard,
};
use booster_core::scheduler::{BoostMap, DEFAULT_REVIEW_RATIO, build_topic_wrong_rate,
    build_weighted_queue};
use booster_core::time::Clock;
use storage::store::ProgressStore;

use crate::boosts::build_scheduler_boosts;
use crate::dataset::Dataset;
use crate::error::ImportError;

/// Owner of the in-memory progress aggregate and the mutation entry points
/// the presentation layer calls.
///
/// All mutations are synchronous copy-on-write replacements of the single
/// `Progress` value; each committed change fires an independent save task
/// with no queuing or ordering guarantee beyond the store's own. That is
/// sound because every save carries a snapshot that already supersedes the
/// previous one.
pub struct StudyService {
    clock: Clock,
    store: Arc<ProgressStore>,
    progress: Progress,
}

impl StudyService {
    /// Creates a service starting from default progress, not yet hydrated.
    #[must_use]
    pub fn new(store: Arc<ProgressStore>, clock: Clock) -> Self {
        Self {
            clock,
            store,
            progress: Progress::default(),
        }
    }

    /// Loads the persisted document and merges it into defaults.
    pub async fn hydrate(&mut self) {
        self.progress = self.store.load().await;
    }

    #[must_use]
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    //
    // ─── ANSWER RECORDING ──────────────────────────────────────────────────────
    //

    /// Records a question attempt.
    ///
    /// Updates the item's stat via the mastery tracker; a wrong answer also
    /// appends a mistake record carrying the vocabulary cards linked from
    /// the question and hint text.
    pub fn record_question_answer(
        &mut self,
        dataset: &Dataset,
        question: &Question,
        correct: bool,
        marked_for_review: bool,
    ) {
        let now = self.clock.now();
        let stat = update_stat(self.progress.question_stats.get(&question.id), correct, now)
            .with_marked_for_review(marked_for_review);

        let mistake = (!correct).then(|| MistakeRecord {
            item_id: question.id,
            occurred_at: now.timestamp_millis(),
            topic_id: question.topic_id,
            linked_item_ids: linked_vocab_ids(
                question,
                dataset.hint_for(question),
                &dataset.vocab_cards,
            ),
        });

        let next = self
            .progress
            .with_question_result(question.id, stat, mistake);
        self.commit(next);
    }

    /// Records a vocabulary card attempt.
    pub fn record_vocab_answer(&mut self, card: &VocabCard, correct: bool, marked_for_review: bool) {
        let stat = update_stat(self.progress.vocab_stats.get(&card.id), correct, self.clock.now())
            .with_marked_for_review(marked_for_review);
        let next = self.progress.with_vocab_result(card.id, stat);
        self.commit(next);
    }

    //
    // ─── SETTINGS, SESSION, LIFECYCLE ──────────────────────────────────────────
    //

    pub fn update_settings(&mut self, settings: StudySettings) {
        let next = self.progress.with_settings(settings);
        self.commit(next);
    }

    pub fn save_session_state(&mut self, session_state: SessionState) {
        let next = self.progress.with_session_state(session_state);
        self.commit(next);
    }

    /// Replaces the aggregate wholesale with defaults.
    pub fn reset(&mut self) {
        self.commit(Progress::default());
    }

    /// Merges an exported document into the current progress.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::InvalidPayload` for malformed JSON or a
    /// structurally invalid document; the current progress is untouched.
    pub fn import_json(&mut self, json: &str) -> Result<(), ImportError> {
        let patch = ProgressPatch::from_json(json)?;
        let next = self.progress.merged(patch);
        self.commit(next);
        Ok(())
    }

    /// The full aggregate as the single exported JSON document.
    ///
    /// # Panics
    ///
    /// Panics if the aggregate fails to serialize, which cannot happen for
    /// these types.
    #[must_use]
    pub fn export_json(&self) -> String {
        serde_json::to_string(&self.progress).expect("progress always serializes")
    }

    //
    // ─── QUEUES ────────────────────────────────────────────────────────────────
    //

    /// Boost signals for the scheduler, derived from recent mistakes and
    /// per-topic wrong rates.
    #[must_use]
    pub fn scheduler_boosts(&self, dataset: &Dataset) -> BoostMap {
        let topic_rates =
            build_topic_wrong_rate(&self.progress.question_stats, &dataset.questions);
        build_scheduler_boosts(&self.progress.recent_mistakes, &topic_rates)
    }

    /// The next daily quiz queue, sized by the daily quiz goal.
    #[must_use]
    pub fn daily_quiz_queue(&self, dataset: &Dataset) -> Vec<Question> {
        build_weighted_queue(
            &dataset.questions,
            &self.progress.question_stats,
            self.progress.settings.daily_quiz_goal,
            DEFAULT_REVIEW_RATIO,
            &self.scheduler_boosts(dataset),
            self.clock.now(),
        )
    }

    /// The next daily vocabulary queue, sized by the daily vocab goal.
    #[must_use]
    pub fn daily_vocab_queue(&self, dataset: &Dataset) -> Vec<VocabCard> {
        build_weighted_queue(
            &dataset.vocab_cards,
            &self.progress.vocab_stats,
            self.progress.settings.daily_vocab_goal,
            DEFAULT_REVIEW_RATIO,
            &self.scheduler_boosts(dataset),
            self.clock.now(),
        )
    }

    /// Items the learner flagged for review, across both stat namespaces.
    #[must_use]
    pub fn marked_for_review(&self) -> Vec<ItemId> {
        self.progress
            .question_stats
            .iter()
            .chain(&self.progress.vocab_stats)
            .filter(|(_, stat)| stat.marked_for_review)
            .map(|(id, _)| *id)
            .collect()
    }

    //
    // ─── PERSISTENCE ───────────────────────────────────────────────────────────
    //

    /// Awaits a save of the current aggregate. Mutations already persist in
    /// the background; this is for shutdown paths and tests.
    pub async fn flush(&self) {
        self.store.save(&self.progress).await;
    }

    /// Commits the new aggregate and fires an independent save task.
    fn commit(&mut self, next: Progress) {
        self.progress = next;

        let store = Arc::clone(&self.store);
        let snapshot = self.progress.clone();
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                store.save(&snapshot).await;
            });
        } else {
            debug!("no async runtime available, save deferred to next flush");
        }
    }
}
