use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};

use crate::model::{DEFAULT_MASTERY, ItemId, ItemStat, Question, StatMap, StudyItem, TopicId};

//
// ─── SCORING ───────────────────────────────────────────────────────────────────
//

/// Default share of the queue reserved for already-attempted items.
pub const DEFAULT_REVIEW_RATIO: f64 = 0.7;

/// Items seen within this window get a recency discount; beyond it the
/// discount floors at zero.
const RECENCY_WINDOW_MS: f64 = 7.0 * 24.0 * 60.0 * 60.0 * 1000.0;

/// Per-attempt score suppression, capped at four attempts.
const ATTEMPT_PENALTY: f64 = 0.05;
const ATTEMPT_PENALTY_CAP: u32 = 4;

/// Additive score signals derived from the recent-mistake log.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreBoost {
    /// Weak-topic signal for the mistaken item itself.
    pub topic_boost: f64,
    /// Cross-reference signal for vocabulary linked from mistaken questions.
    /// Accumulates per referencing mistake, deliberately unbounded.
    pub link_boost: f64,
}

/// Boost signals keyed by item id, spanning both item kinds.
pub type BoostMap = BTreeMap<ItemId, ScoreBoost>;

/// Scheduling priority of one candidate item.
///
/// Low mastery, staleness, weak topics, and mistake links raise the score;
/// repeated drilling gently lowers it. Never-seen items carry no recency
/// discount at all, so novelty is never penalized as staleness.
#[must_use]
pub fn item_score(stat: Option<&ItemStat>, boost: ScoreBoost, now_millis: i64) -> f64 {
    let mastery = stat.map_or(DEFAULT_MASTERY, |s| s.mastery);
    let last_seen = stat.map_or(0, |s| s.last_seen_at);
    let attempts = stat.map_or(0, |s| s.attempts);

    let recency_factor = if last_seen == 0 {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let elapsed = (now_millis - last_seen) as f64;
        (1.0 - elapsed / RECENCY_WINDOW_MS).max(0.0)
    };

    (1.0 - mastery) + (1.0 - recency_factor) + boost.topic_boost + boost.link_boost
        - f64::from(attempts.min(ATTEMPT_PENALTY_CAP)) * ATTEMPT_PENALTY
}

//
// ─── WEIGHTED QUEUE ────────────────────────────────────────────────────────────
//

/// Builds the next session's item queue.
///
/// All candidates are scored and stably sorted descending (ties keep input
/// order), then partitioned: the *review pool* holds items with at least one
/// attempt, the *fresh pool* items with fewer than two attempts that were not
/// already selected for review. `round(size * review_ratio)` slots go to the
/// highest-scoring review items and the remainder to fresh items.
///
/// A short review pool lets fresh items absorb the shortfall; a short fresh
/// pool is NOT back-filled from review, so the queue may come up short. That
/// asymmetry is intentional: it stops a mature collection from turning every
/// session into pure repetition.
#[must_use]
pub fn build_weighted_queue<I>(
    items: &[I],
    stats: &StatMap,
    size: usize,
    review_ratio: f64,
    boosts: &BoostMap,
    now: DateTime<Utc>,
) -> Vec<I>
where
    I: StudyItem + Clone,
{
    let size = size.min(items.len());
    if size == 0 {
        return Vec::new();
    }
    let now_millis = now.timestamp_millis();

    let mut scored: Vec<(&I, Option<&ItemStat>, f64)> = items
        .iter()
        .map(|item| {
            let stat = stats.get(&item.item_id());
            let boost = boosts.get(&item.item_id()).copied().unwrap_or_default();
            (item, stat, item_score(stat, boost, now_millis))
        })
        .collect();
    scored.sort_by(|a, b| b.2.total_cmp(&a.2));

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let review_target = (size as f64 * review_ratio).round() as usize;

    let review: Vec<&I> = scored
        .iter()
        .filter(|(_, stat, _)| stat.is_some_and(ItemStat::seen))
        .take(review_target)
        .map(|(item, _, _)| *item)
        .collect();

    let taken: HashSet<ItemId> = review.iter().map(|item| item.item_id()).collect();
    let fresh = scored
        .iter()
        .filter(|(item, stat, _)| {
            stat.map_or(0, |s| s.attempts) < 2 && !taken.contains(&item.item_id())
        })
        .take(size.saturating_sub(review.len()))
        .map(|(item, _, _)| *item);

    review
        .into_iter()
        .chain(fresh)
        .take(size)
        .cloned()
        .collect()
}

//
// ─── TOPIC WRONG RATE ──────────────────────────────────────────────────────────
//

/// Derives a per-topic wrong-rate in `[0, 1]` from the question stat map.
///
/// Stats whose question id is not in the loaded dataset are skipped. Topics
/// without any resolvable stat are omitted; a topic whose stats carry zero
/// attempts rates 0. Purely a scheduling signal, never mutates stats.
#[must_use]
pub fn build_topic_wrong_rate(
    question_stats: &StatMap,
    questions: &[Question],
) -> BTreeMap<TopicId, f64> {
    let by_id: BTreeMap<ItemId, &Question> =
        questions.iter().map(|q| (q.id, q)).collect();

    let mut totals: BTreeMap<TopicId, (u32, u32)> = BTreeMap::new();
    for (id, stat) in question_stats {
        let Some(question) = by_id.get(id) else {
            continue;
        };
        let entry = totals.entry(question.topic_id).or_default();
        entry.0 += stat.wrong;
        entry.1 += stat.attempts;
    }

    totals
        .into_iter()
        .map(|(topic, (wrong, attempts))| {
            let rate = if attempts == 0 {
                0.0
            } else {
                f64::from(wrong) / f64::from(attempts)
            };
            (topic, rate)
        })
        .collect()
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
