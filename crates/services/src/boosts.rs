use std::collections::BTreeMap;

use booster_core::model::{MistakeRecord, TopicId};
use booster_core::scheduler::{BoostMap, ScoreBoost};

/// How many of the most recent mistakes feed the boost map.
const RECENT_MISTAKE_WINDOW: usize = 40;

/// Weight of a topic's wrong-rate when boosting its mistaken items.
const TOPIC_BOOST_FACTOR: f64 = 0.6;

/// Additive boost per mistake referencing a linked vocabulary card.
const LINK_BOOST_STEP: f64 = 0.25;

/// Builds the scheduler's boost map from the recent-mistake log.
///
/// Each of the last [`RECENT_MISTAKE_WINDOW`] mistakes sets the mistaken
/// item's topic boost to `wrong_rate(topic) * 0.6` and adds `0.25` link
/// boost to every vocabulary card it cross-references. Link boosts stack
/// across mistakes; topic boosts do not.
#[must_use]
pub fn build_scheduler_boosts(
    recent_mistakes: &[MistakeRecord],
    topic_rates: &BTreeMap<TopicId, f64>,
) -> BoostMap {
    let window_start = recent_mistakes.len().saturating_sub(RECENT_MISTAKE_WINDOW);

    let mut boosts = BoostMap::new();
    for mistake in &recent_mistakes[window_start..] {
        let rate = topic_rates.get(&mistake.topic_id).copied().unwrap_or(0.0);
        boosts.entry(mistake.item_id).or_insert_with(ScoreBoost::default).topic_boost =
            rate * TOPIC_BOOST_FACTOR;

        for linked in &mistake.linked_item_ids {
            boosts.entry(*linked).or_insert_with(ScoreBoost::default).link_boost +=
                LINK_BOOST_STEP;
        }
    }
    boosts
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
