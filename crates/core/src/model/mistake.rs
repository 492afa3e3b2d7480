use serde::{Deserialize, Serialize};

use crate::model::ids::{ItemId, TopicId};

/// Maximum mistakes retained when recording a new one.
pub const MISTAKE_LOG_CAP: usize = 100;

/// Maximum mistakes retained after merging two progress documents.
pub const MISTAKE_MERGE_CAP: usize = 200;

/// One incorrectly answered question, kept in a bounded most-recent-favored
/// log that feeds the scheduler's boost signals.
///
/// Field renames match the historical export format (`id`, `at`, `topic`,
/// `linkedVocabIds`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MistakeRecord {
    #[serde(rename = "id")]
    pub item_id: ItemId,
    /// Unix milliseconds when the wrong answer was given.
    #[serde(rename = "at")]
    pub occurred_at: i64,
    #[serde(rename = "topic")]
    pub topic_id: TopicId,
    /// Vocabulary cards whose terms appear in the question or hint text.
    #[serde(rename = "linkedVocabIds", default)]
    pub linked_item_ids: Vec<ItemId>,
}

/// Appends `extra` to `log` and keeps only the trailing `cap` entries.
///
/// Entries are kept by position, not re-sorted by timestamp: callers are
/// expected to append in chronological order.
pub(crate) fn append_capped(
    log: &[MistakeRecord],
    extra: impl IntoIterator<Item = MistakeRecord>,
    cap: usize,
) -> Vec<MistakeRecord> {
    let mut merged: Vec<MistakeRecord> = log.to_vec();
    merged.extend(extra);
    if merged.len() > cap {
        merged.drain(..merged.len() - cap);
    }
    merged
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn mistake(id: u64, at: i64) -> MistakeRecord {
        MistakeRecord {
            item_id: ItemId::new(id),
            occurred_at: at,
            topic_id: TopicId::new(1),
            linked_item_ids: vec![],
        }
    }

    #[test]
    fn append_capped_keeps_most_recent_tail() {
        let log: Vec<_> = (0..5).map(|i| mistake(i, i64::from(i as i32))).collect();
        let merged = append_capped(&log, [mistake(99, 99)], 3);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].item_id, ItemId::new(4));
        assert_eq!(merged[2].item_id, ItemId::new(99));
    }

    #[test]
    fn append_capped_under_cap_keeps_everything() {
        let merged = append_capped(&[mistake(1, 1)], [mistake(2, 2)], MISTAKE_LOG_CAP);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn serializes_with_export_field_names() {
        let json = serde_json::to_string(&mistake(4, 1_700_000_000_000)).unwrap();
        assert!(json.contains(r#""id":4"#));
        assert!(json.contains(r#""at":1700000000000"#));
        assert!(json.contains(r#""topic":1"#));
        assert!(json.contains("linkedVocabIds"));
    }
}
