use serde::{Deserialize, Serialize};

/// Prior mastery assigned to an item before any attempt: mildly unknown,
/// deliberately not zero so unseen items do not dominate the queue score.
pub const DEFAULT_MASTERY: f64 = 0.2;

/// Per-item proficiency record.
///
/// One stat exists per item id, in separate namespaces for questions and
/// vocabulary cards. Invariant: `attempts == correct + wrong`, and
/// `mastery` stays in `[0, 1]`.
///
/// Field names serialize in camelCase to stay compatible with previously
/// exported progress documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemStat {
    pub attempts: u32,
    pub correct: u32,
    pub wrong: u32,
    /// Unix milliseconds of the last attempt; `0` means never seen.
    pub last_seen_at: i64,
    pub mastery: f64,
    pub streak_correct: u32,
    pub marked_for_review: bool,
}

impl Default for ItemStat {
    fn default() -> Self {
        Self {
            attempts: 0,
            correct: 0,
            wrong: 0,
            last_seen_at: 0,
            mastery: DEFAULT_MASTERY,
            streak_correct: 0,
            marked_for_review: false,
        }
    }
}

impl ItemStat {
    /// Returns true when the item has been attempted at least once.
    #[must_use]
    pub fn seen(&self) -> bool {
        self.attempts > 0
    }

    /// Returns a copy with `marked_for_review` set by the caller.
    ///
    /// The flag is user-driven, never derived from outcomes.
    #[must_use]
    pub fn with_marked_for_review(mut self, marked: bool) -> Self {
        self.marked_for_review = marked;
        self
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stat_is_unseen_with_prior_mastery() {
        let stat = ItemStat::default();
        assert_eq!(stat.attempts, 0);
        assert_eq!(stat.correct + stat.wrong, stat.attempts);
        assert_eq!(stat.last_seen_at, 0);
        assert!((stat.mastery - DEFAULT_MASTERY).abs() < f64::EPSILON);
        assert!(!stat.seen());
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_string(&ItemStat::default()).unwrap();
        assert!(json.contains("lastSeenAt"));
        assert!(json.contains("streakCorrect"));
        assert!(json.contains("markedForReview"));
    }

    #[test]
    fn deserializes_partial_documents_with_defaults() {
        let stat: ItemStat = serde_json::from_str(r#"{"attempts":2,"wrong":1}"#).unwrap();
        assert_eq!(stat.attempts, 2);
        assert_eq!(stat.wrong, 1);
        assert!((stat.mastery - DEFAULT_MASTERY).abs() < f64::EPSILON);
    }

    #[test]
    fn with_marked_for_review_only_touches_the_flag() {
        let stat = ItemStat::default().with_marked_for_review(true);
        assert!(stat.marked_for_review);
        assert_eq!(stat.attempts, 0);
    }
}
