use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::ids::ItemId;
use crate::model::mistake::{MISTAKE_LOG_CAP, MISTAKE_MERGE_CAP, MistakeRecord, append_capped};
use crate::model::settings::{SessionState, SettingsPatch, StudySettings};
use crate::model::stat::ItemStat;

/// Per-item stats, keyed by item id within one kind namespace.
pub type StatMap = BTreeMap<ItemId, ItemStat>;

//
// ─── PROGRESS ──────────────────────────────────────────────────────────────────
//

/// The aggregate root: everything the engine knows about one learner.
///
/// Exactly one `Progress` value exists per installation. It is hydrated once
/// at startup, held in memory, and replaced copy-on-write on every mutation;
/// the mutation helpers below all take `&self` and return a new value.
///
/// Serializes to the single JSON document used for persistence and
/// file export, with the historical camelCase field names.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Progress {
    pub question_stats: StatMap,
    pub vocab_stats: StatMap,
    pub recent_mistakes: Vec<MistakeRecord>,
    pub settings: StudySettings,
    pub session_state: SessionState,
}

impl Progress {
    /// Records the outcome of a question attempt.
    ///
    /// Replaces the item's stat and, for wrong answers, appends the mistake
    /// to the recent log (capped at [`MISTAKE_LOG_CAP`], oldest dropped).
    #[must_use]
    pub fn with_question_result(
        &self,
        id: ItemId,
        stat: ItemStat,
        mistake: Option<MistakeRecord>,
    ) -> Self {
        let mut next = self.clone();
        next.question_stats.insert(id, stat);
        if let Some(mistake) = mistake {
            next.recent_mistakes =
                append_capped(&self.recent_mistakes, [mistake], MISTAKE_LOG_CAP);
        }
        next
    }

    /// Records the outcome of a vocabulary attempt.
    #[must_use]
    pub fn with_vocab_result(&self, id: ItemId, stat: ItemStat) -> Self {
        let mut next = self.clone();
        next.vocab_stats.insert(id, stat);
        next
    }

    #[must_use]
    pub fn with_settings(&self, settings: StudySettings) -> Self {
        let mut next = self.clone();
        next.settings = settings;
        next
    }

    #[must_use]
    pub fn with_session_state(&self, session_state: SessionState) -> Self {
        let mut next = self.clone();
        next.session_state = session_state;
        next
    }

    /// Merges an imported or persisted partial document into this aggregate.
    ///
    /// - `settings` is merged field-wise: fields the incoming record carries
    ///   win, everything else keeps the base value. `session_state` is
    ///   overridden wholesale when present.
    /// - Stat maps are merged as key unions; where both sides define a key,
    ///   the incoming stat wins outright. This last-import-wins-per-item
    ///   policy matches previously exported data and must not change.
    /// - `recent_mistakes` is base followed by incoming, truncated to the
    ///   trailing [`MISTAKE_MERGE_CAP`] entries by position. Inputs are
    ///   assumed to already be in chronological order.
    #[must_use]
    pub fn merged(&self, incoming: ProgressPatch) -> Self {
        let mut next = self.clone();

        if let Some(stats) = incoming.question_stats {
            next.question_stats.extend(stats);
        }
        if let Some(stats) = incoming.vocab_stats {
            next.vocab_stats.extend(stats);
        }
        if let Some(mistakes) = incoming.recent_mistakes {
            next.recent_mistakes =
                append_capped(&self.recent_mistakes, mistakes, MISTAKE_MERGE_CAP);
        }
        if let Some(settings) = incoming.settings {
            next.settings = settings.applied_to(&self.settings);
        }
        if let Some(session_state) = incoming.session_state {
            next.session_state = session_state;
        }

        next
    }
}

//
// ─── PROGRESS PATCH ────────────────────────────────────────────────────────────
//

/// A partial progress document, as read from storage or a user import.
///
/// Every field is optional and unknown fields are ignored, so any JSON
/// object is accepted; anything that is not an object is a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressPatch {
    pub question_stats: Option<StatMap>,
    pub vocab_stats: Option<StatMap>,
    pub recent_mistakes: Option<Vec<MistakeRecord>>,
    pub settings: Option<SettingsPatch>,
    pub session_state: Option<SessionState>,
}

impl ProgressPatch {
    /// Parses a patch from raw JSON without touching any existing state.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error for malformed JSON or a
    /// structurally invalid document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
