use serde::{Deserialize, Serialize};

use crate::model::ids::{ItemId, TopicId};

//
// ─── STUDY SETTINGS ────────────────────────────────────────────────────────────
//

/// User-tunable study configuration, persisted inside the progress document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudySettings {
    /// Questions per daily quiz session.
    pub daily_quiz_goal: usize,
    /// Vocabulary cards per daily flashcard session.
    pub daily_vocab_goal: usize,
    /// Questions in an exam simulation.
    pub simulator_questions: usize,
    /// Errors allowed before a simulated exam is failed.
    pub simulator_max_errors: u32,
    /// Whether the exam simulation runs against the clock.
    pub simulator_timer: bool,
    pub theme: String,
}

impl Default for StudySettings {
    fn default() -> Self {
        Self {
            daily_quiz_goal: 12,
            daily_vocab_goal: 8,
            simulator_questions: 30,
            simulator_max_errors: 3,
            simulator_timer: false,
            theme: "light".to_string(),
        }
    }
}

//
// ─── SETTINGS PATCH ────────────────────────────────────────────────────────────
//

/// A partial settings record, as carried by imported or persisted documents.
///
/// Fields absent from the document leave the base value untouched, so an
/// export edited down to `{"settings":{"theme":"dark"}}` changes only the
/// theme when merged back in.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub daily_quiz_goal: Option<usize>,
    pub daily_vocab_goal: Option<usize>,
    pub simulator_questions: Option<usize>,
    pub simulator_max_errors: Option<u32>,
    pub simulator_timer: Option<bool>,
    pub theme: Option<String>,
}

impl SettingsPatch {
    /// Overlays the fields present in this patch onto `base`.
    #[must_use]
    pub fn applied_to(&self, base: &StudySettings) -> StudySettings {
        StudySettings {
            daily_quiz_goal: self.daily_quiz_goal.unwrap_or(base.daily_quiz_goal),
            daily_vocab_goal: self.daily_vocab_goal.unwrap_or(base.daily_vocab_goal),
            simulator_questions: self.simulator_questions.unwrap_or(base.simulator_questions),
            simulator_max_errors: self
                .simulator_max_errors
                .unwrap_or(base.simulator_max_errors),
            simulator_timer: self.simulator_timer.unwrap_or(base.simulator_timer),
            theme: self.theme.clone().unwrap_or_else(|| base.theme.clone()),
        }
    }
}

//
// ─── SESSION STATE ─────────────────────────────────────────────────────────────
//

/// Which flavor of session the saved cursor belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyMode {
    #[default]
    Daily,
    Simulator,
    Topic,
}

/// Cursor into an in-flight session, so a closed app resumes where it left off.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionState {
    pub queue: Vec<ItemId>,
    pub position: u32,
    pub mode: StudyMode,
    pub selected_topics: Vec<TopicId>,
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
