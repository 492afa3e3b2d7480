use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use booster_core::model::{Hint, HintId, ItemId, Question, Topic, VocabCard};

use crate::error::DatasetError;

/// The immutable reference data the engine consumes: question bank,
/// topics, theory hints, and the vocabulary deck. Loaded once; the core
/// never mutates it.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub questions: Vec<Question>,
    pub topics: Vec<Topic>,
    pub hints: Vec<Hint>,
    pub vocab_cards: Vec<VocabCard>,
}

/// Wire shape of the vocabulary file, which nests cards under a top key.
#[derive(Debug, Deserialize)]
struct VocabFile {
    #[serde(default)]
    cards: Vec<VocabCard>,
}

impl Dataset {
    /// Parses the four dataset documents from raw JSON.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::Parse` when any document is malformed.
    pub fn from_json(
        questions: &str,
        topics: &str,
        hints: &str,
        vocab: &str,
    ) -> Result<Self, DatasetError> {
        let vocab_file: VocabFile = serde_json::from_str(vocab)?;
        Ok(Self {
            questions: serde_json::from_str(questions)?,
            topics: serde_json::from_str(topics)?,
            hints: serde_json::from_str(hints)?,
            vocab_cards: vocab_file.cards,
        })
    }

    /// Loads the dataset from its conventional file names inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::Io` for unreadable files and
    /// `DatasetError::Parse` for malformed ones.
    pub fn load_from_dir(dir: &Path) -> Result<Self, DatasetError> {
        Self::from_json(
            &std::fs::read_to_string(dir.join("questions.json"))?,
            &std::fs::read_to_string(dir.join("chapters.json"))?,
            &std::fs::read_to_string(dir.join("hints.json"))?,
            &std::fs::read_to_string(dir.join("vocab.json"))?,
        )
    }

    #[must_use]
    pub fn questions_by_id(&self) -> BTreeMap<ItemId, &Question> {
        self.questions.iter().map(|q| (q.id, q)).collect()
    }

    #[must_use]
    pub fn hints_by_id(&self) -> BTreeMap<HintId, &Hint> {
        self.hints.iter().map(|h| (h.id, h)).collect()
    }

    #[must_use]
    pub fn hint_for(&self, question: &Question) -> Option<&Hint> {
        self.hints.iter().find(|h| h.id == question.hint_id)
    }
}

/// Relative asset path for a question's illustration, zero-padded the way
/// the image files are named.
#[must_use]
pub fn quiz_image_path(image_code: Option<u32>) -> Option<String> {
    image_code.map(|code| format!("/images/{code:03}.gif"))
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
