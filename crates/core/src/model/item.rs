use serde::{Deserialize, Serialize};

use crate::model::ids::{HintId, ItemId, TopicId};

//
// ─── STUDY ITEM ────────────────────────────────────────────────────────────────
//

/// Shared capability of anything schedulable: questions and vocabulary cards.
///
/// The weighted queue only needs a stable id to look up stats and boosts;
/// kind-specific payloads stay on the concrete types.
pub trait StudyItem {
    fn item_id(&self) -> ItemId;
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A true/false exam question, loaded once from the static dataset.
///
/// Field renames match the question-bank JSON produced by the dataset
/// pipeline, so existing data files load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: ItemId,
    #[serde(rename = "id_chapter")]
    pub topic_id: TopicId,
    #[serde(rename = "question")]
    pub body: String,
    #[serde(rename = "answer")]
    pub correct_answer: bool,
    #[serde(rename = "theory")]
    pub hint_id: HintId,
    #[serde(rename = "image", default, skip_serializing_if = "Option::is_none")]
    pub image_code: Option<u32>,
}

impl StudyItem for Question {
    fn item_id(&self) -> ItemId {
        self.id
    }
}

//
// ─── VOCAB CARD ────────────────────────────────────────────────────────────────
//

/// A bilingual vocabulary flashcard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabCard {
    pub id: ItemId,
    #[serde(rename = "term_it")]
    pub term_source: String,
    #[serde(rename = "term_en")]
    pub term_target: String,
    #[serde(rename = "definition_en")]
    pub definition: String,
    #[serde(rename = "aliases_it", default)]
    pub aliases: Vec<String>,
    pub category: String,
    #[serde(rename = "pos")]
    pub part_of_speech: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl VocabCard {
    /// The display label for this card's answer side.
    ///
    /// In reverse mode the learner is quizzed target-to-source, so the
    /// source term is the answer; otherwise the target term, falling back
    /// to the definition when no target translation exists.
    #[must_use]
    pub fn answer_label(&self, reverse_mode: bool) -> &str {
        if reverse_mode {
            &self.term_source
        } else if self.term_target.is_empty() {
            &self.definition
        } else {
            &self.term_target
        }
    }

    /// Returns true when the two cards share a category, part of speech,
    /// or at least one tag. Used to rank distractor candidates.
    #[must_use]
    pub fn shares_group_with(&self, other: &VocabCard) -> bool {
        self.category == other.category
            || self.part_of_speech == other.part_of_speech
            || self.tags.iter().any(|t| other.tags.contains(t))
    }
}

impl StudyItem for VocabCard {
    fn item_id(&self) -> ItemId {
        self.id
    }
}

//
// ─── TOPIC & HINT ──────────────────────────────────────────────────────────────
//

/// A chapter of the question bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub label: String,
}

/// Theory text attached to one or more questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub id: HintId,
    pub title: String,
    pub description: String,
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: u64) -> VocabCard {
        VocabCard {
            id: ItemId::new(id),
            term_source: "precedenza".into(),
            term_target: "right of way".into(),
            definition: "priority of passage at an intersection".into(),
            aliases: vec!["dare la precedenza".into()],
            category: "rules".into(),
            part_of_speech: "noun".into(),
            tags: vec!["intersection".into()],
            image: None,
        }
    }

    #[test]
    fn question_deserializes_from_dataset_shape() {
        let json = r#"{
            "id": 12,
            "id_chapter": 3,
            "question": "Il segnale raffigurato indica dare precedenza",
            "answer": true,
            "theory": 44,
            "image": 12
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.item_id(), ItemId::new(12));
        assert_eq!(q.topic_id, TopicId::new(3));
        assert!(q.correct_answer);
        assert_eq!(q.image_code, Some(12));
    }

    #[test]
    fn answer_label_prefers_target_then_definition() {
        let mut c = card(1);
        assert_eq!(c.answer_label(false), "right of way");
        assert_eq!(c.answer_label(true), "precedenza");

        c.term_target.clear();
        assert_eq!(
            c.answer_label(false),
            "priority of passage at an intersection"
        );
    }

    #[test]
    fn shares_group_with_matches_any_axis() {
        let base = card(1);

        let mut same_tag = card(2);
        same_tag.category = "signs".into();
        same_tag.part_of_speech = "verb".into();
        assert!(base.shares_group_with(&same_tag));

        let mut unrelated = card(3);
        unrelated.category = "signs".into();
        unrelated.part_of_speech = "verb".into();
        unrelated.tags = vec!["engine".into()];
        assert!(!base.shares_group_with(&unrelated));
    }
}
