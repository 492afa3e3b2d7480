use unicode_normalization::UnicodeNormalization;

use crate::model::{Hint, ItemId, Question, VocabCard};

/// Canonical form for cross-referencing text: lowercase, diacritics
/// stripped (NFD, combining marks dropped), whitespace collapsed to
/// single spaces, trimmed.
///
/// "Dare la  Precedenza" and "dare la precedenza" normalize identically,
/// as do "perché" and "perche".
#[must_use]
pub fn normalize_text(text: &str) -> String {
    let folded: String = text
        .nfd()
        .filter(|c| !unicode_normalization::char::is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Finds vocabulary cards referenced by a question.
///
/// A card is linked when any of its normalized source terms or aliases
/// appears as a substring of the normalized question body plus hint text.
/// Empty terms never match. The result feeds `MistakeRecord::linked_item_ids`
/// and, from there, the scheduler's link boost.
#[must_use]
pub fn linked_vocab_ids(
    question: &Question,
    hint: Option<&Hint>,
    vocab_cards: &[VocabCard],
) -> Vec<ItemId> {
    let haystack = normalize_text(&match hint {
        Some(hint) => format!("{} {} {}", question.body, hint.title, hint.description),
        None => question.body.clone(),
    });

    vocab_cards
        .iter()
        .filter(|card| {
            std::iter::once(&card.term_source)
                .chain(&card.aliases)
                .map(|term| normalize_text(term))
                .any(|term| !term.is_empty() && haystack.contains(&term))
        })
        .map(|card| card.id)
        .collect()
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
