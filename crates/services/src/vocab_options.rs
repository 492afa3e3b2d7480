use rand::Rng;
use rand::rng;
use rand::seq::SliceRandom;

use booster_core::model::VocabCard;

/// Multiple-choice option count, one correct label plus two distractors.
const OPTION_COUNT: usize = 3;

/// Builds the 3-way option set for a vocabulary card.
///
/// Distractor candidates sharing a category, part of speech, or tag with the
/// target card are tried before the unranked remainder; empty labels,
/// duplicates, and the correct label itself are skipped. When the dataset
/// cannot supply two distinct distractors the set is padded with synthetic
/// `"Option N"` labels, so the result always holds exactly three distinct
/// strings containing the correct label once.
#[must_use]
pub fn build_vocab_options(card: &VocabCard, all_cards: &[VocabCard], reverse_mode: bool) -> Vec<String> {
    build_vocab_options_with_rng(card, all_cards, reverse_mode, &mut rng())
}

/// [`build_vocab_options`] with an injected RNG for deterministic tests.
///
/// The final ordering is a uniform Fisher–Yates shuffle, so the correct
/// answer's position carries no signal.
#[must_use]
pub fn build_vocab_options_with_rng<R: Rng + ?Sized>(
    card: &VocabCard,
    all_cards: &[VocabCard],
    reverse_mode: bool,
    rng: &mut R,
) -> Vec<String> {
    let correct_label = card.answer_label(reverse_mode).to_string();

    let preferred = all_cards
        .iter()
        .filter(|c| c.id != card.id && c.shares_group_with(card));
    let remainder = all_cards.iter().filter(|c| c.id != card.id);

    let mut options = vec![correct_label];
    for candidate in preferred.chain(remainder) {
        if options.len() >= OPTION_COUNT {
            break;
        }
        let label = candidate.answer_label(reverse_mode);
        if label.is_empty() || options.iter().any(|taken| taken.as_str() == label) {
            continue;
        }
        options.push(label.to_string());
    }

    while options.len() < OPTION_COUNT {
        options.push(format!("Option {}", options.len() + 1));
    }

    options.shuffle(rng);
    options
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use booster_core::model::ItemId;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn card(id: u64, source: &str, target: &str, category: &str) -> VocabCard {
        VocabCard {
            id: ItemId::new(id),
            term_source: source.to_string(),
            term_target: target.to_string(),
            definition: format!("definition of {source}"),
            aliases: vec![],
            category: category.to_string(),
            part_of_speech: "noun".into(),
            tags: vec![],
            image: None,
        }
    }

    fn deck() -> Vec<VocabCard> {
        vec![
            card(1, "precedenza", "right of way", "rules"),
            card(2, "sorpasso", "overtaking", "rules"),
            card(3, "frizione", "clutch", "mechanics"),
            card(4, "semaforo", "traffic light", "signals"),
        ]
    }

    #[test]
    fn always_three_distinct_options_with_correct_label_once() {
        let cards = deck();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let options = build_vocab_options_with_rng(&cards[0], &cards, false, &mut rng);

            assert_eq!(options.len(), 3);
            let distinct: HashSet<&String> = options.iter().collect();
            assert_eq!(distinct.len(), 3);
            assert_eq!(
                options.iter().filter(|o| *o == "right of way").count(),
                1
            );
        }
    }

    #[test]
    fn same_group_candidates_are_preferred() {
        let mut cards = deck();
        cards.push(card(5, "incrocio", "intersection", "rules"));

        let mut rng = StdRng::seed_from_u64(7);
        let options = build_vocab_options_with_rng(&cards[0], &cards, false, &mut rng);

        // Two "rules" cards exist besides the target, so both distractors
        // come from the shared category.
        assert!(options.contains(&"overtaking".to_string()));
        assert!(options.contains(&"intersection".to_string()));
    }

    #[test]
    fn reverse_mode_quizzes_the_source_term() {
        let cards = deck();
        let mut rng = StdRng::seed_from_u64(3);
        let options = build_vocab_options_with_rng(&cards[0], &cards, true, &mut rng);
        assert!(options.contains(&"precedenza".to_string()));
        assert!(!options.contains(&"right of way".to_string()));
    }

    #[test]
    fn lone_card_pads_with_synthetic_labels() {
        let cards = vec![card(1, "precedenza", "right of way", "rules")];
        let mut rng = StdRng::seed_from_u64(11);
        let options = build_vocab_options_with_rng(&cards[0], &cards, false, &mut rng);

        assert_eq!(options.len(), 3);
        assert!(options.contains(&"right of way".to_string()));
        assert!(options.contains(&"Option 2".to_string()));
        assert!(options.contains(&"Option 3".to_string()));
    }

    #[test]
    fn duplicate_labels_are_skipped() {
        let cards = vec![
            card(1, "precedenza", "right of way", "rules"),
            card(2, "diritto", "right of way", "rules"),
            card(3, "sorpasso", "overtaking", "rules"),
            card(4, "semaforo", "traffic light", "signals"),
        ];
        let mut rng = StdRng::seed_from_u64(5);
        let options = build_vocab_options_with_rng(&cards[0], &cards, false, &mut rng);

        assert_eq!(options.iter().filter(|o| *o == "right of way").count(), 1);
        assert!(options.contains(&"overtaking".to_string()));
        assert!(options.contains(&"traffic light".to_string()));
    }

    #[test]
    fn empty_target_falls_back_to_definition() {
        let mut cards = deck();
        cards[1].term_target.clear();

        let mut rng = StdRng::seed_from_u64(9);
        let options = build_vocab_options_with_rng(&cards[1], &cards, false, &mut rng);
        assert!(options.contains(&"definition of sorpasso".to_string()));
    }

    #[test]
    fn shuffle_moves_the_correct_label_around() {
        let cards = deck();
        let mut positions = HashSet::new();
        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            let options = build_vocab_options_with_rng(&cards[0], &cards, false, &mut rng);
            let pos = options.iter().position(|o| o == "right of way").unwrap();
            positions.insert(pos);
        }
        // A uniform shuffle should hit every slot across 40 seeds.
        assert_eq!(positions.len(), 3);
    }
}
