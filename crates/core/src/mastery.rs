use chrono::{DateTime, Utc};

use crate::model::{DEFAULT_MASTERY, ItemStat};

/// Fraction of remaining headroom gained per correct answer.
const LEARNING_RATE: f64 = 0.08;

/// Fraction of current mastery lost per wrong answer. Intentionally steeper
/// than the learning rate so mistakes cost more than correct answers earn.
const FORGETTING_RATE: f64 = 0.18;

/// Advances a mastery estimate by one attempt outcome.
///
/// Correct answers approach 1.0 exponentially; wrong answers decay toward 0.
/// The result is clamped to `[0, 1]` and rounded to four decimal places so
/// stored values compare stably across platforms.
///
/// # Examples
///
/// ```
/// # use booster_core::mastery::update_mastery;
/// assert_eq!(update_mastery(0.2, true), 0.264);
/// assert_eq!(update_mastery(0.2, false), 0.164);
/// ```
#[must_use]
pub fn update_mastery(mastery: f64, correct: bool) -> f64 {
    let next = if correct {
        mastery + LEARNING_RATE * (1.0 - mastery)
    } else {
        mastery - FORGETTING_RATE * mastery
    };
    round4(next.clamp(0.0, 1.0))
}

/// Applies one attempt outcome to an item's stat, returning the new record.
///
/// A missing stat is treated as the default (unseen, mastery
/// [`DEFAULT_MASTERY`]). Attempt counters and the correct streak update
/// accordingly; `last_seen_at` is set to `now`. The `marked_for_review`
/// flag is left for the caller to set, never derived here.
#[must_use]
pub fn update_stat(existing: Option<&ItemStat>, correct: bool, now: DateTime<Utc>) -> ItemStat {
    let current = existing.cloned().unwrap_or_default();
    ItemStat {
        attempts: current.attempts + 1,
        correct: current.correct + u32::from(correct),
        wrong: current.wrong + u32::from(!correct),
        last_seen_at: now.timestamp_millis(),
        mastery: update_mastery(current.mastery, correct),
        streak_correct: if correct {
            current.streak_correct + 1
        } else {
            0
        },
        marked_for_review: current.marked_for_review,
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn first_correct_answer_from_default_reaches_0_264() {
        let stat = update_stat(None, true, fixed_now());
        assert_eq!(stat.mastery, 0.264);
        assert_eq!(stat.attempts, 1);
        assert_eq!(stat.correct, 1);
        assert_eq!(stat.wrong, 0);
        assert_eq!(stat.streak_correct, 1);
        assert_eq!(stat.last_seen_at, fixed_now().timestamp_millis());
    }

    #[test]
    fn first_wrong_answer_from_default_reaches_0_164() {
        let stat = update_stat(None, false, fixed_now());
        assert_eq!(stat.mastery, 0.164);
        assert_eq!(stat.attempts, 1);
        assert_eq!(stat.correct, 0);
        assert_eq!(stat.wrong, 1);
        assert_eq!(stat.streak_correct, 0);
    }

    #[test]
    fn attempts_always_equal_correct_plus_wrong() {
        let mut stat: Option<ItemStat> = None;
        for i in 0..50 {
            let next = update_stat(stat.as_ref(), i % 3 == 0, fixed_now());
            assert_eq!(next.attempts, next.correct + next.wrong);
            stat = Some(next);
        }
    }

    #[test]
    fn repeated_correct_converges_toward_one_without_reaching_it() {
        let mut mastery = DEFAULT_MASTERY;
        let mut previous = mastery;
        for _ in 0..500 {
            mastery = update_mastery(mastery, true);
            assert!(mastery >= previous);
            assert!(mastery <= 1.0);
            previous = mastery;
        }
        // Rounding to 4 decimals means it parks just below 1.0.
        assert!(mastery < 1.0);
        assert!(mastery > 0.99);
    }

    #[test]
    fn repeated_wrong_converges_toward_zero_without_reaching_it() {
        let mut mastery = 0.9;
        let mut previous = mastery;
        for _ in 0..40 {
            mastery = update_mastery(mastery, false);
            assert!(mastery <= previous);
            assert!(mastery >= 0.0);
            previous = mastery;
        }
        assert!(mastery < 0.01);
    }

    #[test]
    fn mastery_stays_in_unit_interval_under_any_sequence() {
        let mut stat: Option<ItemStat> = None;
        for i in 0u32..200 {
            let next = update_stat(stat.as_ref(), (i * 7) % 5 < 2, fixed_now());
            assert!((0.0..=1.0).contains(&next.mastery));
            stat = Some(next);
        }
    }

    #[test]
    fn wrong_answer_resets_the_streak() {
        let now = fixed_now();
        let a = update_stat(None, true, now);
        let b = update_stat(Some(&a), true, now);
        assert_eq!(b.streak_correct, 2);
        let c = update_stat(Some(&b), false, now);
        assert_eq!(c.streak_correct, 0);
    }

    #[test]
    fn marked_for_review_survives_updates_untouched() {
        let marked = ItemStat::default().with_marked_for_review(true);
        let next = update_stat(Some(&marked), true, fixed_now());
        assert!(next.marked_for_review);
    }
}
