//! Property-based tests for serene_core.
//!
//! Uses proptest to verify invariants of the sentiment buckets and the
//! mood value range for arbitrary inputs.

use proptest::prelude::*;
use serene_core::sentiment::{classify, tally, Sentiment, NEGATIVE_WORDS, POSITIVE_WORDS};
use serene_core::MoodValue;

proptest! {
    /// Classification always agrees with the raw counts.
    #[test]
    fn classify_matches_tally(s in "\\PC{0,300}") {
        let t = tally(&s);
        let expected = if t.positive > t.negative {
            Sentiment::Positive
        } else if t.negative > t.positive {
            Sentiment::Negative
        } else {
            Sentiment::Mixed
        };
        prop_assert_eq!(classify(&s), expected);
    }

    /// Case never changes the bucket.
    #[test]
    fn classify_ignores_case(s in "[a-zA-Z ]{0,200}") {
        prop_assert_eq!(classify(&s), classify(&s.to_uppercase()));
    }

    /// Adding one more positive word than negative words always tips positive.
    #[test]
    fn extra_positive_words_tip_positive(
        pos_idx in proptest::collection::vec(0..POSITIVE_WORDS.len(), 1..6),
        neg_idx in proptest::collection::vec(0..NEGATIVE_WORDS.len(), 0..5),
    ) {
        prop_assume!(pos_idx.len() > neg_idx.len());
        let text = pos_idx.iter().map(|i| POSITIVE_WORDS[*i])
            .chain(neg_idx.iter().map(|i| NEGATIVE_WORDS[*i]))
            .collect::<Vec<_>>()
            .join(" ");
        let t = tally(&text);
        prop_assert!(t.positive >= pos_idx.len());
        prop_assert_eq!(t.negative, neg_idx.len());
        prop_assert_eq!(classify(&text), Sentiment::Positive);
    }

    /// MoodValue accepts exactly 1..=5.
    #[test]
    fn mood_value_range(v in -100i64..100) {
        prop_assert_eq!(MoodValue::new(v).is_ok(), (1..=5).contains(&v));
    }
}
