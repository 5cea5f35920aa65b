//! Keyword-count sentiment used by the staged check-in.
//!
//! Deliberately coarse: three buckets, no score. Matching is
//! case-insensitive and counts every substring occurrence.

use serde::{Deserialize, Serialize};

pub const POSITIVE_WORDS: &[&str] = &[
    "great", "happy", "good", "calm", "relaxed", "joy", "excited", "grateful", "better", "love",
    "wonderful", "peaceful", "proud", "hopeful", "energized",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "sad", "tired", "stress", "anxious", "anxiety", "lonely", "angry", "worried", "worry",
    "exhausted", "overwhelmed", "depressed", "upset", "frustrated", "bad", "awful", "terrible",
    "hopeless",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    /// Equal counts, including no keywords at all.
    Mixed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentTally {
    pub positive: usize,
    pub negative: usize,
}

impl SentimentTally {
    pub fn classify(&self) -> Sentiment {
        use std::cmp::Ordering;
        match self.positive.cmp(&self.negative) {
            Ordering::Greater => Sentiment::Positive,
            Ordering::Less => Sentiment::Negative,
            Ordering::Equal => Sentiment::Mixed,
        }
    }
}

fn occurrences(haystack: &str, words: &[&str]) -> usize {
    words.iter().map(|w| haystack.matches(w).count()).sum()
}

pub fn tally(text: &str) -> SentimentTally {
    let lower = text.to_lowercase();
    SentimentTally {
        positive: occurrences(&lower, POSITIVE_WORDS),
        negative: occurrences(&lower, NEGATIVE_WORDS),
    }
}

pub fn classify(text: &str) -> Sentiment {
    tally(text).classify()
}
