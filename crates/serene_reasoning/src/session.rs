//! Per-conversation state, passed explicitly into every strategy call.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Position in the check-in questionnaire. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Greeting,
    Feelings,
    Sleep,
    Habits,
    Activities,
    Social,
    Analysis,
    Complete,
}

impl Stage {
    pub const ORDER: [Stage; 8] = [
        Stage::Greeting,
        Stage::Feelings,
        Stage::Sleep,
        Stage::Habits,
        Stage::Activities,
        Stage::Social,
        Stage::Analysis,
        Stage::Complete,
    ];

    /// The following stage; `Complete` is absorbing.
    pub fn next(self) -> Stage {
        match self {
            Stage::Greeting => Stage::Feelings,
            Stage::Feelings => Stage::Sleep,
            Stage::Sleep => Stage::Habits,
            Stage::Habits => Stage::Activities,
            Stage::Activities => Stage::Social,
            Stage::Social => Stage::Analysis,
            Stage::Analysis | Stage::Complete => Stage::Complete,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Stage::Greeting => "greeting",
            Stage::Feelings => "feelings",
            Stage::Sleep => "sleep",
            Stage::Habits => "habits",
            Stage::Activities => "activities",
            Stage::Social => "social",
            Stage::Analysis => "analysis",
            Stage::Complete => "complete",
        }
    }
}

/// Never persisted; a fresh session starts with every engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationSession {
    stage: Stage,
    responses: BTreeMap<Stage, String>,
    complete: bool,
    /// Sequential fallback position of the scripted table.
    cursor: usize,
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationSession {
    pub fn new() -> Self {
        Self {
            stage: Stage::Greeting,
            responses: BTreeMap::new(),
            complete: false,
            cursor: 0,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn responses(&self) -> &BTreeMap<Stage, String> {
        &self.responses
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// All collected answers in stage order, space separated.
    pub fn transcript(&self) -> String {
        self.responses
            .values()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub(crate) fn record(&mut self, text: &str) {
        self.responses.insert(self.stage, text.to_string());
    }

    /// Move one stage forward and return the new stage.
    pub(crate) fn advance(&mut self) -> Stage {
        self.stage = self.stage.next();
        tracing::debug!("Session advanced to stage '{}'", self.stage.key());
        self.stage
    }

    pub(crate) fn finish(&mut self) {
        self.stage = Stage::Complete;
        self.complete = true;
    }

    /// Return the current cursor and step past it.
    pub(crate) fn take_cursor(&mut self) -> usize {
        let current = self.cursor;
        self.cursor = self.cursor.wrapping_add(1);
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_follows_order() {
        for pair in Stage::ORDER.windows(2) {
            assert_eq!(pair[0].next(), pair[1]);
        }
        assert_eq!(Stage::Complete.next(), Stage::Complete);
    }

    #[test]
    fn test_transcript_in_stage_order() {
        let mut session = ConversationSession::new();
        session.record("first");
        session.advance();
        session.record("second");
        assert_eq!(session.transcript(), "first second");
        assert_eq!(session.responses()[&Stage::Feelings], "second");
    }

    #[test]
    fn test_cursor_increments() {
        let mut session = ConversationSession::new();
        assert_eq!(session.take_cursor(), 0);
        assert_eq!(session.take_cursor(), 1);
        assert_eq!(session.cursor(), 2);
    }
}
