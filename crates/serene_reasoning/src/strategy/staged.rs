//! Fixed check-in questionnaire ending in a sentiment read-out and a photo
//! request.
//!
//! Stages only move forward: greeting, feelings, sleep, habits, activities,
//! social, analysis, complete. Every answer is stored under the stage that
//! asked for it; the answer to `social` triggers the analysis.

use super::{ReplyContext, Responder};
use crate::prompts::{self, ANALYSIS_PROMPT, CLOSING_ACK, PHOTO_REQUEST};
use crate::session::{ConversationSession, Stage};
use crate::turn::Turn;
use async_trait::async_trait;
use serene_core::config::PacingConfig;
use serene_core::sentiment::{self, Sentiment};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Analysis {
    pub sentiment: Sentiment,
    pub summary: &'static str,
    pub encouragement: &'static str,
}

/// Classify everything the user has said so far. Depends on nothing but
/// the collected responses.
pub fn analyze(session: &ConversationSession) -> Analysis {
    let tally = sentiment::tally(&session.transcript());
    let sentiment = tally.classify();
    tracing::debug!(
        "Check-in analysis: {} positive / {} negative -> {:?}",
        tally.positive,
        tally.negative,
        sentiment
    );
    Analysis {
        sentiment,
        summary: prompts::analysis_line(sentiment),
        encouragement: prompts::encouragement(sentiment),
    }
}

pub struct StagedResponder;

impl StagedResponder {
    /// Advance `session` by one answer and describe what to say.
    pub fn step(&self, session: &mut ConversationSession, text: &str, pacing: &PacingConfig) -> Turn {
        if session.is_complete() {
            return Turn::new().say(CLOSING_ACK, pacing.typing());
        }

        session.record(text);
        match session.advance() {
            Stage::Analysis => {
                let analysis = analyze(session);
                session.finish();
                tracing::info!("Check-in complete ({:?})", analysis.sentiment);
                Turn::new()
                    .say(ANALYSIS_PROMPT, pacing.typing())
                    .say(analysis.summary, pacing.analysis())
                    .say(analysis.encouragement, pacing.analysis())
                    .say(PHOTO_REQUEST, pacing.typing())
                    .reveal_photo_upload()
            }
            next => Turn::new().say(prompts::stage_prompt(next), pacing.typing()),
        }
    }
}

#[async_trait]
impl Responder for StagedResponder {
    fn name(&self) -> &'static str {
        "staged"
    }

    fn opening(&self, session: &mut ConversationSession, _pacing: &PacingConfig) -> Turn {
        *session = ConversationSession::new();
        Turn::new().say(prompts::stage_prompt(Stage::Greeting), Duration::ZERO)
    }

    async fn respond(
        &self,
        session: &mut ConversationSession,
        text: &str,
        ctx: &ReplyContext<'_>,
    ) -> Turn {
        self.step(session, text, ctx.pacing)
    }
}
