use super::{ReplyContext, Responder};
use crate::context::DashboardContext;
use crate::llm::TextGenerator;
use crate::prompts::{self, FALLBACK_APOLOGY, OPENING};
use crate::session::ConversationSession;
use crate::turn::Turn;
use async_trait::async_trait;
use serene_core::config::PacingConfig;
use std::sync::Arc;
use std::time::Duration;

/// Every reply is generated remotely from the user's message plus a fresh
/// dashboard snapshot. Failures never leave this responder.
pub struct RemoteResponder {
    generator: Arc<dyn TextGenerator>,
}

impl RemoteResponder {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl Responder for RemoteResponder {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn awaits_network(&self) -> bool {
        true
    }

    fn opening(&self, session: &mut ConversationSession, _pacing: &PacingConfig) -> Turn {
        *session = ConversationSession::new();
        Turn::new().say(OPENING, Duration::ZERO)
    }

    async fn respond(
        &self,
        _session: &mut ConversationSession,
        text: &str,
        ctx: &ReplyContext<'_>,
    ) -> Turn {
        let snapshot = DashboardContext::load(ctx.storage, ctx.now_ms).await;
        let prompt = prompts::remote_prompt(text, &snapshot);

        match self.generator.generate(&prompt).await {
            Ok(reply) => Turn::new().suggest(reply.trim(), Duration::ZERO),
            Err(e) => {
                tracing::warn!("Remote reply failed, sending apology: {}", e);
                Turn::new().say(FALLBACK_APOLOGY, Duration::ZERO)
            }
        }
    }
}
