//! Interchangeable ways of producing the companion's next turn.

pub mod remote;
pub mod scripted;
pub mod staged;

pub use remote::RemoteResponder;
pub use scripted::ScriptedResponder;
pub use staged::{analyze, Analysis, StagedResponder};

use crate::llm::TextGenerator;
use crate::session::ConversationSession;
use crate::turn::Turn;
use async_trait::async_trait;
use serene_core::config::{PacingConfig, StrategyKind};
use serene_core::Storage;
use std::sync::Arc;

/// What a strategy may look at while replying.
pub struct ReplyContext<'a> {
    pub storage: &'a dyn Storage,
    pub pacing: &'a PacingConfig,
    pub now_ms: i64,
}

/// Produces turns from user text. All mutable conversation state lives in
/// the session passed in, so a responder can be shared freely.
#[async_trait]
pub trait Responder: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether replies wait on a remote service; the engine shows the
    /// typing indicator for the whole wait.
    fn awaits_network(&self) -> bool {
        false
    }

    /// Reset `session` and return the opening turn.
    fn opening(&self, session: &mut ConversationSession, pacing: &PacingConfig) -> Turn;

    /// Reply to one non-empty, trimmed user message.
    async fn respond(
        &self,
        session: &mut ConversationSession,
        text: &str,
        ctx: &ReplyContext<'_>,
    ) -> Turn;
}

/// Select a responder for `kind`. The remote variant needs a generator.
pub fn responder_for(
    kind: StrategyKind,
    generator: Option<Arc<dyn TextGenerator>>,
) -> anyhow::Result<Box<dyn Responder>> {
    match kind {
        StrategyKind::Scripted => Ok(Box::new(ScriptedResponder::new())),
        StrategyKind::Staged => Ok(Box::new(StagedResponder)),
        StrategyKind::Remote => {
            let generator = generator
                .ok_or_else(|| anyhow::anyhow!("remote strategy requires a text generator"))?;
            Ok(Box::new(RemoteResponder::new(generator)))
        }
    }
}
