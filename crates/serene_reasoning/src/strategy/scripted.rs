use super::{ReplyContext, Responder};
use crate::prompts::{OPENING, SCRIPTED_TABLE};
use crate::session::ConversationSession;
use crate::turn::Turn;
use anyhow::{bail, Result};
use async_trait::async_trait;
use serene_core::config::PacingConfig;

/// Canned replies: first matching trigger wins, otherwise the table is
/// walked in order and wraps around.
pub struct ScriptedResponder {
    table: Vec<(String, String)>,
}

impl Default for ScriptedResponder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedResponder {
    pub fn new() -> Self {
        Self::from_pairs(
            SCRIPTED_TABLE
                .iter()
                .map(|(t, r)| (t.to_string(), r.to_string()))
                .collect(),
        )
    }

    /// Triggers are matched case-insensitively. The table must not be empty.
    pub fn with_table(table: Vec<(String, String)>) -> Result<Self> {
        if table.is_empty() {
            bail!("scripted table must have at least one entry");
        }
        Ok(Self::from_pairs(table))
    }

    fn from_pairs(table: Vec<(String, String)>) -> Self {
        let table = table
            .into_iter()
            .map(|(trigger, response)| (trigger.to_lowercase(), response))
            .collect();
        Self { table }
    }

    /// Pick the reply for `message`, moving the session cursor only on a miss.
    pub fn reply_for(&self, session: &mut ConversationSession, message: &str) -> &str {
        let lower = message.to_lowercase();
        if let Some((trigger, response)) = self.table.iter().find(|(t, _)| lower.contains(t.as_str())) {
            tracing::debug!("Scripted trigger '{}' matched", trigger);
            return response;
        }
        let index = session.take_cursor() % self.table.len();
        &self.table[index].1
    }
}

#[async_trait]
impl Responder for ScriptedResponder {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn opening(&self, session: &mut ConversationSession, _pacing: &PacingConfig) -> Turn {
        *session = ConversationSession::new();
        Turn::new().say(OPENING, std::time::Duration::ZERO)
    }

    async fn respond(
        &self,
        session: &mut ConversationSession,
        text: &str,
        ctx: &ReplyContext<'_>,
    ) -> Turn {
        let reply = self.reply_for(session, text).to_string();
        Turn::new().suggest(reply, ctx.pacing.typing())
    }
}
