use crate::dashboard::Dashboard;
use crate::extraction;
use crate::prompts::{PHOTO_FAREWELL, PHOTO_REFLECTIONS, PHOTO_THANKS};
use crate::session::ConversationSession;
use crate::strategy::{ReplyContext, Responder};
use crate::turn::{Pacer, Step, Turn};
use anyhow::Result;
use rand::seq::SliceRandom;
use serene_core::config::PacingConfig;
use serene_core::model::now_millis;
use serene_core::Role;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// How the engine handled one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing changed and nothing was shown.
    Ignored,
    /// An earlier turn is still playing; the request was dropped.
    Busy,
    Replied,
}

/// Clears the in-flight flag when the turn that set it is done.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Owns one conversation: its session, the selected responder and the
/// dashboard it reads from and writes to.
///
/// Only one turn plays at a time. A request arriving while a turn (or the
/// remote call behind it) is pending gets [`SubmitOutcome::Busy`].
pub struct ConversationEngine {
    responder: Box<dyn Responder>,
    dashboard: Arc<Dashboard>,
    pacing: PacingConfig,
    session: Mutex<ConversationSession>,
    in_flight: AtomicBool,
}

impl ConversationEngine {
    pub fn new(responder: Box<dyn Responder>, dashboard: Arc<Dashboard>, pacing: PacingConfig) -> Self {
        tracing::info!("Conversation engine using '{}' responder", responder.name());
        Self {
            responder,
            dashboard,
            pacing,
            session: Mutex::new(ConversationSession::new()),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn responder_name(&self) -> &'static str {
        self.responder.name()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Copy of the current session state.
    pub async fn session(&self) -> ConversationSession {
        self.session.lock().await.clone()
    }

    /// Reset the session and play the opening turn.
    pub async fn start(&self) -> SubmitOutcome {
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            return SubmitOutcome::Busy;
        };
        let turn = {
            let mut session = self.session.lock().await;
            self.responder.opening(&mut session, &self.pacing)
        };
        self.play(turn).await;
        SubmitOutcome::Replied
    }

    pub async fn submit_user_message(&self, text: &str) -> SubmitOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SubmitOutcome::Ignored;
        }
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            tracing::debug!("Dropping message while a reply is pending");
            return SubmitOutcome::Busy;
        };

        let presenter = self.dashboard.presenter();
        presenter.append_message(Role::User, text);

        let ctx = ReplyContext {
            storage: self.dashboard.storage(),
            pacing: &self.pacing,
            now_ms: now_millis(),
        };
        let waiting = self.responder.awaits_network();
        if waiting {
            presenter.set_typing(true);
        }
        let turn = {
            let mut session = self.session.lock().await;
            self.responder.respond(&mut session, text, &ctx).await
        };
        if waiting {
            presenter.set_typing(false);
        }

        self.play(turn).await;
        SubmitOutcome::Replied
    }

    /// Save a photo to the album, then reflect on it in the chat.
    pub async fn share_photo(&self, image: impl Into<String>) -> Result<SubmitOutcome> {
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            return Ok(SubmitOutcome::Busy);
        };
        self.dashboard.add_photo(image, now_millis()).await?;

        let reflection = {
            let mut rng = rand::thread_rng();
            PHOTO_REFLECTIONS
                .choose(&mut rng)
                .copied()
                .unwrap_or(PHOTO_REFLECTIONS[0])
        };
        self.play(photo_turn(reflection, &self.pacing)).await;
        Ok(SubmitOutcome::Replied)
    }

    async fn play(&self, turn: Turn) {
        let presenter = self.dashboard.presenter();
        let pacer = Pacer::new(presenter);
        for step in turn.steps {
            match step {
                Step::Say(line) => {
                    pacer.say(&line).await;
                    if line.suggests {
                        self.extract_suggestions(&line.text).await;
                    }
                }
                Step::RevealPhotoUpload => presenter.reveal_photo_upload(),
            }
        }
    }

    async fn extract_suggestions(&self, text: &str) {
        match extraction::extract_into(self.dashboard.storage(), text, now_millis()).await {
            Ok(Some(activities)) => self.dashboard.presenter().render_activities(&activities),
            Ok(None) => {}
            Err(e) => tracing::warn!("Could not save suggested activities: {}", e),
        }
    }
}

/// Thanks, one reflection, then the farewell.
pub fn photo_turn(reflection: &str, pacing: &PacingConfig) -> Turn {
    Turn::new()
        .say(PHOTO_THANKS, pacing.typing())
        .say(reflection, pacing.photo())
        .say(PHOTO_FAREWELL, pacing.photo())
}
