//! Integration tests for the ConversationEngine.
//!
//! A recording presenter captures everything the engine shows, and fake
//! generators stand in for the remote endpoint, so the full submit → reply
//! → extract pipeline runs without network access.

use async_trait::async_trait;
use serene_core::config::PacingConfig;
use serene_core::{keys, Activity, MoodEntry, Photo, Presenter, Role, Sentiment, Storage};
use serene_memory::InMemoryStore;
use serene_reasoning::llm::{GenerationError, TextGenerator};
use serene_reasoning::prompts::{
    encouragement, CLOSING_ACK, FALLBACK_APOLOGY, OPENING, PHOTO_FAREWELL, PHOTO_REQUEST, PHOTO_THANKS,
};
use serene_reasoning::strategy::{RemoteResponder, ScriptedResponder, StagedResponder};
use serene_reasoning::{ConversationEngine, Dashboard, Responder, Stage, SubmitOutcome};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

// ============================================================================
// Recording presenter
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Shown {
    User(String),
    Assistant(String),
    Typing(bool),
    Moods(usize),
    Activities(Vec<String>),
    Album(usize),
    Toast(String),
    RevealUpload,
}

#[derive(Default)]
struct RecordingPresenter {
    events: Mutex<Vec<Shown>>,
}

impl RecordingPresenter {
    fn push(&self, event: Shown) {
        self.events.lock().unwrap().push(event);
    }

    fn events(&self) -> Vec<Shown> {
        self.events.lock().unwrap().clone()
    }

    fn assistant_lines(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Shown::Assistant(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl Presenter for RecordingPresenter {
    fn append_message(&self, role: Role, text: &str) {
        match role {
            Role::User => self.push(Shown::User(text.to_string())),
            Role::Assistant => self.push(Shown::Assistant(text.to_string())),
        }
    }
    fn set_typing(&self, visible: bool) {
        self.push(Shown::Typing(visible));
    }
    fn render_moods(&self, moods: &[MoodEntry]) {
        self.push(Shown::Moods(moods.len()));
    }
    fn render_activities(&self, activities: &[Activity]) {
        self.push(Shown::Activities(
            activities.iter().map(|a| a.name.clone()).collect(),
        ));
    }
    fn render_album(&self, photos: &[Photo]) {
        self.push(Shown::Album(photos.len()));
    }
    fn notify(&self, message: &str) {
        self.push(Shown::Toast(message.to_string()));
    }
    fn reveal_photo_upload(&self) {
        self.push(Shown::RevealUpload);
    }
}

// ============================================================================
// Fake generators
// ============================================================================

/// Returns queued results in order, then empty-text errors.
struct QueueGenerator {
    replies: tokio::sync::Mutex<Vec<Result<String, GenerationError>>>,
    prompts: tokio::sync::Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl QueueGenerator {
    fn new(replies: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            replies: tokio::sync::Mutex::new(replies),
            prompts: tokio::sync::Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl TextGenerator for QueueGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().await.push(prompt.to_string());
        let mut queue = self.replies.lock().await;
        if queue.is_empty() {
            Err(GenerationError::Format("queue exhausted".to_string()))
        } else {
            queue.remove(0)
        }
    }
}

/// Blocks until released, so a second submission can race the first.
struct GatedGenerator {
    entered: Notify,
    release: Notify,
}

#[async_trait]
impl TextGenerator for GatedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok("Thanks for waiting.".to_string())
    }
}

// ============================================================================
// Helpers
// ============================================================================

struct Harness {
    engine: ConversationEngine,
    presenter: Arc<RecordingPresenter>,
    storage: Arc<InMemoryStore>,
}

fn harness(responder: Box<dyn Responder>) -> Harness {
    harness_with(responder, PacingConfig::instant(), InMemoryStore::new())
}

fn harness_with(responder: Box<dyn Responder>, pacing: PacingConfig, store: InMemoryStore) -> Harness {
    let presenter = Arc::new(RecordingPresenter::default());
    let storage = Arc::new(store);
    let dashboard = Arc::new(Dashboard::new(storage.clone(), presenter.clone()));
    Harness {
        engine: ConversationEngine::new(responder, dashboard, pacing),
        presenter,
        storage,
    }
}

async fn stored_activities(storage: &InMemoryStore) -> Vec<Activity> {
    match storage.get(keys::ACTIVITIES).await.unwrap() {
        Some(raw) => serde_json::from_str(&raw).unwrap(),
        None => Vec::new(),
    }
}

fn ok(text: &str) -> Result<String, GenerationError> {
    Ok(text.to_string())
}

// ============================================================================
// Staged questionnaire
// ============================================================================

#[tokio::test]
async fn test_staged_full_check_in() {
    let h = harness(Box::new(StagedResponder));
    assert_eq!(h.engine.start().await, SubmitOutcome::Replied);
    assert_eq!(h.presenter.assistant_lines().len(), 1);

    let answers = [
        "I'm tired and stressed",
        "feeling anxious",
        "not much sleep",
        "mostly desk work",
        "nothing lately",
        "I miss my friends",
    ];
    let mut stages = vec![h.engine.session().await.stage()];
    for answer in answers {
        assert_eq!(h.engine.submit_user_message(answer).await, SubmitOutcome::Replied);
        stages.push(h.engine.session().await.stage());
    }
    assert_eq!(
        stages,
        vec![
            Stage::Greeting,
            Stage::Feelings,
            Stage::Sleep,
            Stage::Habits,
            Stage::Activities,
            Stage::Social,
            Stage::Complete,
        ]
    );

    let session = h.engine.session().await;
    assert!(session.is_complete());
    assert_eq!(session.responses().len(), 6);

    // The final turn ends encouragement, photo request, reveal, with no
    // activity panel redraw in between.
    let events = h.presenter.events();
    let tail = &events[events.len() - 3..];
    assert_eq!(
        tail,
        &[
            Shown::Assistant(encouragement(Sentiment::Negative).to_string()),
            Shown::Assistant(PHOTO_REQUEST.to_string()),
            Shown::RevealUpload,
        ]
    );
    assert!(!events.iter().any(|e| matches!(e, Shown::Activities(_))));

    // The questionnaire never writes to the activity list, even though the
    // encouragement mentions breathing.
    assert!(h.storage.get(keys::ACTIVITIES).await.unwrap().is_none());
}

#[tokio::test]
async fn test_staged_check_in_leaves_seeded_activities_alone() {
    let h = harness(Box::new(StagedResponder));
    h.engine.start().await;
    let dashboard_seeded = {
        let presenter: Arc<dyn Presenter> = h.presenter.clone();
        let dashboard = Dashboard::new(h.storage.clone(), presenter);
        dashboard.init().await.unwrap();
        dashboard.activities().await
    };
    assert_eq!(dashboard_seeded.len(), 3);

    for answer in ["great", "happy", "good", "calm", "relaxed", "grateful"] {
        h.engine.submit_user_message(answer).await;
    }
    assert!(h.engine.session().await.is_complete());
    assert_eq!(stored_activities(&h.storage).await, dashboard_seeded);
}

#[tokio::test]
async fn test_staged_blank_input_is_ignored() {
    let h = harness(Box::new(StagedResponder));
    h.engine.start().await;
    h.presenter.clear();

    let before = h.engine.session().await;
    for blank in ["", "   ", "\n\t"] {
        assert_eq!(h.engine.submit_user_message(blank).await, SubmitOutcome::Ignored);
    }
    assert_eq!(h.engine.session().await, before);
    assert!(h.presenter.events().is_empty());
}

#[tokio::test]
async fn test_staged_after_completion_acknowledges() {
    let h = harness(Box::new(StagedResponder));
    h.engine.start().await;
    for answer in ["a", "b", "c", "d", "e", "f"] {
        h.engine.submit_user_message(answer).await;
    }
    h.presenter.clear();

    for _ in 0..2 {
        assert_eq!(h.engine.submit_user_message("hello again").await, SubmitOutcome::Replied);
    }
    assert_eq!(h.presenter.assistant_lines(), vec![CLOSING_ACK, CLOSING_ACK]);
    assert_eq!(h.engine.session().await.stage(), Stage::Complete);
}

#[tokio::test]
async fn test_restart_resets_session() {
    let h = harness(Box::new(StagedResponder));
    h.engine.start().await;
    h.engine.submit_user_message("good").await;
    assert_eq!(h.engine.session().await.stage(), Stage::Feelings);

    h.engine.start().await;
    let session = h.engine.session().await;
    assert_eq!(session.stage(), Stage::Greeting);
    assert!(session.responses().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_typing_indicator_wraps_delayed_lines() {
    let pacing = PacingConfig {
        typing_delay_ms: 1500,
        analysis_delay_ms: 2000,
        photo_delay_ms: 2000,
    };
    let h = harness_with(Box::new(StagedResponder), pacing, InMemoryStore::new());
    h.engine.start().await;
    h.presenter.clear();

    let started = tokio::time::Instant::now();
    h.engine.submit_user_message("okay").await;
    assert!(started.elapsed() >= std::time::Duration::from_millis(1500));

    let events = h.presenter.events();
    assert_eq!(events[0], Shown::User("okay".to_string()));
    assert_eq!(events[1], Shown::Typing(true));
    assert_eq!(events[2], Shown::Typing(false));
    assert!(matches!(events[3], Shown::Assistant(_)));
}

// ============================================================================
// Scripted table
// ============================================================================

#[tokio::test]
async fn test_scripted_reply_and_extraction() {
    let h = harness(Box::new(ScriptedResponder::new()));
    h.engine.start().await;
    assert_eq!(h.presenter.assistant_lines(), vec![OPENING]);

    h.engine.submit_user_message("I feel anxious all the time").await;
    let lines = h.presenter.assistant_lines();
    assert!(lines[1].starts_with("Anxiety can be overwhelming"));

    // "Try a 10-minute mindful walk" adds the walk activity.
    let activities = stored_activities(&h.storage).await;
    assert_eq!(activities.len(), 1);
    assert_eq!(activities[0].name, "Take a mindful walk");
    assert!(h
        .presenter
        .events()
        .contains(&Shown::Activities(vec!["Take a mindful walk".to_string()])));
}

#[tokio::test]
async fn test_scripted_sequential_fallback_wraps() {
    let h = harness(Box::new(ScriptedResponder::new()));
    for _ in 0..11 {
        h.engine.submit_user_message("zzz").await;
    }
    let lines = h.presenter.assistant_lines();
    assert_eq!(lines.len(), 11);
    assert_eq!(lines[0], lines[10]);
    assert_ne!(lines[0], lines[1]);
    assert_eq!(h.engine.session().await.cursor(), 11);
}

// ============================================================================
// Remote generation
// ============================================================================

#[tokio::test]
async fn test_remote_success_extracts_suggestions() {
    let generator = Arc::new(QueueGenerator::new(vec![ok(
        "Try a 5-minute breathing exercise and consider a journal entry",
    )]));
    let h = harness(Box::new(RemoteResponder::new(generator.clone())));

    assert_eq!(
        h.engine.submit_user_message("Rough day at work").await,
        SubmitOutcome::Replied
    );

    let events = h.presenter.events();
    assert_eq!(events[0], Shown::User("Rough day at work".to_string()));
    assert_eq!(events[1], Shown::Typing(true));
    assert_eq!(events[2], Shown::Typing(false));

    let prompts = generator.prompts.lock().await;
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Rough day at work"));
    assert!(prompts[0].contains("Weekly mood average: 0.0"));

    let names: Vec<String> = stored_activities(&h.storage)
        .await
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(names, vec!["Deep breathing exercise", "Write in journal"]);
}

#[tokio::test]
async fn test_remote_failures_fall_back_to_apology() {
    let generator = Arc::new(QueueGenerator::new(vec![
        Err(GenerationError::Status {
            status: 500,
            body: "boom".to_string(),
        }),
        Err(GenerationError::Format("no candidate text".to_string())),
    ]));
    let h = harness(Box::new(RemoteResponder::new(generator.clone())));
    let before = h.engine.session().await;

    for msg in ["hello?", "anyone there?"] {
        assert_eq!(h.engine.submit_user_message(msg).await, SubmitOutcome::Replied);
    }

    assert_eq!(h.presenter.assistant_lines(), vec![FALLBACK_APOLOGY, FALLBACK_APOLOGY]);
    assert_eq!(h.engine.session().await, before);
    assert!(stored_activities(&h.storage).await.is_empty());
    assert_eq!(generator.calls.load(Ordering::SeqCst), 2);
    assert!(!h.engine.is_busy());
}

#[tokio::test]
async fn test_remote_rejects_overlapping_submission() {
    let generator = Arc::new(GatedGenerator {
        entered: Notify::new(),
        release: Notify::new(),
    });
    let h = harness(Box::new(RemoteResponder::new(generator.clone())));
    let engine = Arc::new(h.engine);

    let first = tokio::spawn({
        let engine = engine.clone();
        async move { engine.submit_user_message("first").await }
    });

    generator.entered.notified().await;
    assert!(engine.is_busy());
    assert_eq!(engine.submit_user_message("second").await, SubmitOutcome::Busy);

    generator.release.notify_one();
    assert_eq!(first.await.unwrap(), SubmitOutcome::Replied);
    assert!(!engine.is_busy());

    let users: Vec<Shown> = h
        .presenter
        .events()
        .into_iter()
        .filter(|e| matches!(e, Shown::User(_)))
        .collect();
    assert_eq!(users, vec![Shown::User("first".to_string())]);
}

// ============================================================================
// Photos
// ============================================================================

#[tokio::test]
async fn test_share_photo_saves_and_reflects() {
    let h = harness(Box::new(StagedResponder));
    let outcome = h
        .engine
        .share_photo("data:image/png;base64,AAAA")
        .await
        .unwrap();
    assert_eq!(outcome, SubmitOutcome::Replied);

    let events = h.presenter.events();
    assert_eq!(events[0], Shown::Album(1));
    assert_eq!(
        events[1],
        Shown::Toast("Photo added to your therapy album! 📸".to_string())
    );

    let lines = h.presenter.assistant_lines();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], PHOTO_THANKS);
    assert_eq!(lines[2], PHOTO_FAREWELL);
    assert!(storage_has_album(&h.storage).await);
}

async fn storage_has_album(storage: &InMemoryStore) -> bool {
    storage.get(keys::ALBUM).await.unwrap().is_some()
}
