pub mod context;
pub mod dashboard;
pub mod engine;
pub mod extraction;
pub mod llm;
pub mod prompts;
pub mod providers;
pub mod retry;
pub mod session;
pub mod strategy;
pub mod turn;

pub use context::DashboardContext;
pub use dashboard::Dashboard;
pub use engine::{ConversationEngine, SubmitOutcome};
pub use llm::{GenerationError, TextGenerator};
pub use session::{ConversationSession, Stage};
pub use strategy::{responder_for, Responder};
