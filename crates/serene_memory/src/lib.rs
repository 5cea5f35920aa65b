pub mod activity;
pub mod album;
pub mod in_memory;
pub mod mood;
pub mod sleep;
pub mod sqlite;

pub use activity::ActivityLog;
pub use album::Album;
pub use in_memory::InMemoryStore;
pub use mood::{weekly_average, weekly_moods, MoodStats, MoodStore};
pub use sleep::SleepLog;
pub use sqlite::SqliteStore;
