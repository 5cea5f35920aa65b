//! Background chat turns.
//!
//! Chat, photo and restart turns run as spawned tasks so the prompt stays
//! responsive. A turn may still be extracting suggestions into the activity
//! list, so dashboard commands call [`Turns::settle`] first and storage only
//! ever has one writer at a time.

use std::future::Future;
use tokio::task::JoinHandle;

#[derive(Default)]
pub struct Turns {
    pending: Vec<JoinHandle<()>>,
}

impl Turns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn<F>(&mut self, turn: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.pending.retain(|handle| !handle.is_finished());
        self.pending.push(tokio::spawn(turn));
    }

    /// Wait for every spawned turn to finish.
    pub async fn settle(&mut self) {
        for handle in self.pending.drain(..) {
            if let Err(e) = handle.await {
                tracing::warn!("Chat turn ended abnormally: {}", e);
            }
        }
    }

    #[cfg(test)]
    fn in_flight(&self) -> usize {
        self.pending.iter().filter(|h| !h.is_finished()).count()
    }
}
