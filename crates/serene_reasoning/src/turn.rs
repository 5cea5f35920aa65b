//! Ordered output of one companion turn and the pacing used to play it.
//!
//! Strategies never touch the presenter or the clock. They return a
//! [`Turn`]; the engine plays it step by step, so the order of emitted
//! lines is fixed before any delay starts.

use serene_core::{Presenter, Role};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    /// Typing time shown before the line appears.
    pub delay: Duration,
    /// Whether the line may carry activity suggestions worth extracting.
    pub suggests: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Say(Line),
    RevealPhotoUpload,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Turn {
    pub steps: Vec<Step>,
}

impl Turn {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn say(mut self, text: impl Into<String>, delay: Duration) -> Self {
        self.steps.push(Step::Say(Line {
            text: text.into(),
            delay,
            suggests: false,
        }));
        self
    }

    /// Like [`Turn::say`], but the line is handed to the suggestion extractor.
    pub fn suggest(mut self, text: impl Into<String>, delay: Duration) -> Self {
        self.steps.push(Step::Say(Line {
            text: text.into(),
            delay,
            suggests: true,
        }));
        self
    }

    pub fn reveal_photo_upload(mut self) -> Self {
        self.steps.push(Step::RevealPhotoUpload);
        self
    }

    /// Text of every spoken line, in order.
    pub fn lines(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter_map(|s| match s {
                Step::Say(line) => Some(line.text.as_str()),
                Step::RevealPhotoUpload => None,
            })
            .collect()
    }
}

/// Shows the typing indicator for each line's delay, then the line.
pub struct Pacer<'a> {
    presenter: &'a dyn Presenter,
}

impl<'a> Pacer<'a> {
    pub fn new(presenter: &'a dyn Presenter) -> Self {
        Self { presenter }
    }

    pub async fn say(&self, line: &Line) {
        if !line.delay.is_zero() {
            self.presenter.set_typing(true);
            tokio::time::sleep(line.delay).await;
            self.presenter.set_typing(false);
        }
        self.presenter.append_message(Role::Assistant, &line.text);
    }
}
