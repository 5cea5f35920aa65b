//! Prints the dashboard and the chat to the terminal.

use crossterm::cursor::MoveToColumn;
use crossterm::execute;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use serene_core::model::display_date;
use serene_core::{Activity, MoodEntry, Photo, Presenter, Role};
use std::io::{stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};

const TYPING: &str = "  companion is typing...";

#[derive(Default)]
pub struct TerminalPresenter {
    typing: AtomicBool,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn clear_typing(&self) {
        if self.typing.swap(false, Ordering::AcqRel) {
            let _ = erase_typing(&mut stdout());
        }
    }
}

impl Presenter for TerminalPresenter {
    fn append_message(&self, role: Role, text: &str) {
        self.clear_typing();
        match role {
            // rustyline already echoed what the user typed
            Role::User => {}
            Role::Assistant => println!("💬 {}", text),
        }
    }

    fn set_typing(&self, visible: bool) {
        if visible {
            if !self.typing.swap(true, Ordering::AcqRel) {
                let _ = show_typing(&mut stdout());
            }
        } else {
            self.clear_typing();
        }
    }

    fn render_moods(&self, moods: &[MoodEntry]) {
        self.clear_typing();
        println!("── Mood history ──");
        if moods.is_empty() {
            println!("  No moods recorded yet. Try /mood 1-5.");
        }
        for entry in moods {
            println!("  {}", format_mood(entry));
        }
    }

    fn render_activities(&self, activities: &[Activity]) {
        self.clear_typing();
        println!("── Suggested activities ──");
        for activity in activities {
            println!("  {}", format_activity(activity));
        }
    }

    fn render_album(&self, photos: &[Photo]) {
        self.clear_typing();
        println!("── Therapy album ({}) ──", photos.len());
        for photo in photos {
            println!("  {}", format_photo(photo));
        }
    }

    fn notify(&self, message: &str) {
        self.clear_typing();
        println!("✨ {}", message);
    }

    fn reveal_photo_upload(&self) {
        self.clear_typing();
        println!("📷 Share a photo with /photo <path>");
    }
}

fn show_typing(out: &mut impl Write) -> std::io::Result<()> {
    execute!(out, Print(TYPING))
}

/// Wipe the indicator line so the next output starts at column zero.
fn erase_typing(out: &mut impl Write) -> std::io::Result<()> {
    execute!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))
}

pub fn format_mood(entry: &MoodEntry) -> String {
    format!(
        "{} {} ({}/5)  {}",
        entry.value.emoji(),
        entry.value.label(),
        entry.value.get(),
        entry.date
    )
}

pub fn format_activity(activity: &Activity) -> String {
    let mut line = format!("[{}] {}", activity.id, activity.name);
    if let Some(last) = activity.last_done {
        line.push_str(&format!(
            "  ✓ done {}x, last {}",
            activity.count,
            display_date(last)
        ));
    }
    line
}

pub fn format_photo(photo: &Photo) -> String {
    let kind = photo
        .image
        .strip_prefix("data:")
        .and_then(|rest| rest.split(';').next())
        .unwrap_or("image");
    format!("{}  {} ({} KB)", photo.date, kind, photo.image.len() / 1024)
}
