//! Dashboard records as they are kept in storage.
//!
//! Field names follow the camelCase layout of the stored documents so an
//! existing store can be read back unchanged.

use crate::error::CoreError;
use chrono::{Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Sleep hours used when the user has never recorded any.
pub const SEED_SLEEP_HOURS: [f32; 7] = [7.0, 6.5, 8.0, 5.0, 7.5, 8.5, 6.0];

pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Local date and time, e.g. `3/14/2026, 9:05:12 PM`.
pub fn display_datetime(timestamp_ms: i64) -> String {
    match Local.timestamp_millis_opt(timestamp_ms).single() {
        Some(dt) => dt.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        None => String::new(),
    }
}

/// Local date only, e.g. `3/14/2026`.
pub fn display_date(timestamp_ms: i64) -> String {
    match Local.timestamp_millis_opt(timestamp_ms).single() {
        Some(dt) => dt.format("%-m/%-d/%Y").to_string(),
        None => String::new(),
    }
}

/// A wellbeing rating, always within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct MoodValue(u8);

impl MoodValue {
    pub fn new(value: i64) -> Result<Self, CoreError> {
        if (1..=5).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(CoreError::InvalidMood(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Very Sad",
            2 => "Sad",
            3 => "Neutral",
            4 => "Happy",
            _ => "Excellent",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self.0 {
            1 => "😢",
            2 => "😕",
            3 => "😐",
            4 => "😊",
            _ => "🤩",
        }
    }
}

impl TryFrom<i64> for MoodValue {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MoodValue> for u8 {
    fn from(value: MoodValue) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub value: MoodValue,
    /// Human readable local time captured when the entry was made.
    pub date: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl MoodEntry {
    pub fn new(value: MoodValue, timestamp: i64) -> Self {
        Self {
            value,
            date: display_datetime(timestamp),
            timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: i64,
    pub name: String,
    pub count: u32,
    pub last_done: Option<i64>,
}

impl Activity {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            count: 0,
            last_done: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.count > 0
    }

    /// Record one completion at `timestamp`.
    pub fn mark_done(&mut self, timestamp: i64) {
        self.count += 1;
        self.last_done = Some(timestamp);
    }
}

/// The activities a fresh dashboard starts with.
pub fn seed_activities() -> Vec<Activity> {
    vec![
        Activity::new(1, "5-minute breathing exercise"),
        Activity::new(2, "Take a 10-minute walk outside"),
        Activity::new(3, "Write 3 things you're grateful for"),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    /// Data URL or file reference.
    pub image: String,
    pub date: String,
    pub timestamp: i64,
}

impl Photo {
    pub fn new(image: impl Into<String>, timestamp: i64) -> Self {
        Self {
            image: image.into(),
            date: display_date(timestamp),
            timestamp,
        }
    }
}
