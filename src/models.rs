use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single vocabulary entry from the catalog. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    /// `"{chapter}-{front}"`, stable across sessions.
    pub id: String,
    pub front: String,
    pub transliteration: String,
    pub meaning_primary: String,
    pub meaning_secondary: String,
    pub chapter: u32,
}

/// Per-item scheduling state, keyed by item id in the store.
///
/// An item that was never rated has no record at all; defaults are resolved
/// inside the scheduler, not by callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewRecord {
    /// Consecutive successful recalls (quality >= 3) since the last lapse.
    pub repetitions: u32,
    /// Interval growth multiplier. Never drops below 1.3.
    pub ease_factor: f64,
    pub interval_days: u32,
    /// Date on/after which the item is eligible for review mode.
    pub due_date: NaiveDate,
}

impl ReviewRecord {
    pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

    /// The state a never-reviewed item is treated as having on first rating.
    pub fn fresh(today: NaiveDate) -> Self {
        Self {
            repetitions: 0,
            ease_factor: Self::DEFAULT_EASE_FACTOR,
            interval_days: 0,
            due_date: today,
        }
    }

    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.due_date <= today
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Flashcard,
    Quiz,
    Review,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Flashcard => "闪卡 Flashcard",
            Mode::Quiz => "测验 Quiz",
            Mode::Review => "复习 Review",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}
