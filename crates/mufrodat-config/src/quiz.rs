use serde::{Deserialize, Serialize};

/// Floor for `min_entries`, sessions never start below it
pub const MIN_ENTRIES_FLOOR: usize = 5;

fn default_min_entries() -> usize {
    5
}

fn default_quiz_window() -> usize {
    5
}

fn default_unscramble_window() -> usize {
    10
}

fn default_distractors() -> usize {
    3
}

fn default_remote_questions() -> usize {
    10
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct QuizConfig {
    /// Entries required before any session can start
    #[serde(default = "default_min_entries")]
    pub min_entries: usize,
    /// Size of the newest/oldest slice for multiple choice
    #[serde(default = "default_quiz_window")]
    pub quiz_window: usize,
    /// Size of the newest/oldest slice for unscramble
    #[serde(default = "default_unscramble_window")]
    pub unscramble_window: usize,
    /// Wrong options per question
    #[serde(default = "default_distractors")]
    pub distractors: usize,
    #[serde(default = "default_remote_questions")]
    pub remote_questions: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            min_entries: default_min_entries(),
            quiz_window: default_quiz_window(),
            unscramble_window: default_unscramble_window(),
            distractors: default_distractors(),
            remote_questions: default_remote_questions(),
        }
    }
}

impl QuizConfig {
    /// Raise values a profile may set too low for a usable session
    pub fn clamped(self) -> Self {
        Self {
            min_entries: self.min_entries.max(MIN_ENTRIES_FLOOR),
            distractors: self.distractors.max(1),
            ..self
        }
    }
}
