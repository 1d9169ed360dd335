use serde::{Deserialize, Serialize};

use crate::entry::VocabularyEntry;
use crate::question::{QuizSource, SessionOutcome};

#[derive(Debug, Clone)]
pub enum AppEvent {
    UiEvent(UiEvent),
    /// Pasted vocabulary block to parse and save
    BatchInput {
        text: String,
        source: ParseSource,
    },
    ShowScreen(Screen),
    ShowMessage(String),
    BackendReady,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseSource {
    Local,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    SwitchView(View),
    StartQuiz {
        source: QuizSource,
        /// Ask the remote assistant for this many questions instead
        remote_count: Option<usize>,
    },
    StartUnscramble(QuizSource),
    SelectOption(usize),
    PickLetter(usize),
    RemoveLetter(usize),
    ClearLetters,
    SubmitLetters,
    Next,
    Restart,
    FlipCard,
    NextCard,
    PrevCard,
    ShuffleCards,
    Refresh,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    List,
    Quiz,
    Unscramble,
    Flashcard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Everything the UI needs to draw the active view
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Vocabulary(Vec<VocabularyEntry>),
    Lobby(LobbyScreen),
    Question(QuestionScreen),
    Puzzle(PuzzleScreen),
    Finished { view: View, outcome: SessionOutcome },
    Card(CardScreen),
    EmptyDeck,
}

/// Idle state of the quiz and unscramble views
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobbyScreen {
    pub view: View,
    pub entry_count: usize,
    pub can_start: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionScreen {
    pub number: usize,
    pub total: usize,
    pub prompt: String,
    pub options: Vec<String>,
    pub feedback: Option<Feedback>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleScreen {
    pub number: usize,
    pub total: usize,
    pub meaning: String,
    pub available: Vec<String>,
    pub picked: Vec<String>,
    /// Picked letters rendered with contextual joining
    pub preview: String,
    pub feedback: Option<Feedback>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub selected: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardScreen {
    pub position: usize,
    pub total: usize,
    pub front: String,
    pub meaning: String,
    pub dual: Option<String>,
    pub plural: Option<String>,
    pub idiom: bool,
    pub flipped: bool,
}
