pub mod entry;
pub mod question;
pub mod types;

pub use entry::{EntryDraft, EntryFields, EntryId, EntryKind, IDIOM_NOTE, NounForms, Phrase, VocabularyEntry};
pub use question::{Gradable, QuestionKind, QuizQuestion, QuizSource, SessionOutcome, UnscrambleQuestion};
pub use types::{
    AppEvent, CardScreen, Feedback, LobbyScreen, ParseSource, PuzzleScreen, QuestionScreen, Screen,
    Theme, UiEvent, View,
};
