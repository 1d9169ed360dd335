use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionKind {
    SingularToMeaning,
    MeaningToSingular,
    SingularToPlural,
    SingularToDual,
    /// Built by the remote assistant
    Remote,
}

/// Multiple choice question, regenerated for every session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub kind: QuestionKind,
}

/// Letter puzzle for one word or phrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnscrambleQuestion {
    pub correct_answer: String,
    pub scrambled: Vec<String>,
    pub meaning: String,
}

/// Anything a session can grade by comparing answer strings
pub trait Gradable {
    fn correct_answer(&self) -> &str;

    fn is_correct(&self, answer: &str) -> bool {
        answer == self.correct_answer()
    }
}

impl Gradable for QuizQuestion {
    fn correct_answer(&self) -> &str {
        &self.correct_answer
    }
}

impl Gradable for UnscrambleQuestion {
    fn correct_answer(&self) -> &str {
        &self.correct_answer
    }
}

/// Which slice of the collection a session draws from.
///
/// The collection is ordered newest first, so `Newest(n)` takes the head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizSource {
    Newest(usize),
    Oldest(usize),
    All,
}

impl QuizSource {
    pub fn select<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        match *self {
            QuizSource::Newest(n) => &items[..n.min(items.len())],
            QuizSource::Oldest(n) => &items[items.len().saturating_sub(n)..],
            QuizSource::All => items,
        }
    }
}

/// Final score of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub correct: usize,
    pub total: usize,
    pub percentage: u32,
}

impl SessionOutcome {
    pub fn new(correct: usize, total: usize) -> Self {
        let percentage = if total == 0 {
            0
        } else {
            (100.0 * correct as f64 / total as f64).round() as u32
        };

        Self {
            correct,
            total,
            percentage,
        }
    }
}
