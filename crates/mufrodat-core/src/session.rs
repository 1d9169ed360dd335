use mufrodat_types::{Gradable, SessionOutcome};

use crate::error::SessionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Active,
    Finished,
}

/// Progress through one round of questions.
///
/// Only the first answer to each question counts.
#[derive(Debug, Clone)]
pub struct Session<Q> {
    phase: Phase,
    questions: Vec<Q>,
    current: usize,
    correct: usize,
    selected: Option<String>,
}

impl<Q> Default for Session<Q> {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            questions: Vec::new(),
            current: 0,
            correct: 0,
            selected: None,
        }
    }
}

/// Fail unless the collection is large enough to start a session
pub fn ensure_enough_entries(available: usize, required: usize) -> Result<(), SessionError> {
    if available < required {
        return Err(SessionError::NotEnoughEntries {
            required,
            available,
        });
    }
    Ok(())
}

impl<Q: Gradable> Session<Q> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start over with `questions`; an empty list leaves the session idle
    pub fn begin(&mut self, questions: Vec<Q>) -> Result<(), SessionError> {
        if questions.is_empty() {
            return Err(SessionError::NoQuestions);
        }

        *self = Self {
            phase: Phase::Active,
            questions,
            ..Self::default()
        };
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current(&self) -> Option<&Q> {
        match self.phase {
            Phase::Active => self.questions.get(self.current),
            _ => None,
        }
    }

    /// 1-based number of the current question
    pub fn number(&self) -> usize {
        self.current + 1
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Grade `answer` against the current question.
    ///
    /// Returns `None` when there is no current question or it was already answered.
    pub fn answer(&mut self, answer: &str) -> Option<bool> {
        if self.selected.is_some() {
            return None;
        }

        let is_correct = self.current()?.is_correct(answer);
        if is_correct {
            self.correct += 1;
        }
        self.selected = Some(answer.to_string());
        Some(is_correct)
    }

    /// Move on; finishes after the last question
    pub fn advance(&mut self) {
        if self.phase != Phase::Active {
            return;
        }

        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.selected = None;
        } else {
            self.phase = Phase::Finished;
        }
    }

    pub fn restart(&mut self) {
        *self = Self::default();
    }

    pub fn outcome(&self) -> SessionOutcome {
        SessionOutcome::new(self.correct, self.questions.len())
    }
}
