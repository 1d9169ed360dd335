use mufrodat_types::{UnscrambleQuestion, VocabularyEntry};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::language::LanguageProcessor;

/// Build a letter puzzle for every entry with a singular form.
///
/// A shuffle that reproduces the word is retried once; if the second one
/// also does, the entry is dropped. The returned list is shuffled too.
pub fn generate_unscramble<P, R>(
    source: &[VocabularyEntry],
    processor: &P,
    rng: &mut R,
) -> Vec<UnscrambleQuestion>
where
    P: LanguageProcessor + ?Sized,
    R: Rng + ?Sized,
{
    let mut questions = Vec::new();

    for entry in source {
        let word = entry.singular();
        if word.is_empty() {
            continue;
        }

        // Graded against the normalized units so a picked answer can match
        let letters = processor.tokenize(word);
        let answer = letters.concat();
        let Some(scrambled) = scramble(&letters, &answer, rng) else {
            tracing::debug!("Could not scramble '{}', skipping", word);
            continue;
        };

        questions.push(UnscrambleQuestion {
            correct_answer: answer,
            scrambled,
            meaning: entry.meaning().to_string(),
        });
    }

    questions.shuffle(rng);
    questions
}

fn scramble<R: Rng + ?Sized>(
    letters: &[String],
    answer: &str,
    rng: &mut R,
) -> Option<Vec<String>> {
    for _ in 0..2 {
        let mut shuffled = letters.to_vec();
        shuffled.shuffle(rng);

        if shuffled.concat() != answer {
            return Some(shuffled);
        }
    }

    None
}

/// Letters of the current puzzle split between the pile and the answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterBoard {
    scrambled: Vec<String>,
    available: Vec<String>,
    picked: Vec<String>,
    locked: bool,
}

impl LetterBoard {
    pub fn new(question: &UnscrambleQuestion) -> Self {
        Self {
            scrambled: question.scrambled.clone(),
            available: question.scrambled.clone(),
            picked: Vec::new(),
            locked: false,
        }
    }

    pub fn available(&self) -> &[String] {
        &self.available
    }

    pub fn picked(&self) -> &[String] {
        &self.picked
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Move a pile letter to the end of the answer
    pub fn pick(&mut self, index: usize) -> bool {
        if self.locked || index >= self.available.len() {
            return false;
        }

        let letter = self.available.remove(index);
        self.picked.push(letter);
        true
    }

    /// Put an answer letter back at the end of the pile
    pub fn remove(&mut self, index: usize) -> bool {
        if self.locked || index >= self.picked.len() {
            return false;
        }

        let letter = self.picked.remove(index);
        self.available.push(letter);
        true
    }

    pub fn clear(&mut self) {
        if self.locked {
            return;
        }

        self.available = self.scrambled.clone();
        self.picked.clear();
    }

    pub fn answer(&self) -> String {
        self.picked.concat()
    }

    /// Freeze the board once the answer is submitted
    pub fn lock(&mut self) {
        self.locked = true;
    }
}
