use std::collections::HashSet;

use mufrodat_types::{QuestionKind, QuizQuestion, VocabularyEntry};
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

/// Other entries needed before an entry can be asked about
pub const MIN_WRONG_POOL: usize = 3;

/// Build one multiple choice question per eligible entry of `source`.
///
/// Wrong options are drawn from `all`. Entries with fewer than
/// [`MIN_WRONG_POOL`] other entries, or with no usable field, are skipped,
/// and so is any question that would end up with fewer than two options.
pub fn generate_quiz<R: Rng + ?Sized>(
    source: &[VocabularyEntry],
    all: &[VocabularyEntry],
    distractors: usize,
    rng: &mut R,
) -> Vec<QuizQuestion> {
    let mut questions = Vec::new();

    for entry in source {
        let pool: Vec<&VocabularyEntry> = all.iter().filter(|other| other.id != entry.id).collect();
        if pool.len() < MIN_WRONG_POOL {
            continue;
        }

        let kinds = applicable_kinds(entry);
        let Some(kind) = kinds.choose(rng).copied() else {
            tracing::debug!("No question kind applies to entry {}", entry.id);
            continue;
        };

        let correct = answer_for(entry, kind).unwrap_or_default().to_string();
        let mut seen = HashSet::new();
        let mut wrong: Vec<String> = pool
            .iter()
            .filter_map(|other| answer_for(other, kind))
            .filter(|answer| *answer != correct)
            .filter(|answer| seen.insert(*answer))
            .map(str::to_string)
            .collect();
        wrong.shuffle(rng);
        wrong.truncate(distractors);

        let mut options = Vec::with_capacity(wrong.len() + 1);
        options.push(correct.clone());
        options.extend(wrong);

        if options.len() < 2 {
            continue;
        }
        options.shuffle(rng);

        questions.push(QuizQuestion {
            prompt: prompt_for(entry, kind),
            options,
            correct_answer: correct,
            kind,
        });
    }

    tracing::debug!("Generated {} quiz questions from {} entries", questions.len(), source.len());
    questions
}

fn applicable_kinds(entry: &VocabularyEntry) -> Vec<QuestionKind> {
    let mut kinds = Vec::with_capacity(4);

    if !entry.singular().is_empty() && !entry.meaning().is_empty() {
        kinds.push(QuestionKind::SingularToMeaning);
        kinds.push(QuestionKind::MeaningToSingular);
    }
    if entry.plural().is_some() {
        kinds.push(QuestionKind::SingularToPlural);
    }
    if entry.dual().is_some() {
        kinds.push(QuestionKind::SingularToDual);
    }

    kinds
}

/// The field a question kind asks for, `None` when empty
fn answer_for(entry: &VocabularyEntry, kind: QuestionKind) -> Option<&str> {
    let answer = match kind {
        QuestionKind::SingularToMeaning => entry.meaning(),
        QuestionKind::MeaningToSingular => entry.singular(),
        QuestionKind::SingularToPlural => entry.plural()?,
        QuestionKind::SingularToDual => entry.dual()?,
        QuestionKind::Remote => return None,
    };

    if answer.is_empty() { None } else { Some(answer) }
}

fn prompt_for(entry: &VocabularyEntry, kind: QuestionKind) -> String {
    match kind {
        QuestionKind::SingularToMeaning => {
            format!("Apa arti dari kata \"{}\"?", entry.singular())
        }
        QuestionKind::MeaningToSingular => {
            format!("Kata manakah yang memiliki arti \"{}\"?", entry.meaning())
        }
        QuestionKind::SingularToPlural => {
            format!("Apa bentuk jamak' dari kata \"{}\"?", entry.singular())
        }
        QuestionKind::SingularToDual => {
            format!("Apa bentuk mutsanna dari kata \"{}\"?", entry.singular())
        }
        QuestionKind::Remote => String::new(),
    }
}
