use mufrodat_core::store::KeyValueStore;
use mufrodat_types::{QuizSource, UiEvent};

use crate::events::Services;
use crate::state::Workspace;

pub fn handle_unscramble_start<S: KeyValueStore>(
    workspace: &mut Workspace<S>,
    services: &Services,
    source: QuizSource,
) {
    let Workspace { book, study, rng } = workspace;
    if let Err(e) =
        study.start_unscramble(source, book.entries(), services.processor.as_ref(), rng)
    {
        tracing::debug!("Unscramble not started: {}", e);
    }
}

/// Board edits and submission for the current puzzle
pub fn handle_letter_event<S: KeyValueStore>(workspace: &mut Workspace<S>, event: UiEvent) {
    let study = &mut workspace.study;

    match event {
        UiEvent::PickLetter(index) => {
            if !study.pick_letter(index) {
                tracing::debug!("Pick {} ignored", index);
            }
        }
        UiEvent::RemoveLetter(index) => {
            if !study.remove_letter(index) {
                tracing::debug!("Remove {} ignored", index);
            }
        }
        UiEvent::ClearLetters => study.clear_letters(),
        UiEvent::SubmitLetters => {
            if let Some(correct) = study.submit_letters() {
                tracing::debug!("Puzzle submitted, correct: {}", correct);
            }
        }
        other => tracing::warn!("Not a letter event: {:?}", other),
    }
}
