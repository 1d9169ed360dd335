use mufrodat_core::store::KeyValueStore;
use mufrodat_types::UiEvent;

use crate::state::Workspace;

pub fn handle_card_event<S: KeyValueStore>(workspace: &mut Workspace<S>, event: UiEvent) {
    match event {
        UiEvent::FlipCard => workspace.study.flip_card(),
        UiEvent::NextCard => workspace.study.next_card(),
        UiEvent::PrevCard => workspace.study.prev_card(),
        UiEvent::ShuffleCards => {
            let Workspace { study, rng, .. } = workspace;
            study.shuffle_cards(rng);
        }
        other => tracing::warn!("Not a card event: {:?}", other),
    }
}
