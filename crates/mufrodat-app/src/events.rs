use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use mufrodat_assistant::VocabularyAssistant;
use mufrodat_core::language::LanguageProcessor;
use mufrodat_core::store::KeyValueStore;
use mufrodat_types::{AppEvent, UiEvent};
use tokio_util::sync::CancellationToken;

use crate::state::{AppState, Workspace};

pub mod batch_input;
pub mod flashcard;
pub mod quiz;
pub mod unscramble;

use batch_input::handle_batch_input;
use flashcard::handle_card_event;
use quiz::{handle_option_selected, handle_quiz_start};
use unscramble::{handle_letter_event, handle_unscramble_start};

/// Everything the handlers share besides the workspace
pub struct Services {
    pub processor: Arc<dyn LanguageProcessor>,
    pub assistant: Option<Arc<dyn VocabularyAssistant>>,
}

/// App's main loop, owns all domain state
pub async fn event_loop<S: KeyValueStore + 'static>(
    state: Arc<AppState>,
    mut workspace: Workspace<S>,
    services: Services,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel_token: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    app_to_ui_tx.send(AppEvent::BackendReady).await?;

    loop {
        let event = tokio::select! {
            _ = cancel_token.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                return Ok(());
            }
            event = ui_to_app_rx.recv() => event?,
        };

        tracing::debug!("[EVENT_LOOP] Event received: {:?}", event);
        let keep_running = handle_events(
            state.clone(),
            &mut workspace,
            &services,
            &app_to_ui_tx,
            event,
        )
        .await?;

        if !keep_running {
            tracing::info!("[EVENT_LOOP] Close requested");
            return Ok(());
        }
    }
}

/// Apply one event; `false` means the app should stop
async fn handle_events<S: KeyValueStore>(
    state: Arc<AppState>,
    workspace: &mut Workspace<S>,
    services: &Services,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<bool> {
    match event {
        AppEvent::BatchInput { text, source } => {
            handle_batch_input(workspace, services, app_to_ui_tx, text, source).await?;
        }
        AppEvent::UiEvent(UiEvent::Close) => {
            app_to_ui_tx.send(AppEvent::UiEvent(UiEvent::Close)).await?;
            return Ok(false);
        }
        AppEvent::UiEvent(event) => {
            handle_ui_event(state, workspace, services, app_to_ui_tx, event).await?;
        }
        AppEvent::ShowScreen(_) | AppEvent::ShowMessage(_) | AppEvent::BackendReady => {
            // UI-only events, ignore in backend
        }
    }

    Ok(true)
}

async fn handle_ui_event<S: KeyValueStore>(
    state: Arc<AppState>,
    workspace: &mut Workspace<S>,
    services: &Services,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: UiEvent,
) -> anyhow::Result<()> {
    match event {
        UiEvent::SwitchView(view) => {
            let Workspace { book, study, rng } = workspace;
            study.switch_view(view, book.entries(), rng);
        }
        UiEvent::StartQuiz {
            source,
            remote_count,
        } => {
            handle_quiz_start(state, workspace, services, app_to_ui_tx, source, remote_count)
                .await?;
        }
        UiEvent::StartUnscramble(source) => {
            handle_unscramble_start(workspace, services, source);
        }
        UiEvent::SelectOption(index) => handle_option_selected(workspace, index),
        UiEvent::PickLetter(_)
        | UiEvent::RemoveLetter(_)
        | UiEvent::ClearLetters
        | UiEvent::SubmitLetters => handle_letter_event(workspace, event),
        UiEvent::FlipCard | UiEvent::NextCard | UiEvent::PrevCard | UiEvent::ShuffleCards => {
            handle_card_event(workspace, event)
        }
        UiEvent::Next => workspace.study.next(),
        UiEvent::Restart => workspace.study.restart(),
        // Close is handled before dispatch
        UiEvent::Refresh | UiEvent::Close => {}
    }

    send_screen(workspace, services, app_to_ui_tx).await
}

/// Push the active view to the UI
pub async fn send_screen<S: KeyValueStore>(
    workspace: &Workspace<S>,
    services: &Services,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let screen = workspace
        .study
        .screen(workspace.book.entries(), services.processor.as_ref());
    app_to_ui_tx.send(AppEvent::ShowScreen(screen)).await?;
    Ok(())
}
