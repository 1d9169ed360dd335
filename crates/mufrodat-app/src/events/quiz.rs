use std::sync::Arc;

use kanal::AsyncSender;
use mufrodat_assistant::QUIZ_FAILED_MESSAGE;
use mufrodat_core::session::ensure_enough_entries;
use mufrodat_core::store::KeyValueStore;
use mufrodat_types::{AppEvent, QuizSource};

use crate::events::Services;
use crate::state::{AppState, Workspace};

/// Start a local quiz, or a remote one when `remote_count` is set.
///
/// A remote count of zero means the configured default.
pub async fn handle_quiz_start<S: KeyValueStore>(
    state: Arc<AppState>,
    workspace: &mut Workspace<S>,
    services: &Services,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    source: QuizSource,
    remote_count: Option<usize>,
) -> anyhow::Result<()> {
    let Some(requested) = remote_count else {
        let Workspace { book, study, rng } = workspace;
        if let Err(e) = study.start_quiz(source, book.entries(), rng) {
            tracing::debug!("Local quiz not started: {}", e);
        }
        return Ok(());
    };

    let Some(assistant) = services.assistant.as_ref() else {
        tracing::warn!("Remote quiz requested but no assistant is configured");
        app_to_ui_tx
            .send(AppEvent::ShowMessage(
                "The assistant is not configured. Set GEMINI_API_KEY to use it.".to_string(),
            ))
            .await?;
        return Ok(());
    };

    let count = if requested == 0 {
        state.config.read().await.quiz.remote_questions.max(1)
    } else {
        requested
    };
    let min_entries = workspace.study.config().min_entries;

    let entries = workspace.book.entries().to_vec();
    if let Err(e) = ensure_enough_entries(entries.len(), min_entries) {
        app_to_ui_tx.send(AppEvent::ShowMessage(e.to_string())).await?;
        return Ok(());
    }

    tracing::info!("Requesting {} quiz questions from {}", count, assistant.metadata().name);
    app_to_ui_tx
        .send(AppEvent::ShowMessage("Building a quiz with the assistant...".to_string()))
        .await?;

    match assistant.generate_quiz(&entries, count).await {
        Ok(questions) => {
            tracing::debug!("Assistant returned {} questions", questions.len());
            if let Err(e) = workspace.study.start_remote_quiz(&entries, questions) {
                tracing::warn!("Remote quiz not started: {}", e);
            }
        }
        Err(e) => {
            tracing::warn!("Remote quiz failed: {}", e);
            app_to_ui_tx
                .send(AppEvent::ShowMessage(QUIZ_FAILED_MESSAGE.to_string()))
                .await?;
        }
    }

    Ok(())
}

pub fn handle_option_selected<S: KeyValueStore>(workspace: &mut Workspace<S>, index: usize) {
    match workspace.study.select_option(index) {
        Some(correct) => tracing::debug!("Option {} selected, correct: {}", index, correct),
        None => tracing::debug!("Option {} ignored", index),
    }
}
