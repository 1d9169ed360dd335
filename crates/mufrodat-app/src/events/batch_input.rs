use kanal::AsyncSender;
use mufrodat_assistant::{PARSE_FAILED_MESSAGE, VocabularyAssistant};
use mufrodat_core::ValidationError;
use mufrodat_core::parser::parse_batch;
use mufrodat_core::store::KeyValueStore;
use mufrodat_types::{AppEvent, EntryDraft, ParseSource, View};

use crate::events::{Services, send_screen};
use crate::state::Workspace;

/// Turn a pasted block into drafts, locally or through the assistant.
///
/// The error is the message to show; nothing has been saved at that point.
pub async fn parse_drafts(
    text: &str,
    source: ParseSource,
    assistant: Option<&dyn VocabularyAssistant>,
) -> Result<Vec<EntryDraft>, String> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyInput.to_string());
    }

    let drafts = match source {
        ParseSource::Local => parse_batch(text),
        ParseSource::Assistant => {
            let Some(assistant) = assistant else {
                tracing::warn!("Assistant parse requested but no assistant is configured");
                return Err(PARSE_FAILED_MESSAGE.to_string());
            };

            assistant.parse_vocabulary(text).await.map_err(|e| {
                tracing::warn!("Assistant parse failed: {}", e);
                PARSE_FAILED_MESSAGE.to_string()
            })?
        }
    };

    if drafts.is_empty() {
        return Err(ValidationError::NothingFound.to_string());
    }

    Ok(drafts)
}

pub async fn handle_batch_input<S: KeyValueStore>(
    workspace: &mut Workspace<S>,
    services: &Services,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    text: String,
    source: ParseSource,
) -> anyhow::Result<()> {
    tracing::debug!("BatchInput received: {} bytes from {:?}", text.len(), source);

    let drafts = match parse_drafts(&text, source, services.assistant.as_deref()).await {
        Ok(drafts) => drafts,
        Err(message) => {
            app_to_ui_tx.send(AppEvent::ShowMessage(message)).await?;
            return Ok(());
        }
    };

    let message = match workspace.book.add(drafts) {
        Ok(added) => format!("Added {} entries.", added.len()),
        Err(e) => {
            tracing::error!("Failed to save vocabulary: {}", e);
            format!("Could not save the vocabulary: {}", e)
        }
    };
    app_to_ui_tx.send(AppEvent::ShowMessage(message)).await?;

    let Workspace { book, study, rng } = workspace;
    if study.view() == View::Flashcard {
        study.reload_deck(book.entries(), rng);
    }

    send_screen(workspace, services, app_to_ui_tx).await
}
