use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use mufrodat_core::store::KeyValueStore;
use mufrodat_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::{Services, event_loop};
use crate::state::{AppState, Workspace};
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new(app_to_ui_capacity: usize) -> Self {
        Self {
            app_to_ui: kanal::bounded_async(app_to_ui_capacity.max(1)),
            ui_to_app: kanal::bounded_async(64), // UI interactions
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>, app_to_ui_capacity: usize) -> Self {
        Self {
            channels: ChannelSet::new(app_to_ui_capacity),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Sender for events into the event loop, used to queue startup events
    pub fn ui_sender(&self) -> AsyncSender<AppEvent> {
        self.channels.ui_to_app.0.clone()
    }

    pub fn spawn_tasks<S: KeyValueStore + Sync + 'static>(
        &self,
        workspace: Workspace<S>,
        services: Services,
        input_rx: AsyncReceiver<String>,
    ) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            workspace,
            services,
            self.channels.ui_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.child_token(),
        ));

        // UI loop
        tasks.spawn(ui_loop(
            self.channels.app_to_ui.1.clone(),
            self.channels.ui_to_app.0.clone(),
            input_rx,
            self.state.config.clone(),
            self.cancel_token.child_token(),
        ));

        tasks
    }

    /// Wait for the first task to end, then stop the rest
    pub async fn run_until_closed(
        &self,
        mut tasks: JoinSet<anyhow::Result<()>>,
    ) -> anyhow::Result<()> {
        let mut outcome = Ok(());

        while let Some(result) = tasks.join_next().await {
            self.shutdown();
            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::error!("Task exited with error: {e}");
                    if outcome.is_ok() {
                        outcome = Err(e);
                    }
                }
                Err(e) => {
                    tracing::error!("Task panicked: {e}");
                    if outcome.is_ok() {
                        outcome = Err(e.into());
                    }
                }
            }
        }

        outcome
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
