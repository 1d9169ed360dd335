use std::io::BufRead;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use kanal::AsyncReceiver;
use mufrodat_assistant::VocabularyAssistant;
use mufrodat_config::Config;
use mufrodat_core::book::VocabularyBook;
use mufrodat_core::language::LanguageProcessor;
use mufrodat_core::store::FileStore;
use mufrodat_lang_arabic::{ArabicProcessor, GeminiAssistant};
use mufrodat_types::{AppEvent, ParseSource, Theme, UiEvent, View};

pub mod cli;
pub mod commands;
pub mod controller;
pub mod events;
pub mod profile;
pub mod state;
pub mod ui;

#[cfg(test)]
mod tests;

use self::cli::{Cli, Commands};
use self::controller::AppController;
use self::events::Services;
use self::state::{AppState, Workspace};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(error) = init_tracing(cli.quiet, cli.verbose) {
        eprintln!("{error:#}");
    }

    if let Err(error) = run(cli).await {
        eprintln!("Error: {error:#}");
        std::process::exit(1);
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("MUFRODAT_LOG")
        .or_else(|_| tracing_subscriber::EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn build_assistant(config: &Config) -> Option<Arc<dyn VocabularyAssistant>> {
    if !config.assistant.is_usable() {
        tracing::debug!("Assistant disabled or missing an API key");
        return None;
    }

    match GeminiAssistant::from_config(&config.assistant) {
        Ok(assistant) => {
            let meta = assistant.metadata();
            tracing::info!("Assistant ready: {} ({})", meta.name, meta.model);
            Some(Arc::new(assistant))
        }
        Err(e) => {
            tracing::warn!("Failed to create assistant: {}", e);
            None
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = profile::load_config(&cli.profile, cli.data_dir.as_deref())?;
    tracing::debug!("Using profile '{}'", cli.profile);

    let store_dir = config.storage.store_dir();
    let store = FileStore::open(&store_dir)
        .with_context(|| format!("Failed to open store at {}", store_dir.display()))?;
    let mut book = VocabularyBook::load(store).context("Failed to load vocabulary")?;
    let assistant = build_assistant(&config);

    match cli.command {
        Commands::List => println!("{}", commands::list(&book)),
        Commands::Add { file, ai } => {
            let text = commands::read_batch(file.as_deref())?;
            let source = if ai {
                ParseSource::Assistant
            } else {
                ParseSource::Local
            };
            let added = commands::add(&mut book, &text, source, assistant.as_deref()).await?;
            println!("Added {} entries.", added.len());
        }
        Commands::New(args) => {
            let entry = commands::new_entry(&mut book, &args)?;
            println!("Added {}", entry.id);
        }
        Commands::Edit { id, fields } => match commands::edit(&mut book, &id, &fields)? {
            Some(entry) => println!("Updated {}", entry.id),
            None => println!("No entry with id {id}"),
        },
        Commands::Delete { id } => {
            if commands::delete(&mut book, &id)? {
                println!("Deleted {id}");
            } else {
                println!("No entry with id {id}");
            }
        }
        Commands::Settings { theme, font } => {
            let summary =
                commands::settings(book.store_mut(), theme.map(Theme::from), font.as_deref())?;
            println!("{summary}");
        }
        Commands::Fonts => println!("{}", commands::fonts(book.store())?),
        Commands::Quiz { source, ai, count } => {
            let startup = vec![
                UiEvent::SwitchView(View::Quiz),
                UiEvent::StartQuiz {
                    source: source.to_source(config.quiz.quiz_window),
                    remote_count: ai.then(|| count.unwrap_or(0)),
                },
            ];
            run_interactive(config, book, assistant, startup).await?;
        }
        Commands::Unscramble { source } => {
            let startup = vec![
                UiEvent::SwitchView(View::Unscramble),
                UiEvent::StartUnscramble(source.to_source(config.quiz.unscramble_window)),
            ];
            run_interactive(config, book, assistant, startup).await?;
        }
        Commands::Flashcards => {
            let startup = vec![UiEvent::SwitchView(View::Flashcard)];
            run_interactive(config, book, assistant, startup).await?;
        }
    }

    Ok(())
}

async fn run_interactive(
    config: Config,
    book: VocabularyBook<FileStore>,
    assistant: Option<Arc<dyn VocabularyAssistant>>,
    startup: Vec<UiEvent>,
) -> anyhow::Result<()> {
    let workspace = Workspace::new(book, &config);
    let capacity = config.ui_channel_capacity;
    let state = Arc::new(AppState::new(config));
    let processor: Arc<dyn LanguageProcessor> = Arc::new(ArabicProcessor::new());
    tracing::debug!("Language pack: {}", processor.language_code());
    let services = Services {
        processor,
        assistant,
    };

    let controller = AppController::new(state, capacity);
    let ui_tx = controller.ui_sender();
    for event in startup {
        ui_tx.send(AppEvent::UiEvent(event)).await?;
    }

    let tasks = controller.spawn_tasks(workspace, services, spawn_stdin_reader());
    controller.run_until_closed(tasks).await
}

/// Stdin lines, read on a plain thread
fn spawn_stdin_reader() -> AsyncReceiver<String> {
    let (tx, rx) = kanal::bounded::<String>(16);

    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
        tracing::debug!("[INPUT] Stdin closed");
    });

    rx.to_async()
}
