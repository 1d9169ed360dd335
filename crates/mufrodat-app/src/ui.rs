//! Line based terminal front end.
//!
//! Reads commands from an input channel, turns them into [`UiEvent`]s for
//! the current screen and prints whatever the event loop sends back.

use std::fmt::Write as _;
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use mufrodat_config::Config;
use mufrodat_types::{
    AppEvent, CardScreen, Feedback, LobbyScreen, ParseSource, PuzzleScreen, QuestionScreen,
    QuizSource, Screen, UiEvent, View, VocabularyEntry,
};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

const HELP: &str = "\
Views:  list | quiz | unscramble | cards | refresh | q (quit)
Add:    add (or add ai), paste the block, finish with an empty line
Lobby:  newest | oldest | all | ai (assistant quiz)
Quiz:   <n> choose option n, then enter for the next question
Puzzle: <n> pick letter n, -<n> put it back, c clear, s submit, enter next
Cards:  enter flip, n next, p prev, s shuffle
Done:   r back to the lobby";

/// Lines of a pasted vocabulary block, collected until an empty line
#[derive(Debug)]
pub struct PasteBuffer {
    source: ParseSource,
    lines: Vec<String>,
}

impl PasteBuffer {
    /// `add` starts a local paste, `add ai` one parsed by the assistant
    pub fn start(command: &str) -> Option<Self> {
        let source = match command {
            "add" => ParseSource::Local,
            "add ai" => ParseSource::Assistant,
            _ => return None,
        };
        Some(Self {
            source,
            lines: Vec::new(),
        })
    }

    /// Take one raw line, `true` once the block is complete
    pub fn push(&mut self, line: &str) -> bool {
        if line.trim().is_empty() {
            return true;
        }
        self.lines.push(line.to_string());
        false
    }

    pub fn into_event(self) -> AppEvent {
        AppEvent::BatchInput {
            text: self.lines.join("\n"),
            source: self.source,
        }
    }
}

/// Slice sizes used when the lobby starts a session
#[derive(Debug, Clone, Copy)]
pub struct Windows {
    pub quiz: usize,
    pub unscramble: usize,
}

impl Windows {
    pub fn from_config(config: &Config) -> Self {
        Self {
            quiz: config.quiz.quiz_window,
            unscramble: config.quiz.unscramble_window,
        }
    }
}

pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    input_rx: AsyncReceiver<String>,
    config: Arc<RwLock<Config>>,
    cancel_token: CancellationToken,
) -> anyhow::Result<()> {
    let windows = Windows::from_config(&*config.read().await);
    let mut screen: Option<Screen> = None;
    let mut input_open = true;
    let mut paste: Option<PasteBuffer> = None;

    loop {
        tokio::select! {
            _ = cancel_token.cancelled() => {
                tracing::debug!("[UI] Cancelled");
                return Ok(());
            }
            event = app_to_ui_rx.recv() => {
                match event? {
                    AppEvent::ShowScreen(next) => {
                        println!("{}", render_screen(&next));
                        screen = Some(next);
                    }
                    AppEvent::ShowMessage(message) => println!("{message}"),
                    AppEvent::BackendReady => tracing::debug!("[UI] Backend ready"),
                    AppEvent::UiEvent(UiEvent::Close) => return Ok(()),
                    other => tracing::debug!("[UI] Ignoring {:?}", other),
                }
            }
            line = input_rx.recv(), if input_open => {
                let Ok(line) = line else {
                    // Input closed, same as quitting
                    input_open = false;
                    if let Some(buffer) = paste.take() {
                        ui_to_app_tx.send(buffer.into_event()).await?;
                    }
                    ui_to_app_tx.send(AppEvent::UiEvent(UiEvent::Close)).await?;
                    continue;
                };

                if let Some(buffer) = paste.as_mut() {
                    if buffer.push(&line)
                        && let Some(buffer) = paste.take()
                    {
                        ui_to_app_tx.send(buffer.into_event()).await?;
                    }
                    continue;
                }

                let command = line.trim();
                if let Some(buffer) = PasteBuffer::start(command) {
                    println!("Paste the vocabulary, finish with an empty line.");
                    paste = Some(buffer);
                    continue;
                }
                if matches!(command, "?" | "h" | "help") {
                    println!("{HELP}");
                    continue;
                }

                match parse_command(command, screen.as_ref(), windows) {
                    Some(event) => ui_to_app_tx.send(AppEvent::UiEvent(event)).await?,
                    None => println!("Unknown command '{command}', type ? for help"),
                }
            }
        }
    }
}

/// Map one input line to an event for the screen on display
pub fn parse_command(command: &str, screen: Option<&Screen>, windows: Windows) -> Option<UiEvent> {
    match command {
        "q" | "quit" | "exit" => return Some(UiEvent::Close),
        "refresh" => return Some(UiEvent::Refresh),
        "list" => return Some(UiEvent::SwitchView(View::List)),
        "quiz" => return Some(UiEvent::SwitchView(View::Quiz)),
        "unscramble" => return Some(UiEvent::SwitchView(View::Unscramble)),
        "cards" | "flashcards" => return Some(UiEvent::SwitchView(View::Flashcard)),
        _ => {}
    }

    match screen? {
        Screen::Lobby(lobby) => lobby_command(command, lobby.view, windows),
        Screen::Question(question) => match command {
            "" | "n" | "next" if question.feedback.is_some() => Some(UiEvent::Next),
            _ => option_index(command, question.options.len()).map(UiEvent::SelectOption),
        },
        Screen::Puzzle(puzzle) => match command {
            "c" | "clear" => Some(UiEvent::ClearLetters),
            "s" | "submit" => Some(UiEvent::SubmitLetters),
            "" | "n" | "next" if puzzle.feedback.is_some() => Some(UiEvent::Next),
            _ => match command.strip_prefix('-') {
                Some(rest) => option_index(rest, puzzle.picked.len()).map(UiEvent::RemoveLetter),
                None => option_index(command, puzzle.available.len()).map(UiEvent::PickLetter),
            },
        },
        Screen::Finished { .. } => match command {
            "r" | "restart" | "" => Some(UiEvent::Restart),
            _ => None,
        },
        Screen::Card(_) => match command {
            "" | "f" | "flip" => Some(UiEvent::FlipCard),
            "n" | "next" => Some(UiEvent::NextCard),
            "p" | "prev" => Some(UiEvent::PrevCard),
            "s" | "shuffle" => Some(UiEvent::ShuffleCards),
            _ => None,
        },
        Screen::Vocabulary(_) | Screen::EmptyDeck => None,
    }
}

fn lobby_command(command: &str, view: View, windows: Windows) -> Option<UiEvent> {
    let window = match view {
        View::Unscramble => windows.unscramble,
        _ => windows.quiz,
    };
    let source = match command {
        "newest" | "" => QuizSource::Newest(window),
        "oldest" => QuizSource::Oldest(window),
        "all" => QuizSource::All,
        "ai" if view == View::Quiz => {
            return Some(UiEvent::StartQuiz {
                source: QuizSource::All,
                remote_count: Some(0),
            });
        }
        _ => return None,
    };

    match view {
        View::Quiz => Some(UiEvent::StartQuiz {
            source,
            remote_count: None,
        }),
        View::Unscramble => Some(UiEvent::StartUnscramble(source)),
        View::List | View::Flashcard => None,
    }
}

/// 1-based index typed by the user
fn option_index(command: &str, len: usize) -> Option<usize> {
    let n: usize = command.parse().ok()?;
    (1..=len).contains(&n).then(|| n - 1)
}

pub fn render_screen(screen: &Screen) -> String {
    match screen {
        Screen::Vocabulary(entries) => render_entries(entries),
        Screen::Lobby(lobby) => render_lobby(lobby),
        Screen::Question(question) => render_question(question),
        Screen::Puzzle(puzzle) => render_puzzle(puzzle),
        Screen::Finished { view, outcome } => {
            let title = match view {
                View::Unscramble => "Unscramble finished",
                _ => "Quiz finished",
            };
            format!(
                "{title}: {} / {} correct ({}%)\n[r] back to the lobby",
                outcome.correct, outcome.total, outcome.percentage
            )
        }
        Screen::Card(card) => render_card(card),
        Screen::EmptyDeck => "No vocabulary yet. Add some entries to use flashcards.".to_string(),
    }
}

/// Plain listing, also used by the `list` command
pub fn render_entries(entries: &[VocabularyEntry]) -> String {
    if entries.is_empty() {
        return "No vocabulary saved yet.".to_string();
    }

    let mut out = String::new();
    for entry in entries {
        let _ = write!(out, "{}  {}", entry.id, entry.singular());
        if let Some(dual) = entry.dual() {
            let _ = write!(out, " | {dual}");
        }
        if let Some(plural) = entry.plural() {
            let _ = write!(out, " | {plural}");
        }
        let _ = write!(out, "  = {}", entry.meaning());
        if entry.is_idiom() {
            out.push_str("  [Islahul Lughoh]");
        } else if !entry.kind.notes().is_empty() {
            let _ = write!(out, "  ({})", entry.kind.notes());
        }
        out.push('\n');
    }
    let _ = write!(out, "{} entries", entries.len());
    out
}

fn render_lobby(lobby: &LobbyScreen) -> String {
    let title = match lobby.view {
        View::Unscramble => "Unscramble",
        _ => "Quiz",
    };
    let mut out = format!("{title}: {} entries saved.", lobby.entry_count);

    if let Some(error) = &lobby.error {
        let _ = write!(out, "\n{error}");
    }
    if lobby.can_start {
        out.push_str("\nStart with: newest | oldest | all");
        if lobby.view == View::Quiz {
            out.push_str(" | ai");
        }
    } else {
        out.push_str("\nAdd at least 5 entries to start.");
    }
    out
}

fn render_feedback(out: &mut String, feedback: Option<&Feedback>) {
    if let Some(feedback) = feedback {
        if feedback.is_correct {
            out.push_str("\nCorrect!");
        } else {
            let _ = write!(out, "\nWrong. The answer is {}", feedback.correct_answer);
        }
        out.push_str("\n[enter] next");
    }
}

fn render_question(question: &QuestionScreen) -> String {
    let mut out = format!(
        "Question {} / {}\n{}",
        question.number, question.total, question.prompt
    );
    for (i, option) in question.options.iter().enumerate() {
        let marker = match &question.feedback {
            Some(f) if *option == f.correct_answer => "*",
            Some(f) if *option == f.selected => "x",
            _ => " ",
        };
        let _ = write!(out, "\n {marker} {}) {option}", i + 1);
    }
    render_feedback(&mut out, question.feedback.as_ref());
    out
}

fn render_puzzle(puzzle: &PuzzleScreen) -> String {
    let mut out = format!("Puzzle {} / {}", puzzle.number, puzzle.total);
    if !puzzle.meaning.is_empty() {
        let _ = write!(out, "\nMeaning: {}", puzzle.meaning);
    }
    let _ = write!(out, "\nAnswer: {}", puzzle.preview);

    let letters: Vec<String> = puzzle
        .available
        .iter()
        .enumerate()
        .map(|(i, letter)| format!("{}:{letter}", i + 1))
        .collect();
    let _ = write!(out, "\nLetters: {}", letters.join("  "));
    render_feedback(&mut out, puzzle.feedback.as_ref());
    out
}

fn render_card(card: &CardScreen) -> String {
    let mut out = format!("Card {} / {}\n{}", card.position, card.total, card.front);

    if card.flipped {
        let _ = write!(out, "\n= {}", card.meaning);
        if !card.idiom {
            if let Some(dual) = &card.dual {
                let _ = write!(out, "\nMutsanna: {dual}");
            }
            if let Some(plural) = &card.plural {
                let _ = write!(out, "\nJamak: {plural}");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mufrodat_types::SessionOutcome;

    const WINDOWS: Windows = Windows {
        quiz: 5,
        unscramble: 10,
    };

    fn question(feedback: Option<Feedback>) -> Screen {
        Screen::Question(QuestionScreen {
            number: 1,
            total: 3,
            prompt: "Apa arti dari kata \"كِتَابٌ\"?".to_string(),
            options: vec!["buku".into(), "pena".into(), "rumah".into()],
            feedback,
        })
    }

    #[test]
    fn test_lobby_commands_use_view_window() {
        let lobby = |view| {
            Screen::Lobby(LobbyScreen {
                view,
                entry_count: 12,
                can_start: true,
                error: None,
            })
        };

        assert_eq!(
            parse_command("oldest", Some(&lobby(View::Quiz)), WINDOWS),
            Some(UiEvent::StartQuiz {
                source: QuizSource::Oldest(5),
                remote_count: None
            })
        );
        assert_eq!(
            parse_command("newest", Some(&lobby(View::Unscramble)), WINDOWS),
            Some(UiEvent::StartUnscramble(QuizSource::Newest(10)))
        );
        assert_eq!(parse_command("ai", Some(&lobby(View::Unscramble)), WINDOWS), None);
    }

    #[test]
    fn test_question_commands() {
        assert_eq!(
            parse_command("2", Some(&question(None)), WINDOWS),
            Some(UiEvent::SelectOption(1))
        );
        assert_eq!(parse_command("4", Some(&question(None)), WINDOWS), None);
        assert_eq!(parse_command("", Some(&question(None)), WINDOWS), None);

        let answered = question(Some(Feedback {
            selected: "pena".into(),
            correct_answer: "buku".into(),
            is_correct: false,
        }));
        assert_eq!(parse_command("", Some(&answered), WINDOWS), Some(UiEvent::Next));
    }

    #[test]
    fn test_puzzle_commands() {
        let puzzle = Screen::Puzzle(PuzzleScreen {
            number: 1,
            total: 1,
            meaning: "pena".into(),
            available: vec!["م".into(), "ل".into()],
            picked: vec!["ق".into()],
            preview: "ق".into(),
            feedback: None,
        });

        assert_eq!(parse_command("2", Some(&puzzle), WINDOWS), Some(UiEvent::PickLetter(1)));
        assert_eq!(parse_command("-1", Some(&puzzle), WINDOWS), Some(UiEvent::RemoveLetter(0)));
        assert_eq!(parse_command("-2", Some(&puzzle), WINDOWS), None);
        assert_eq!(parse_command("s", Some(&puzzle), WINDOWS), Some(UiEvent::SubmitLetters));
    }

    #[test]
    fn test_global_commands_work_anywhere() {
        assert_eq!(parse_command("q", None, WINDOWS), Some(UiEvent::Close));
        assert_eq!(
            parse_command("cards", Some(&question(None)), WINDOWS),
            Some(UiEvent::SwitchView(View::Flashcard))
        );
        assert_eq!(parse_command("1", None, WINDOWS), None);
    }

    #[test]
    fn test_render_question_marks_answers() {
        let answered = question(Some(Feedback {
            selected: "pena".into(),
            correct_answer: "buku".into(),
            is_correct: false,
        }));
        let text = render_screen(&answered);

        assert!(text.starts_with("Question 1 / 3"));
        assert!(text.contains(" * 1) buku"));
        assert!(text.contains(" x 2) pena"));
        assert!(text.contains("Wrong. The answer is buku"));
    }

    #[test]
    fn test_render_idiom_card_back_shows_meaning_only() {
        let card = Screen::Card(CardScreen {
            position: 2,
            total: 4,
            front: "قُمْ".into(),
            meaning: "Berdirilah.".into(),
            dual: None,
            plural: None,
            idiom: true,
            flipped: true,
        });
        let text = render_screen(&card);

        assert_eq!(text, "Card 2 / 4\nقُمْ\n= Berdirilah.");
    }

    #[test]
    fn test_paste_buffer_collects_until_empty_line() {
        assert!(PasteBuffer::start("add more").is_none());

        let mut buffer = PasteBuffer::start("add ai").unwrap();
        assert!(!buffer.push("- كِتَابٌ - كُتُبٌ"));
        assert!(!buffer.push("  buku"));
        assert!(buffer.push("   "));

        let AppEvent::BatchInput { text, source } = buffer.into_event() else {
            panic!("expected a batch");
        };
        assert_eq!(text, "- كِتَابٌ - كُتُبٌ\n  buku");
        assert_eq!(source, ParseSource::Assistant);
    }

    #[test]
    fn test_render_finished() {
        let text = render_screen(&Screen::Finished {
            view: View::Quiz,
            outcome: SessionOutcome::new(2, 3),
        });
        assert!(text.starts_with("Quiz finished: 2 / 3 correct (67%)"));
    }
}
