use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use mufrodat_assistant::{
    AssistError, ProviderMetadata, QUIZ_FAILED_MESSAGE, VocabularyAssistant,
};
use mufrodat_config::Config;
use mufrodat_core::book::VocabularyBook;
use mufrodat_core::language::PlainProcessor;
use mufrodat_core::store::MemoryStore;
use mufrodat_lang_arabic::ArabicProcessor;
use mufrodat_types::{
    AppEvent, EntryDraft, EntryKind, ParseSource, QuestionKind, QuizQuestion, QuizSource, Screen,
    UiEvent, View, VocabularyEntry,
};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::events::{Services, event_loop};
use crate::state::{AppState, Workspace};

/// Canned assistant, `None` makes every call fail
struct FakeAssistant {
    questions: Option<Vec<QuizQuestion>>,
}

#[async_trait::async_trait]
impl VocabularyAssistant for FakeAssistant {
    async fn parse_vocabulary(&self, _text: &str) -> Result<Vec<EntryDraft>, AssistError> {
        Ok(vec![EntryKind::noun("شَمْسٌ", "", "", "matahari")])
    }

    async fn generate_quiz(
        &self,
        _entries: &[VocabularyEntry],
        count: usize,
    ) -> Result<Vec<QuizQuestion>, AssistError> {
        match &self.questions {
            Some(questions) => Ok(questions.iter().take(count).cloned().collect()),
            None => Err(AssistError::ApiError("quota".to_string())),
        }
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "fake".to_string(),
            model: "fake-1".to_string(),
        }
    }
}

struct Harness {
    ui_tx: AsyncSender<AppEvent>,
    app_rx: AsyncReceiver<AppEvent>,
    handle: JoinHandle<anyhow::Result<()>>,
}

impl Harness {
    async fn send(&self, event: UiEvent) {
        self.ui_tx
            .send(AppEvent::UiEvent(event))
            .await
            .expect("send failed");
    }

    async fn next(&self) -> AppEvent {
        match timeout(Duration::from_secs(2), self.app_rx.recv()).await {
            Ok(Ok(event)) => event,
            Ok(Err(e)) => panic!("Channel error: {}", e),
            Err(_) => panic!("Timeout waiting for the event loop"),
        }
    }

    /// Messages received before the next screen, and that screen
    async fn until_screen(&self) -> (Vec<String>, Screen) {
        let mut messages = Vec::new();
        loop {
            match self.next().await {
                AppEvent::ShowScreen(screen) => return (messages, screen),
                AppEvent::ShowMessage(message) => messages.push(message),
                other => panic!("Unexpected event: {:?}", other),
            }
        }
    }
}

fn nouns(count: usize) -> Vec<EntryDraft> {
    let words = [
        ("كِتَابٌ", "buku"),
        ("قَلَمٌ", "pena"),
        ("بَيْتٌ", "rumah"),
        ("بَابٌ", "pintu"),
        ("مَسْجِدٌ", "masjid"),
        ("وَلَدٌ", "anak"),
    ];
    words
        .iter()
        .take(count)
        .map(|(word, meaning)| EntryKind::noun(*word, "", "", *meaning))
        .collect()
}

async fn start(
    drafts: Vec<EntryDraft>,
    processor: Arc<dyn mufrodat_core::language::LanguageProcessor>,
    assistant: Option<Arc<dyn VocabularyAssistant>>,
) -> Harness {
    let config = Config::default();
    let mut book = VocabularyBook::load(MemoryStore::new()).unwrap();
    book.add(drafts).unwrap();

    let workspace = Workspace::with_seed(book, &config, 7);
    let state = Arc::new(AppState::new(config));
    let services = Services {
        processor,
        assistant,
    };

    let (ui_tx, ui_rx) = kanal::bounded_async(16);
    let (app_tx, app_rx) = kanal::bounded_async(16);
    let handle = tokio::spawn(event_loop(
        state,
        workspace,
        services,
        ui_rx,
        app_tx,
        CancellationToken::new(),
    ));

    let harness = Harness {
        ui_tx,
        app_rx,
        handle,
    };
    assert!(matches!(harness.next().await, AppEvent::BackendReady));
    harness
}

#[tokio::test]
async fn test_batch_input_adds_entries() {
    let harness = start(Vec::new(), Arc::new(PlainProcessor), None).await;

    harness
        .ui_tx
        .send(AppEvent::BatchInput {
            text: "- كِتَابٌ - كُتُبٌ\nbuku\n- قَلَمٌ\npena".to_string(),
            source: ParseSource::Local,
        })
        .await
        .unwrap();

    let (messages, screen) = harness.until_screen().await;
    assert_eq!(messages, vec!["Added 2 entries.".to_string()]);
    let Screen::Vocabulary(entries) = screen else {
        panic!("Expected the vocabulary list, got {:?}", screen);
    };
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].singular(), "كِتَابٌ");
}

#[tokio::test]
async fn test_batch_input_reloads_flashcards() {
    let harness = start(nouns(1), Arc::new(PlainProcessor), None).await;

    harness.send(UiEvent::SwitchView(View::Flashcard)).await;
    let (_, screen) = harness.until_screen().await;
    assert!(matches!(screen, Screen::Card(c) if c.total == 1));

    harness
        .ui_tx
        .send(AppEvent::BatchInput {
            text: "- قَلَمٌ\npena".to_string(),
            source: ParseSource::Local,
        })
        .await
        .unwrap();

    let (_, screen) = harness.until_screen().await;
    assert!(matches!(screen, Screen::Card(c) if c.total == 2 && c.position == 1));
}

#[tokio::test]
async fn test_batch_input_without_vocabulary_only_reports() {
    let harness = start(nouns(1), Arc::new(PlainProcessor), None).await;

    harness
        .ui_tx
        .send(AppEvent::BatchInput {
            text: "no markers here".to_string(),
            source: ParseSource::Local,
        })
        .await
        .unwrap();

    match harness.next().await {
        AppEvent::ShowMessage(message) => assert!(message.starts_with("No vocabulary found")),
        other => panic!("Unexpected event: {:?}", other),
    }

    harness.send(UiEvent::Refresh).await;
    let (_, screen) = harness.until_screen().await;
    assert!(matches!(screen, Screen::Vocabulary(entries) if entries.len() == 1));
}

#[tokio::test]
async fn test_assistant_batch_input() {
    let assistant: Arc<dyn VocabularyAssistant> = Arc::new(FakeAssistant { questions: None });
    let harness = start(Vec::new(), Arc::new(PlainProcessor), Some(assistant)).await;

    harness
        .ui_tx
        .send(AppEvent::BatchInput {
            text: "matahari = شمس".to_string(),
            source: ParseSource::Assistant,
        })
        .await
        .unwrap();

    let (messages, screen) = harness.until_screen().await;
    assert_eq!(messages, vec!["Added 1 entries.".to_string()]);
    assert!(matches!(screen, Screen::Vocabulary(entries) if entries[0].meaning() == "matahari"));
}

#[tokio::test]
async fn test_quiz_needs_enough_entries() {
    let harness = start(nouns(3), Arc::new(PlainProcessor), None).await;

    harness.send(UiEvent::SwitchView(View::Quiz)).await;
    let (_, lobby) = harness.until_screen().await;
    assert!(matches!(lobby, Screen::Lobby(ref l) if !l.can_start && l.error.is_none()));

    harness
        .send(UiEvent::StartQuiz {
            source: QuizSource::All,
            remote_count: None,
        })
        .await;
    let (_, screen) = harness.until_screen().await;
    let Screen::Lobby(lobby) = screen else {
        panic!("Expected the lobby, got {:?}", screen);
    };
    assert_eq!(lobby.entry_count, 3);
    assert!(lobby.error.is_some());
}

#[tokio::test]
async fn test_local_quiz_flow() {
    let harness = start(nouns(5), Arc::new(PlainProcessor), None).await;

    harness.send(UiEvent::SwitchView(View::Quiz)).await;
    harness.until_screen().await;
    harness
        .send(UiEvent::StartQuiz {
            source: QuizSource::Newest(5),
            remote_count: None,
        })
        .await;

    let (_, screen) = harness.until_screen().await;
    let Screen::Question(question) = screen else {
        panic!("Expected a question, got {:?}", screen);
    };
    assert_eq!(question.number, 1);
    assert_eq!(question.total, 5);
    assert!(question.feedback.is_none());

    harness.send(UiEvent::SelectOption(0)).await;
    let (_, screen) = harness.until_screen().await;
    let Screen::Question(answered) = screen else {
        panic!("Expected a question, got {:?}", screen);
    };
    let feedback = answered.feedback.expect("feedback after answering");
    assert_eq!(feedback.selected, answered.options[0]);

    harness.send(UiEvent::Next).await;
    let (_, screen) = harness.until_screen().await;
    assert!(matches!(screen, Screen::Question(q) if q.number == 2 && q.feedback.is_none()));
}

#[tokio::test]
async fn test_remote_quiz_failure_keeps_lobby() {
    let assistant: Arc<dyn VocabularyAssistant> = Arc::new(FakeAssistant { questions: None });
    let harness = start(nouns(5), Arc::new(PlainProcessor), Some(assistant)).await;

    harness.send(UiEvent::SwitchView(View::Quiz)).await;
    harness.until_screen().await;
    harness
        .send(UiEvent::StartQuiz {
            source: QuizSource::All,
            remote_count: Some(0),
        })
        .await;

    let (messages, screen) = harness.until_screen().await;
    assert_eq!(messages.last().map(String::as_str), Some(QUIZ_FAILED_MESSAGE));
    assert!(matches!(screen, Screen::Lobby(_)));
}

#[tokio::test]
async fn test_remote_quiz_uses_assistant_questions() {
    let question = QuizQuestion {
        prompt: "What is the plural of كِتَابٌ?".to_string(),
        options: vec!["كُتُبٌ".to_string(), "أَقْلَامٌ".to_string()],
        correct_answer: "كُتُبٌ".to_string(),
        kind: QuestionKind::Remote,
    };
    let assistant: Arc<dyn VocabularyAssistant> = Arc::new(FakeAssistant {
        questions: Some(vec![question.clone(), question]),
    });
    let harness = start(nouns(5), Arc::new(PlainProcessor), Some(assistant)).await;

    harness.send(UiEvent::SwitchView(View::Quiz)).await;
    harness.until_screen().await;
    harness
        .send(UiEvent::StartQuiz {
            source: QuizSource::All,
            remote_count: Some(1),
        })
        .await;

    let (_, screen) = harness.until_screen().await;
    let Screen::Question(first) = screen else {
        panic!("Expected a question, got {:?}", screen);
    };
    assert_eq!(first.total, 1);

    harness.send(UiEvent::SelectOption(0)).await;
    let (_, screen) = harness.until_screen().await;
    assert!(matches!(screen, Screen::Question(q) if q.feedback.as_ref().is_some_and(|f| f.is_correct)));

    harness.send(UiEvent::Next).await;
    let (_, screen) = harness.until_screen().await;
    let Screen::Finished { view, outcome } = screen else {
        panic!("Expected the summary, got {:?}", screen);
    };
    assert_eq!(view, View::Quiz);
    assert_eq!((outcome.correct, outcome.total), (1, 1));
}

#[tokio::test]
async fn test_remote_quiz_without_assistant() {
    let harness = start(nouns(5), Arc::new(PlainProcessor), None).await;

    harness
        .send(UiEvent::StartQuiz {
            source: QuizSource::All,
            remote_count: Some(3),
        })
        .await;

    let (messages, _) = harness.until_screen().await;
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("GEMINI_API_KEY"));
}

#[tokio::test]
async fn test_unscramble_letter_picking() {
    let harness = start(nouns(5), Arc::new(ArabicProcessor::new()), None).await;

    harness.send(UiEvent::SwitchView(View::Unscramble)).await;
    harness.until_screen().await;
    harness.send(UiEvent::StartUnscramble(QuizSource::All)).await;

    let (_, screen) = harness.until_screen().await;
    let Screen::Puzzle(puzzle) = screen else {
        panic!("Expected a puzzle, got {:?}", screen);
    };
    assert!(puzzle.picked.is_empty());
    let letter = puzzle.available[0].clone();
    let letters = puzzle.available.len();

    harness.send(UiEvent::PickLetter(0)).await;
    let (_, screen) = harness.until_screen().await;
    let Screen::Puzzle(picked) = screen else {
        panic!("Expected a puzzle, got {:?}", screen);
    };
    assert_eq!(picked.picked, vec![letter]);
    assert_eq!(picked.available.len(), letters - 1);
    assert!(!picked.preview.is_empty());

    harness.send(UiEvent::ClearLetters).await;
    let (_, screen) = harness.until_screen().await;
    assert!(matches!(screen, Screen::Puzzle(p) if p.picked.is_empty()));
}

#[tokio::test]
async fn test_flashcards_flip_and_move() {
    let harness = start(nouns(3), Arc::new(PlainProcessor), None).await;

    harness.send(UiEvent::SwitchView(View::Flashcard)).await;
    let (_, screen) = harness.until_screen().await;
    let Screen::Card(card) = screen else {
        panic!("Expected a card, got {:?}", screen);
    };
    assert_eq!((card.position, card.total), (1, 3));
    assert!(!card.flipped);

    harness.send(UiEvent::FlipCard).await;
    let (_, screen) = harness.until_screen().await;
    assert!(matches!(screen, Screen::Card(c) if c.flipped));

    harness.send(UiEvent::PrevCard).await;
    let (_, screen) = harness.until_screen().await;
    assert!(matches!(screen, Screen::Card(c) if c.position == 3 && !c.flipped));
}

#[tokio::test]
async fn test_flashcards_empty_deck() {
    let harness = start(Vec::new(), Arc::new(PlainProcessor), None).await;

    harness.send(UiEvent::SwitchView(View::Flashcard)).await;
    let (_, screen) = harness.until_screen().await;
    assert_eq!(screen, Screen::EmptyDeck);
}

#[tokio::test]
async fn test_close_stops_the_loop() {
    let harness = start(nouns(1), Arc::new(PlainProcessor), None).await;

    harness.send(UiEvent::Close).await;
    assert!(matches!(
        harness.next().await,
        AppEvent::UiEvent(UiEvent::Close)
    ));

    let result = timeout(Duration::from_secs(2), harness.handle)
        .await
        .expect("event loop did not stop")
        .expect("event loop panicked");
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_cancel_stops_the_loop() {
    let config = Config::default();
    let book = VocabularyBook::load(MemoryStore::new()).unwrap();
    let workspace = Workspace::with_seed(book, &config, 1);
    let services = Services {
        processor: Arc::new(PlainProcessor),
        assistant: None,
    };
    let (_ui_tx, ui_rx) = kanal::bounded_async(4);
    let (app_tx, _app_rx) = kanal::bounded_async(4);
    let token = CancellationToken::new();

    let handle = tokio::spawn(event_loop(
        Arc::new(AppState::new(config)),
        workspace,
        services,
        ui_rx,
        app_tx,
        token.child_token(),
    ));
    token.cancel();

    let result = timeout(Duration::from_secs(2), handle)
        .await
        .expect("event loop did not stop")
        .expect("event loop panicked");
    assert!(result.is_ok());
}
