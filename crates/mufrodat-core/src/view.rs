//! State behind the study views.
//!
//! One [`StudyState`] owns the quiz and unscramble sessions, the letter
//! board and the flashcard deck. Leaving a view throws its progress away.

use mufrodat_config::quiz::QuizConfig;
use mufrodat_types::{
    CardScreen, Feedback, LobbyScreen, PuzzleScreen, QuestionScreen, QuizQuestion, QuizSource,
    Screen, UnscrambleQuestion, View, VocabularyEntry,
};
use rand::Rng;

use crate::error::SessionError;
use crate::flashcard::Deck;
use crate::language::LanguageProcessor;
use crate::quiz::generate_quiz;
use crate::session::{Phase, Session, ensure_enough_entries};
use crate::unscramble::{LetterBoard, generate_unscramble};

#[derive(Debug, Clone, Default)]
pub struct StudyState {
    view: View,
    config: QuizConfig,
    quiz: Session<QuizQuestion>,
    unscramble: Session<UnscrambleQuestion>,
    board: Option<LetterBoard>,
    deck: Deck,
    lobby_error: Option<String>,
}

impl StudyState {
    pub fn new(config: QuizConfig) -> Self {
        Self {
            config: config.clamped(),
            ..Self::default()
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn quiz(&self) -> &Session<QuizQuestion> {
        &self.quiz
    }

    pub fn unscramble(&self) -> &Session<UnscrambleQuestion> {
        &self.unscramble
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Change view, dropping any session in progress
    pub fn switch_view<R: Rng + ?Sized>(
        &mut self,
        view: View,
        entries: &[VocabularyEntry],
        rng: &mut R,
    ) {
        tracing::debug!("Switching view {:?} -> {:?}", self.view, view);

        self.quiz.restart();
        self.unscramble.restart();
        self.board = None;
        self.lobby_error = None;
        if view == View::Flashcard {
            self.deck = Deck::new(entries, rng);
        }
        self.view = view;
    }

    pub fn start_quiz<R: Rng + ?Sized>(
        &mut self,
        source: QuizSource,
        entries: &[VocabularyEntry],
        rng: &mut R,
    ) -> Result<(), SessionError> {
        let result = ensure_enough_entries(entries.len(), self.config.min_entries).and_then(|_| {
            let questions =
                generate_quiz(source.select(entries), entries, self.config.distractors, rng);
            self.quiz.begin(questions)
        });
        self.settle(View::Quiz, result)
    }

    /// Start a quiz from questions the assistant built
    pub fn start_remote_quiz(
        &mut self,
        entries: &[VocabularyEntry],
        questions: Vec<QuizQuestion>,
    ) -> Result<(), SessionError> {
        let result = ensure_enough_entries(entries.len(), self.config.min_entries)
            .and_then(|_| self.quiz.begin(questions));
        self.settle(View::Quiz, result)
    }

    pub fn start_unscramble<P, R>(
        &mut self,
        source: QuizSource,
        entries: &[VocabularyEntry],
        processor: &P,
        rng: &mut R,
    ) -> Result<(), SessionError>
    where
        P: LanguageProcessor + ?Sized,
        R: Rng + ?Sized,
    {
        let result = ensure_enough_entries(entries.len(), self.config.min_entries).and_then(|_| {
            let questions = generate_unscramble(source.select(entries), processor, rng);
            self.unscramble.begin(questions)
        });
        let result = self.settle(View::Unscramble, result);
        self.reset_board();
        result
    }

    fn settle(
        &mut self,
        view: View,
        result: Result<(), SessionError>,
    ) -> Result<(), SessionError> {
        self.view = view;
        self.lobby_error = result.as_ref().err().map(ToString::to_string);
        if let Err(e) = &result {
            tracing::debug!("Session did not start: {}", e);
        }
        result
    }

    fn reset_board(&mut self) {
        self.board = self.unscramble.current().map(LetterBoard::new);
    }

    /// Answer the current multiple choice question by option index
    pub fn select_option(&mut self, index: usize) -> Option<bool> {
        let option = self.quiz.current()?.options.get(index)?.clone();
        self.quiz.answer(&option)
    }

    pub fn pick_letter(&mut self, index: usize) -> bool {
        self.board.as_mut().is_some_and(|board| board.pick(index))
    }

    pub fn remove_letter(&mut self, index: usize) -> bool {
        self.board.as_mut().is_some_and(|board| board.remove(index))
    }

    pub fn clear_letters(&mut self) {
        if let Some(board) = self.board.as_mut() {
            board.clear();
        }
    }

    /// Grade the assembled letters and lock the board
    pub fn submit_letters(&mut self) -> Option<bool> {
        let board = self.board.as_mut()?;
        if board.is_locked() {
            return None;
        }

        let answer = board.answer();
        let result = self.unscramble.answer(&answer);
        if result.is_some() {
            board.lock();
        }
        result
    }

    /// Go to the next question of the active session
    pub fn next(&mut self) {
        match self.view {
            View::Quiz => self.quiz.advance(),
            View::Unscramble => {
                self.unscramble.advance();
                self.reset_board();
            }
            View::Flashcard => self.deck.next(),
            View::List => {}
        }
    }

    /// Back to the lobby of the current view
    pub fn restart(&mut self) {
        match self.view {
            View::Quiz => self.quiz.restart(),
            View::Unscramble => {
                self.unscramble.restart();
                self.board = None;
            }
            View::Flashcard | View::List => {}
        }
        self.lobby_error = None;
    }

    pub fn flip_card(&mut self) {
        self.deck.flip();
    }

    pub fn next_card(&mut self) {
        self.deck.next();
    }

    pub fn prev_card(&mut self) {
        self.deck.prev();
    }

    pub fn shuffle_cards<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.deck.shuffle(rng);
    }

    /// Rebuild the deck after the collection changed
    pub fn reload_deck<R: Rng + ?Sized>(&mut self, entries: &[VocabularyEntry], rng: &mut R) {
        self.deck = Deck::new(entries, rng);
    }

    /// Snapshot of the active view for rendering
    pub fn screen<P: LanguageProcessor + ?Sized>(
        &self,
        entries: &[VocabularyEntry],
        processor: &P,
    ) -> Screen {
        match self.view {
            View::List => Screen::Vocabulary(entries.to_vec()),
            View::Quiz => self.quiz_screen(entries),
            View::Unscramble => self.puzzle_screen(entries, processor),
            View::Flashcard => self.card_screen(),
        }
    }

    fn lobby(&self, entries: &[VocabularyEntry]) -> Screen {
        Screen::Lobby(LobbyScreen {
            view: self.view,
            entry_count: entries.len(),
            can_start: entries.len() >= self.config.min_entries,
            error: self.lobby_error.clone(),
        })
    }

    fn quiz_screen(&self, entries: &[VocabularyEntry]) -> Screen {
        match self.quiz.phase() {
            Phase::Idle => self.lobby(entries),
            Phase::Finished => Screen::Finished {
                view: View::Quiz,
                outcome: self.quiz.outcome(),
            },
            Phase::Active => match self.quiz.current() {
                Some(question) => Screen::Question(QuestionScreen {
                    number: self.quiz.number(),
                    total: self.quiz.total(),
                    prompt: question.prompt.clone(),
                    options: question.options.clone(),
                    feedback: feedback(self.quiz.selected(), &question.correct_answer),
                }),
                None => self.lobby(entries),
            },
        }
    }

    fn puzzle_screen<P: LanguageProcessor + ?Sized>(
        &self,
        entries: &[VocabularyEntry],
        processor: &P,
    ) -> Screen {
        match self.unscramble.phase() {
            Phase::Idle => self.lobby(entries),
            Phase::Finished => Screen::Finished {
                view: View::Unscramble,
                outcome: self.unscramble.outcome(),
            },
            Phase::Active => match (self.unscramble.current(), &self.board) {
                (Some(question), Some(board)) => Screen::Puzzle(PuzzleScreen {
                    number: self.unscramble.number(),
                    total: self.unscramble.total(),
                    meaning: question.meaning.clone(),
                    available: board.available().to_vec(),
                    picked: board.picked().to_vec(),
                    preview: processor.shape(&board.answer()),
                    feedback: feedback(self.unscramble.selected(), &question.correct_answer).map(
                        |f| Feedback {
                            selected: processor.shape(&f.selected),
                            correct_answer: processor.shape(&f.correct_answer),
                            ..f
                        },
                    ),
                }),
                _ => self.lobby(entries),
            },
        }
    }

    fn card_screen(&self) -> Screen {
        let Some(entry) = self.deck.current() else {
            return Screen::EmptyDeck;
        };
        let (position, total) = self.deck.position();

        Screen::Card(CardScreen {
            position,
            total,
            front: entry.singular().to_string(),
            meaning: entry.meaning().to_string(),
            dual: entry.dual().map(str::to_string),
            plural: entry.plural().map(str::to_string),
            idiom: entry.is_idiom(),
            flipped: self.deck.is_flipped(),
        })
    }
}

fn feedback(selected: Option<&str>, correct_answer: &str) -> Option<Feedback> {
    selected.map(|selected| Feedback {
        selected: selected.to_string(),
        correct_answer: correct_answer.to_string(),
        is_correct: selected == correct_answer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::PlainProcessor;
    use mufrodat_types::EntryKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn entries() -> Vec<VocabularyEntry> {
        [
            ("kitab", "kitaban", "kutub", "buku"),
            ("qalam", "qalaman", "aqlam", "pena"),
            ("bayt", "", "buyut", "rumah"),
            ("bab", "baban", "abwab", "pintu"),
            ("lihaf", "lihafan", "luhuf", "selimut"),
            ("kursi", "kursiyan", "karasi", "kursi"),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (s, d, p, m))| VocabularyEntry::new(format!("vocab-{i}"), EntryKind::noun(s, d, p, m)))
        .collect()
    }

    #[test]
    fn test_quiz_needs_five_entries() {
        let all = entries();
        let mut state = StudyState::new(QuizConfig::default());
        let mut rng = StdRng::seed_from_u64(1);

        let result = state.start_quiz(QuizSource::All, &all[..4], &mut rng);
        assert!(matches!(result, Err(SessionError::NotEnoughEntries { .. })));

        let Screen::Lobby(lobby) = state.screen(&all[..4], &PlainProcessor) else {
            panic!("expected lobby");
        };
        assert!(!lobby.can_start);
        assert!(lobby.error.is_some());
    }

    #[test]
    fn test_profile_cannot_lower_thresholds() {
        let all = entries();
        let mut state = StudyState::new(QuizConfig {
            min_entries: 1,
            distractors: 0,
            ..QuizConfig::default()
        });
        let mut rng = StdRng::seed_from_u64(3);

        let result = state.start_quiz(QuizSource::All, &all[..2], &mut rng);
        assert!(matches!(result, Err(SessionError::NotEnoughEntries { .. })));

        state.start_quiz(QuizSource::All, &all, &mut rng).unwrap();
        let question = state.quiz().current().unwrap();
        assert_eq!(question.options.len(), 2);
    }

    #[test]
    fn test_quiz_round_to_finish() {
        let all = entries();
        let mut state = StudyState::new(QuizConfig::default());
        let mut rng = StdRng::seed_from_u64(2);

        state.start_quiz(QuizSource::Newest(5), &all, &mut rng).unwrap();
        assert_eq!(state.quiz().total(), 5);

        for _ in 0..5 {
            let Screen::Question(screen) = state.screen(&all, &PlainProcessor) else {
                panic!("expected question");
            };
            assert!(screen.feedback.is_none());

            let correct = state.quiz().current().map(|q| q.correct_answer.clone()).unwrap();
            let index = screen.options.iter().position(|o| *o == correct).unwrap();
            assert_eq!(state.select_option(index), Some(true));
            assert_eq!(state.select_option(0), None);
            state.next();
        }

        let Screen::Finished { outcome, .. } = state.screen(&all, &PlainProcessor) else {
            panic!("expected finish");
        };
        assert_eq!(outcome.percentage, 100);
    }

    #[test]
    fn test_switching_view_drops_session() {
        let all = entries();
        let mut state = StudyState::new(QuizConfig::default());
        let mut rng = StdRng::seed_from_u64(3);

        state.start_quiz(QuizSource::All, &all, &mut rng).unwrap();
        state.switch_view(View::List, &all, &mut rng);
        state.switch_view(View::Quiz, &all, &mut rng);

        assert_eq!(state.quiz().phase(), Phase::Idle);
        assert!(matches!(state.screen(&all, &PlainProcessor), Screen::Lobby(_)));
    }

    #[test]
    fn test_unscramble_submit_locks_board() {
        let all = entries();
        let mut state = StudyState::new(QuizConfig::default());
        let mut rng = StdRng::seed_from_u64(4);

        state
            .start_unscramble(QuizSource::Newest(10), &all, &PlainProcessor, &mut rng)
            .unwrap();
        let answer = state.unscramble().current().unwrap().correct_answer.clone();

        // Pick letters in answer order
        for letter in answer.chars() {
            let Screen::Puzzle(puzzle) = state.screen(&all, &PlainProcessor) else {
                panic!("expected puzzle");
            };
            let index = puzzle
                .available
                .iter()
                .position(|l| *l == letter.to_string())
                .unwrap();
            assert!(state.pick_letter(index));
        }

        assert_eq!(state.submit_letters(), Some(true));
        assert_eq!(state.submit_letters(), None);
        assert!(!state.remove_letter(0));

        let Screen::Puzzle(puzzle) = state.screen(&all, &PlainProcessor) else {
            panic!("expected puzzle");
        };
        assert_eq!(puzzle.preview, answer);
        assert!(puzzle.feedback.is_some_and(|f| f.is_correct));

        state.next();
        let Screen::Puzzle(puzzle) = state.screen(&all, &PlainProcessor) else {
            panic!("expected puzzle");
        };
        assert_eq!(puzzle.number, 2);
        assert!(puzzle.picked.is_empty());
    }

    #[test]
    fn test_remote_quiz_rejects_empty_list() {
        let all = entries();
        let mut state = StudyState::new(QuizConfig::default());

        assert_eq!(
            state.start_remote_quiz(&all, Vec::new()),
            Err(SessionError::NoQuestions)
        );
        assert_eq!(state.quiz().phase(), Phase::Idle);
    }

    #[test]
    fn test_flashcards() {
        let all = entries();
        let mut state = StudyState::new(QuizConfig::default());
        let mut rng = StdRng::seed_from_u64(5);

        state.switch_view(View::Flashcard, &all, &mut rng);
        state.flip_card();
        let Screen::Card(card) = state.screen(&all, &PlainProcessor) else {
            panic!("expected card");
        };
        assert_eq!((card.position, card.total), (1, 6));
        assert!(card.flipped);

        state.prev_card();
        let Screen::Card(card) = state.screen(&all, &PlainProcessor) else {
            panic!("expected card");
        };
        assert_eq!(card.position, 6);
        assert!(!card.flipped);

        state.switch_view(View::Flashcard, &[], &mut rng);
        assert_eq!(state.screen(&[], &PlainProcessor), Screen::EmptyDeck);
    }
}
