use mufrodat_types::VocabularyEntry;
use rand::Rng;
use rand::seq::SliceRandom;

/// Shuffled copy of the collection, browsed one card at a time
#[derive(Debug, Clone, Default)]
pub struct Deck {
    cards: Vec<VocabularyEntry>,
    index: usize,
    flipped: bool,
}

impl Deck {
    pub fn new<R: Rng + ?Sized>(entries: &[VocabularyEntry], rng: &mut R) -> Self {
        let mut deck = Self {
            cards: entries.to_vec(),
            index: 0,
            flipped: false,
        };
        deck.cards.shuffle(rng);
        deck
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn current(&self) -> Option<&VocabularyEntry> {
        self.cards.get(self.index)
    }

    /// 1-based position and deck size
    pub fn position(&self) -> (usize, usize) {
        if self.cards.is_empty() {
            (0, 0)
        } else {
            (self.index + 1, self.cards.len())
        }
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn flip(&mut self) {
        if !self.cards.is_empty() {
            self.flipped = !self.flipped;
        }
    }

    pub fn next(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        self.index = (self.index + 1) % self.cards.len();
        self.flipped = false;
    }

    pub fn prev(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        self.index = (self.index + self.cards.len() - 1) % self.cards.len();
        self.flipped = false;
    }

    /// Reshuffle and go back to the front of the first card
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        self.index = 0;
        self.flipped = false;
    }
}
