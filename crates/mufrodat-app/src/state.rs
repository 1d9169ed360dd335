use std::sync::Arc;

use mufrodat_config::Config;
use mufrodat_core::book::VocabularyBook;
use mufrodat_core::store::KeyValueStore;
use mufrodat_core::view::StudyState;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::RwLock;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
        }
    }
}

/// Domain state owned by the event loop
pub struct Workspace<S: KeyValueStore> {
    pub book: VocabularyBook<S>,
    pub study: StudyState,
    pub rng: StdRng,
}

impl<S: KeyValueStore> Workspace<S> {
    pub fn new(book: VocabularyBook<S>, config: &Config) -> Self {
        Self {
            book,
            study: StudyState::new(config.quiz.clone()),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Fixed seed for reproducible sessions
    #[cfg(test)]
    pub fn with_seed(book: VocabularyBook<S>, config: &Config, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            ..Self::new(book, config)
        }
    }
}
