use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use self::assistant::AssistantConfig;
use self::quiz::QuizConfig;
use self::storage::StorageConfig;

pub mod assistant;
pub mod quiz;
pub mod storage;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub assistant: AssistantConfig,
    pub quiz: QuizConfig,

    /// Capacity of the app -> ui channel
    pub ui_channel_capacity: usize,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Environment always wins over profile values
    pub fn apply_env(&mut self) {
        if let Ok(dir) = env::var("MUFRODAT_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(dir);
        }

        if let Some(key) = env::var("GEMINI_API_KEY")
            .ok()
            .or_else(|| env::var("API_KEY").ok())
            .filter(|key| !key.is_empty())
        {
            self.assistant.api_key = key;
            self.assistant.enabled = true;
        }

        if let Ok(model) = env::var("MUFRODAT_ASSISTANT_MODEL") {
            self.assistant.model = model;
        }

        self.assistant.timeout_seconds = env::var("TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(self.assistant.timeout_seconds);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            assistant: AssistantConfig::default(),
            quiz: QuizConfig::default(),
            ui_channel_capacity: 64,
        }
    }
}
