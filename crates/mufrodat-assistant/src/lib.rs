pub mod prompt;
pub mod response;

use mufrodat_types::{EntryDraft, QuizQuestion, VocabularyEntry};

pub use prompt::{parse_prompt, parse_schema, quiz_prompt, quiz_schema};
pub use response::{parse_quiz_response, parse_vocabulary_response};

/// Shown when a remote parse fails, whatever the cause
pub const PARSE_FAILED_MESSAGE: &str =
    "Failed to process vocabulary with the assistant. Check the input or try again.";

/// Shown when a remote quiz fails, whatever the cause
pub const QUIZ_FAILED_MESSAGE: &str = "Failed to build a quiz. Please try again.";

/// Language model backed helper for parsing and quiz building
#[async_trait::async_trait]
pub trait VocabularyAssistant: Send + Sync {
    /// Extract vocabulary drafts from a pasted block
    async fn parse_vocabulary(&self, text: &str) -> Result<Vec<EntryDraft>, AssistError>;

    /// Ask for `count` multiple choice questions about `entries`
    async fn generate_quiz(
        &self,
        entries: &[VocabularyEntry],
        count: usize,
    ) -> Result<Vec<QuizQuestion>, AssistError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub model: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AssistError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
