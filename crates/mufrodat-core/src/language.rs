/// Text processing interface for language implementations
pub trait LanguageProcessor: Send + Sync {
    /// Language identifier (ISO 639-1 code)
    fn language_code(&self) -> &str;

    /// Normalize text (Unicode normalization, invisible characters, etc.)
    fn normalize(&self, text: &str) -> String;

    /// Break a word into the letter units a learner rearranges, in order
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Render text the way it is written on the page.
    ///
    /// Scripts without contextual forms return the text unchanged.
    fn shape(&self, text: &str) -> String {
        text.to_string()
    }
}

/// One unit per `char`, nothing normalized.
///
/// Fallback for scripts without a dedicated language pack.
pub struct PlainProcessor;

impl LanguageProcessor for PlainProcessor {
    fn language_code(&self) -> &str {
        "und"
    }

    fn normalize(&self, text: &str) -> String {
        text.to_string()
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        text.chars().map(String::from).collect()
    }
}
