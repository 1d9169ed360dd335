use mufrodat_core::language::LanguageProcessor;
use mufrodat_core::preprocess::{TATWEEL, is_harakah, is_invisible};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::canonical_combining_class;

use crate::joining::join_units;

/// Arabic language processor
#[derive(Debug, Clone, Copy, Default)]
pub struct ArabicProcessor;

impl ArabicProcessor {
    pub fn new() -> Self {
        Self
    }
}

fn is_mark(c: char) -> bool {
    is_harakah(c) || canonical_combining_class(c) != 0
}

impl LanguageProcessor for ArabicProcessor {
    fn language_code(&self) -> &str {
        "ar"
    }

    fn normalize(&self, text: &str) -> String {
        text.nfc()
            .filter(|c| !is_invisible(*c) && *c != TATWEEL)
            .collect()
    }

    /// One unit per base letter with the marks written on it
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut units: Vec<String> = Vec::new();

        for c in self.normalize(text).chars() {
            if is_mark(c) && let Some(last) = units.last_mut() {
                last.push(c);
                continue;
            }

            // A stray leading mark becomes its own unit
            units.push(c.to_string());
        }

        units
    }

    fn shape(&self, text: &str) -> String {
        join_units(&self.tokenize(text))
    }
}
