use unicode_normalization::UnicodeNormalization;

/// Fold text for loose comparisons (section headers, duplicate checks).
pub trait Preprocessor {
    // Default Arabic/Latin folding
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // NFKC maps presentation forms back to base letters
        text.nfkc()
            .filter(|c| !is_harakah(*c) && !is_invisible(*c) && *c != TATWEEL)
            .map(fold_alef)
            .flat_map(char::to_lowercase)
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

pub const TATWEEL: char = '\u{0640}';

/// Arabic short vowels, tanwin, shadda, sukun and related marks
pub fn is_harakah(c: char) -> bool {
    matches!(c, '\u{064B}'..='\u{065F}' | '\u{0670}' | '\u{06D6}'..='\u{06ED}')
}

/// Zero-width formatting characters that sneak in from chat apps
pub fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{200B}'..='\u{200F}' | '\u{2060}'..='\u{2064}' | '\u{FEFF}' | '\u{061C}'
    )
}

fn fold_alef(c: char) -> char {
    match c {
        'أ' | 'إ' | 'آ' | 'ٱ' => 'ا',
        _ => c,
    }
}
