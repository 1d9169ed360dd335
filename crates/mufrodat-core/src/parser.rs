//! Batch parser for pasted vocabulary lists.
//!
//! Expected input, as shared in study groups:
//! ```text
//! - غَسَّالَةٌ - غَسَّالَتَانِ - غَسَّالَاتٌ
//! Mesin cuci
//! - لِحَافٌ - لُحُفٌ
//! Selimut
//!
//! إِصْلَاحُ اللُّغَةِ
//! - أَنَا مُتْعَبٌ/مُتْعَبَةٌ.
//!       Aku lelah.
//! ```
//! Headers, dates and separators that are not hyphen lines are ignored.

use mufrodat_types::{EntryDraft, EntryKind};

use crate::preprocess::{DefaultPreprocessor, Preprocessor, is_invisible};

/// Folded Arabic idiom header, found anywhere in a line
const ARABIC_MARKER: &str = "اصلاح اللغة";

/// Latin spelling of the header, only as a line of its own
const LATIN_MARKER: &str = "islahul lughoh";

/// Parse a pasted block into drafts, in input order.
///
/// An empty result means no hyphen line was found; callers report it.
pub fn parse_batch(text: &str) -> Vec<EntryDraft> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut drafts = Vec::new();
    let mut idiom_section = false;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        i += 1;

        if is_section_marker(line) {
            tracing::debug!("Idiom section starts at line {}", i);
            idiom_section = true;
            continue;
        }

        let Some(arabic) = entry_text(line) else {
            continue;
        };

        let meaning = match lines.get(i) {
            Some(next) if entry_text(next).is_none() && !is_section_marker(next) => {
                i += 1;
                *next
            }
            _ => "",
        };

        if arabic.is_empty() {
            tracing::debug!("Skipping hyphen line without Arabic text");
            continue;
        }

        let draft = if idiom_section {
            EntryKind::idiom(arabic, meaning)
        } else {
            split_forms(&arabic, meaning)
        };
        drafts.push(draft);
    }

    tracing::debug!("Parsed {} drafts from {} lines", drafts.len(), lines.len());
    drafts
}

/// Header line that switches to idiom entries
pub fn is_section_marker(line: &str) -> bool {
    let folded = DefaultPreprocessor.process(line);
    if folded.contains(ARABIC_MARKER) {
        return true;
    }

    folded.trim_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace()) == LATIN_MARKER
}

fn is_prefix_char(c: char) -> bool {
    c == '-' || c.is_whitespace() || is_invisible(c)
}

/// Text of an entry line, or `None` when the line is not one.
///
/// The leading run of hyphens, spaces and invisible characters must hold at
/// least one hyphen; everything after the last hyphen of that run is kept.
fn entry_text(line: &str) -> Option<String> {
    let run_end = line
        .char_indices()
        .find(|(_, c)| !is_prefix_char(*c))
        .map(|(index, _)| index)
        .unwrap_or(line.len());
    let dash = line[..run_end].rfind('-')?;

    let text: String = line[dash + 1..].chars().filter(|c| !is_invisible(*c)).collect();
    Some(text.trim().to_string())
}

/// Split `singular - dual - plural` style lines
fn split_forms(arabic: &str, meaning: &str) -> EntryDraft {
    let parts: Vec<&str> = arabic
        .split('-')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    let singular = parts.first().copied().unwrap_or_default();
    let (dual, plural) = match parts.as_slice() {
        [_, plural] => ("", *plural),
        [_, dual, plural] => (*dual, *plural),
        _ => ("", ""),
    };

    EntryKind::noun(singular, dual, plural, meaning)
}
