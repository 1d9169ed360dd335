//! One-shot commands that do not need the event loop.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, bail};
use mufrodat_assistant::VocabularyAssistant;
use mufrodat_core::book::{VocabularyBook, validate_draft};
use mufrodat_core::settings::{ARABIC_FONTS, Preferences};
use mufrodat_core::store::KeyValueStore;
use mufrodat_types::{EntryFields, EntryKind, IDIOM_NOTE, ParseSource, Theme, VocabularyEntry};

use crate::cli::{EditArgs, EntryArgs};
use crate::events::batch_input::parse_drafts;
use crate::ui::render_entries;

pub fn list<S: KeyValueStore>(book: &VocabularyBook<S>) -> String {
    render_entries(book.entries())
}

/// Read a block from `file`, or stdin when none is given
pub fn read_batch(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

pub async fn add<S: KeyValueStore>(
    book: &mut VocabularyBook<S>,
    text: &str,
    source: ParseSource,
    assistant: Option<&dyn VocabularyAssistant>,
) -> anyhow::Result<Vec<VocabularyEntry>> {
    let drafts = match parse_drafts(text, source, assistant).await {
        Ok(drafts) => drafts,
        Err(message) => bail!(message),
    };

    let added = book.add(drafts).context("Failed to save vocabulary")?;
    Ok(added)
}

fn draft_from_args(args: &EntryArgs) -> EntryKind {
    EntryFields {
        singular: args.singular.trim().to_string(),
        dual: args.dual.trim().to_string(),
        plural: args.plural.trim().to_string(),
        meaning: args.meaning.trim().to_string(),
        notes: if args.idiom {
            IDIOM_NOTE.to_string()
        } else {
            args.notes.trim().to_string()
        },
    }
    .into()
}

pub fn new_entry<S: KeyValueStore>(
    book: &mut VocabularyBook<S>,
    args: &EntryArgs,
) -> anyhow::Result<VocabularyEntry> {
    let draft = draft_from_args(args);
    validate_draft(&draft)?;

    let mut added = book.add(vec![draft]).context("Failed to save vocabulary")?;
    added.pop().context("Nothing was added")
}

/// Overwrite the given fields. Returns `None` for an unknown id.
pub fn edit<S: KeyValueStore>(
    book: &mut VocabularyBook<S>,
    id: &str,
    changes: &EditArgs,
) -> anyhow::Result<Option<VocabularyEntry>> {
    let Some(existing) = book.get(id) else {
        return Ok(None);
    };

    let mut fields = EntryFields::from(&existing.kind);
    let updates = [
        (&mut fields.singular, &changes.singular),
        (&mut fields.meaning, &changes.meaning),
        (&mut fields.dual, &changes.dual),
        (&mut fields.plural, &changes.plural),
        (&mut fields.notes, &changes.notes),
    ];
    for (field, change) in updates {
        if let Some(value) = change {
            *field = value.trim().to_string();
        }
    }

    let kind = EntryKind::from(fields);
    validate_draft(&kind)?;

    let entry = VocabularyEntry::new(id, kind);
    if !book.update(entry.clone()).context("Failed to save vocabulary")? {
        return Ok(None);
    }
    Ok(Some(entry))
}

pub fn delete<S: KeyValueStore>(book: &mut VocabularyBook<S>, id: &str) -> anyhow::Result<bool> {
    book.delete(id).context("Failed to save vocabulary")
}

/// Apply any requested change and describe the current settings
pub fn settings<S: KeyValueStore>(
    store: &mut S,
    theme: Option<Theme>,
    font: Option<&str>,
) -> anyhow::Result<String> {
    let mut prefs = Preferences::load(&*store).context("Failed to load settings")?;

    if let Some(theme) = theme {
        prefs.set_theme(store, theme).context("Failed to save theme")?;
    }
    if let Some(font) = font {
        prefs.set_font(store, font)?;
    }

    Ok(format!(
        "Theme: {}\nArabic font: {}",
        prefs.theme.as_str(),
        prefs.font_name().unwrap_or(prefs.arabic_font.as_str())
    ))
}

pub fn fonts<S: KeyValueStore>(store: &S) -> anyhow::Result<String> {
    let prefs = Preferences::load(store).context("Failed to load settings")?;

    let lines: Vec<String> = ARABIC_FONTS
        .iter()
        .map(|font| {
            let marker = if font.family == prefs.arabic_font { "*" } else { " " };
            format!("{marker} {:<14} {}", font.name, font.family)
        })
        .collect();
    Ok(lines.join("\n"))
}
