use mufrodat_types::{EntryDraft, EntryKind, VocabularyEntry};
use uuid::Uuid;

use crate::error::{StoreError, ValidationError};
use crate::store::{KeyValueStore, load_json, save_json};

pub const VOCABULARY_KEY: &str = "vocabulary";

/// The saved vocabulary collection, newest entry first.
///
/// Every mutation rewrites the whole collection. When the write fails the
/// in-memory copy is left as it was.
pub struct VocabularyBook<S: KeyValueStore> {
    store: S,
    entries: Vec<VocabularyEntry>,
}

impl<S: KeyValueStore> VocabularyBook<S> {
    pub fn load(store: S) -> Result<Self, StoreError> {
        let entries: Vec<VocabularyEntry> = load_json(&store, VOCABULARY_KEY)?.unwrap_or_default();
        tracing::info!("Loaded {} vocabulary entries", entries.len());

        Ok(Self { store, entries })
    }

    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&VocabularyEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Assign ids and put the drafts in front, keeping their order
    pub fn add(&mut self, drafts: Vec<EntryDraft>) -> Result<Vec<VocabularyEntry>, StoreError> {
        let added: Vec<VocabularyEntry> = drafts
            .into_iter()
            .map(|kind| VocabularyEntry::new(new_entry_id(), kind))
            .collect();

        let mut next = added.clone();
        next.extend(self.entries.iter().cloned());
        self.replace(next)?;

        tracing::info!("Added {} entries", added.len());
        Ok(added)
    }

    /// Replace the entry with the same id. Unknown ids are a no-op.
    pub fn update(&mut self, entry: VocabularyEntry) -> Result<bool, StoreError> {
        let Some(index) = self.entries.iter().position(|e| e.id == entry.id) else {
            tracing::debug!("Update ignored, no entry with id {}", entry.id);
            return Ok(false);
        };

        let mut next = self.entries.clone();
        next[index] = entry;
        self.replace(next)?;
        Ok(true)
    }

    /// Remove by id. Unknown ids are a no-op.
    pub fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        if self.get(id).is_none() {
            tracing::debug!("Delete ignored, no entry with id {id}");
            return Ok(false);
        }

        let next = self
            .entries
            .iter()
            .filter(|entry| entry.id != id)
            .cloned()
            .collect();
        self.replace(next)?;
        Ok(true)
    }

    fn replace(&mut self, next: Vec<VocabularyEntry>) -> Result<(), StoreError> {
        save_json(&mut self.store, VOCABULARY_KEY, &next)?;
        self.entries = next;
        Ok(())
    }
}

pub fn new_entry_id() -> String {
    format!("vocab-{}", Uuid::new_v4())
}

/// Main form and meaning are required for manually entered or edited entries
pub fn validate_draft(draft: &EntryDraft) -> Result<(), ValidationError> {
    let main = match draft {
        EntryKind::Noun(forms) => &forms.singular,
        EntryKind::Idiom(phrase) => &phrase.phrase,
    };

    if main.trim().is_empty() || draft.meaning().trim().is_empty() {
        return Err(ValidationError::MissingRequiredField);
    }

    Ok(())
}
