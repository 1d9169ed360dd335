use serde::{Deserialize, Serialize};

/// `notes` value that marks a phrase record in the flat stored layout.
pub const IDIOM_NOTE: &str = "Islahul Lughoh";

pub type EntryId = String;

/// A saved vocabulary record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredEntry", into = "StoredEntry")]
pub struct VocabularyEntry {
    pub id: EntryId,
    pub kind: EntryKind,
}

impl VocabularyEntry {
    pub fn new(id: impl Into<EntryId>, kind: EntryKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    pub fn singular(&self) -> &str {
        self.kind.singular()
    }

    pub fn meaning(&self) -> &str {
        self.kind.meaning()
    }

    pub fn dual(&self) -> Option<&str> {
        self.kind.dual()
    }

    pub fn plural(&self) -> Option<&str> {
        self.kind.plural()
    }

    pub fn is_idiom(&self) -> bool {
        self.kind.is_idiom()
    }
}

/// Noun inflection record or idiom/phrase record.
///
/// Drafts coming out of the parsers are bare kinds; they become
/// [`VocabularyEntry`] once the book assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Noun(NounForms),
    Idiom(Phrase),
}

pub type EntryDraft = EntryKind;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NounForms {
    /// Mufrad
    pub singular: String,
    /// Mutsanna, may be empty
    pub dual: String,
    /// Jamak, may be empty
    pub plural: String,
    pub meaning: String,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Phrase {
    pub phrase: String,
    pub meaning: String,
}

impl EntryKind {
    pub fn noun(
        singular: impl Into<String>,
        dual: impl Into<String>,
        plural: impl Into<String>,
        meaning: impl Into<String>,
    ) -> Self {
        EntryKind::Noun(NounForms {
            singular: singular.into(),
            dual: dual.into(),
            plural: plural.into(),
            meaning: meaning.into(),
            notes: String::new(),
        })
    }

    pub fn idiom(phrase: impl Into<String>, meaning: impl Into<String>) -> Self {
        EntryKind::Idiom(Phrase {
            phrase: phrase.into(),
            meaning: meaning.into(),
        })
    }

    /// Singular form, or the whole phrase for idioms
    pub fn singular(&self) -> &str {
        match self {
            EntryKind::Noun(forms) => &forms.singular,
            EntryKind::Idiom(phrase) => &phrase.phrase,
        }
    }

    pub fn meaning(&self) -> &str {
        match self {
            EntryKind::Noun(forms) => &forms.meaning,
            EntryKind::Idiom(phrase) => &phrase.meaning,
        }
    }

    pub fn dual(&self) -> Option<&str> {
        match self {
            EntryKind::Noun(forms) => non_empty(&forms.dual),
            EntryKind::Idiom(_) => None,
        }
    }

    pub fn plural(&self) -> Option<&str> {
        match self {
            EntryKind::Noun(forms) => non_empty(&forms.plural),
            EntryKind::Idiom(_) => None,
        }
    }

    pub fn notes(&self) -> &str {
        match self {
            EntryKind::Noun(forms) => &forms.notes,
            EntryKind::Idiom(_) => IDIOM_NOTE,
        }
    }

    pub fn is_idiom(&self) -> bool {
        matches!(self, EntryKind::Idiom(_))
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() { None } else { Some(value) }
}

/// Flat record layout shared by local storage and the remote assistant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryFields {
    pub singular: String,
    pub dual: String,
    pub plural: String,
    pub meaning: String,
    pub notes: String,
}

impl From<EntryFields> for EntryKind {
    fn from(fields: EntryFields) -> Self {
        if fields.notes.trim() == IDIOM_NOTE {
            EntryKind::Idiom(Phrase {
                phrase: fields.singular,
                meaning: fields.meaning,
            })
        } else {
            EntryKind::Noun(NounForms {
                singular: fields.singular,
                dual: fields.dual,
                plural: fields.plural,
                meaning: fields.meaning,
                notes: fields.notes,
            })
        }
    }
}

impl From<&EntryKind> for EntryFields {
    fn from(kind: &EntryKind) -> Self {
        match kind {
            EntryKind::Noun(forms) => EntryFields {
                singular: forms.singular.clone(),
                dual: forms.dual.clone(),
                plural: forms.plural.clone(),
                meaning: forms.meaning.clone(),
                notes: forms.notes.clone(),
            },
            EntryKind::Idiom(phrase) => EntryFields {
                singular: phrase.phrase.clone(),
                dual: String::new(),
                plural: String::new(),
                meaning: phrase.meaning.clone(),
                notes: IDIOM_NOTE.to_string(),
            },
        }
    }
}

#[derive(Serialize, Deserialize)]
struct StoredEntry {
    id: String,
    #[serde(flatten)]
    fields: EntryFields,
}

impl From<StoredEntry> for VocabularyEntry {
    fn from(stored: StoredEntry) -> Self {
        Self {
            id: stored.id,
            kind: stored.fields.into(),
        }
    }
}

impl From<VocabularyEntry> for StoredEntry {
    fn from(entry: VocabularyEntry) -> Self {
        Self {
            fields: EntryFields::from(&entry.kind),
            id: entry.id,
        }
    }
}
