use mufrodat_types::Theme;

use crate::error::{CoreError, StoreError, ValidationError};
use crate::store::{KeyValueStore, load_json, save_json};

pub const THEME_KEY: &str = "theme";
pub const FONT_KEY: &str = "arabicFont";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArabicFont {
    pub name: &'static str,
    /// CSS font-family value
    pub family: &'static str,
}

pub const ARABIC_FONTS: [ArabicFont; 10] = [
    ArabicFont { name: "Noto Naskh", family: "'Noto Naskh Arabic', serif" },
    ArabicFont { name: "Amiri", family: "'Amiri', serif" },
    ArabicFont { name: "Cairo", family: "'Cairo', sans-serif" },
    ArabicFont { name: "Lateef", family: "'Lateef', serif" },
    ArabicFont { name: "Lemonada", family: "'Lemonada', cursive" },
    ArabicFont { name: "Markazi Text", family: "'Markazi Text', serif" },
    ArabicFont { name: "Noto Kufi", family: "'Noto Kufi Arabic', sans-serif" },
    ArabicFont { name: "Reem Kufi", family: "'Reem Kufi', sans-serif" },
    ArabicFont { name: "Scheherazade", family: "'Scheherazade New', serif" },
    ArabicFont { name: "Tajawal", family: "'Tajawal', sans-serif" },
];

/// Look up a font by display name (case-insensitive) or exact family
pub fn resolve_font(query: &str) -> Option<&'static ArabicFont> {
    let query = query.trim();
    ARABIC_FONTS
        .iter()
        .find(|font| font.name.eq_ignore_ascii_case(query) || font.family == query)
}

/// Display preferences stored next to the vocabulary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub theme: Theme,
    pub arabic_font: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            arabic_font: ARABIC_FONTS[0].family.to_string(),
        }
    }
}

impl Preferences {
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self, StoreError> {
        let defaults = Self::default();

        Ok(Self {
            theme: load_json(store, THEME_KEY)?.unwrap_or(defaults.theme),
            arabic_font: load_json(store, FONT_KEY)?.unwrap_or(defaults.arabic_font),
        })
    }

    pub fn set_theme<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        theme: Theme,
    ) -> Result<(), StoreError> {
        save_json(store, THEME_KEY, &theme)?;
        self.theme = theme;
        Ok(())
    }

    pub fn set_font<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        query: &str,
    ) -> Result<&'static ArabicFont, CoreError> {
        let font =
            resolve_font(query).ok_or_else(|| ValidationError::UnknownFont(query.to_string()))?;
        save_json(store, FONT_KEY, font.family)?;
        self.arabic_font = font.family.to_string();
        Ok(font)
    }

    /// Catalogue name of the selected font, if it is one of ours
    pub fn font_name(&self) -> Option<&'static str> {
        resolve_font(&self.arabic_font).map(|font| font.name)
    }
}
