//! Slot names and the case-insensitive vocabulary that fills them.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Named piece of structured information extracted from an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    /// A page of the site.
    Page,
    /// A job category.
    Category,
}

impl Slot {
    /// Returns the wire name of this slot.
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Page => "page",
            Slot::Category => "category",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Slot values keyed by slot name. Keys are unique by construction.
pub type Entities = BTreeMap<Slot, String>;

/// Default page names.
pub const DEFAULT_PAGES: [&str; 4] = ["home", "about", "contact", "careers"];

/// Default job category names.
pub const DEFAULT_CATEGORIES: [&str; 3] = ["cs", "it", "sales"];

/// Two lookup tables mapping a token's lowercase form to a slot value.
#[derive(Debug, Clone)]
pub struct SlotVocabulary {
    pages: HashMap<String, String>,
    categories: HashMap<String, String>,
}

impl SlotVocabulary {
    /// Builds a vocabulary from page and category names.
    ///
    /// Names are lowercased; the lowercase form is both key and slot value.
    pub fn new<'a>(
        pages: impl IntoIterator<Item = &'a str>,
        categories: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            pages: lowercase_table(pages),
            categories: lowercase_table(categories),
        }
    }

    /// Looks up a surface form, page table first, then category table.
    pub fn lookup(&self, surface: &str) -> Option<(Slot, &str)> {
        let key = surface.to_lowercase();
        if let Some(value) = self.pages.get(&key) {
            return Some((Slot::Page, value.as_str()));
        }
        self.categories
            .get(&key)
            .map(|value| (Slot::Category, value.as_str()))
    }
}

fn lowercase_table<'a>(names: impl IntoIterator<Item = &'a str>) -> HashMap<String, String> {
    names
        .into_iter()
        .map(|name| {
            let key = name.to_lowercase();
            (key.clone(), key)
        })
        .collect()
}

impl Default for SlotVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_PAGES, DEFAULT_CATEGORIES)
    }
}
