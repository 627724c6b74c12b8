//! Speech languages recognized by the text-to-speech collaborator.

use once_cell::sync::Lazy;
use serde::Serialize;

/// Code of the language used when none is configured.
pub const DEFAULT_LANGUAGE: &str = "en";

/// A speech language: synthesizer code plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: String,
    pub name: String,
}

/// Enumerable set of recognized languages.
#[derive(Debug, Clone)]
pub struct LanguageCatalog {
    languages: Vec<Language>,
}

static BUILTIN: Lazy<LanguageCatalog> = Lazy::new(|| {
    let entries = [
        ("en", "English (US)"),
        ("en-uk", "English (UK)"),
        ("es", "Spanish"),
        ("fr", "French"),
        ("de", "German"),
        ("it", "Italian"),
        ("ja", "Japanese"),
        ("ko", "Korean"),
        ("pt", "Portuguese"),
        ("ru", "Russian"),
        ("zh-CN", "Chinese"),
    ];
    LanguageCatalog {
        languages: entries
            .iter()
            .map(|(code, name)| Language {
                code: code.to_string(),
                name: name.to_string(),
            })
            .collect(),
    }
});

impl LanguageCatalog {
    /// The built-in catalog, loaded once.
    pub fn builtin() -> &'static LanguageCatalog {
        &BUILTIN
    }

    /// Finds a language by code or display name, case-insensitively.
    pub fn find(&self, code_or_name: &str) -> Option<&Language> {
        let key = code_or_name.trim();
        self.languages
            .iter()
            .find(|l| l.code.eq_ignore_ascii_case(key) || l.name.eq_ignore_ascii_case(key))
    }

    /// Returns true if the code or name is recognized.
    pub fn is_recognized(&self, code_or_name: &str) -> bool {
        self.find(code_or_name).is_some()
    }

    /// All languages in catalog order.
    pub fn all(&self) -> &[Language] {
        &self.languages
    }
}

/// How replies are spoken back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSettings {
    /// Synthesizer language code.
    pub language: String,
    /// Speak slowly instead of at normal speed.
    pub slow: bool,
}

impl VoiceSettings {
    /// Creates settings for a recognized language; unknown languages fall back to English.
    pub fn new(code_or_name: &str, slow: bool) -> Self {
        let language = match LanguageCatalog::builtin().find(code_or_name) {
            Some(language) => language.code.clone(),
            None => {
                tracing::warn!(language = %code_or_name, "Unknown language, using default");
                DEFAULT_LANGUAGE.to_string()
            }
        };
        Self { language, slow }
    }
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            slow: false,
        }
    }
}
