//! Persona descriptors and the static catalog they are looked up in.

use once_cell::sync::Lazy;
use serde::Serialize;

/// Name of the persona used when a lookup does not match.
pub const DEFAULT_PERSONA: &str = "Professional Assistant";

/// A named behavioral directive that conditions generated replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonaDescriptor {
    pub name: String,
    pub directive: String,
}

impl PersonaDescriptor {
    /// Creates a persona descriptor.
    pub fn new(name: impl Into<String>, directive: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directive: directive.into(),
        }
    }
}

/// Immutable set of personas with a defined default.
#[derive(Debug, Clone)]
pub struct PersonaCatalog {
    personas: Vec<PersonaDescriptor>,
    default_index: usize,
}

static BUILTIN: Lazy<PersonaCatalog> = Lazy::new(|| PersonaCatalog {
    personas: vec![
        PersonaDescriptor::new(
            DEFAULT_PERSONA,
            "You are a professional assistant. Provide clear, concise, and formal responses.",
        ),
        PersonaDescriptor::new(
            "Friendly Helper",
            "You are a friendly and approachable helper. Use casual language and be encouraging.",
        ),
        PersonaDescriptor::new(
            "Technical Expert",
            "You are a technical expert. Provide detailed technical information and explanations.",
        ),
        PersonaDescriptor::new(
            "Creative Companion",
            "You are a creative companion. Think outside the box and provide imaginative responses.",
        ),
        PersonaDescriptor::new(
            "Educational Tutor",
            "You are an educational tutor. Explain concepts clearly and thoroughly for learning.",
        ),
    ],
    default_index: 0,
});

impl PersonaCatalog {
    /// The built-in catalog, loaded once.
    pub fn builtin() -> &'static PersonaCatalog {
        &BUILTIN
    }

    /// Looks a persona up by name, case-insensitively.
    pub fn find(&self, name: &str) -> Option<&PersonaDescriptor> {
        let name = name.trim();
        self.personas
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Looks a persona up by name, falling back to the default persona.
    pub fn resolve(&self, name: &str) -> &PersonaDescriptor {
        match self.find(name) {
            Some(persona) => persona,
            None => {
                tracing::warn!(persona = %name, "Unknown persona, using default");
                self.default_persona()
            }
        }
    }

    /// The persona used when no name matches.
    pub fn default_persona(&self) -> &PersonaDescriptor {
        &self.personas[self.default_index]
    }

    /// All personas in catalog order.
    pub fn all(&self) -> &[PersonaDescriptor] {
        &self.personas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_five_personas() {
        let names: Vec<_> = PersonaCatalog::builtin()
            .all()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "Professional Assistant",
                "Friendly Helper",
                "Technical Expert",
                "Creative Companion",
                "Educational Tutor",
            ]
        );
    }

    #[test]
    fn resolve_matches_case_insensitively() {
        let persona = PersonaCatalog::builtin().resolve("technical expert");
        assert_eq!(persona.name, "Technical Expert");
        assert!(persona.directive.starts_with("You are a technical expert."));
    }

    #[test]
    fn resolve_falls_back_to_default() {
        let persona = PersonaCatalog::builtin().resolve("Pirate Captain");
        assert_eq!(persona.name, DEFAULT_PERSONA);
    }

    #[test]
    fn find_returns_none_for_unknown_name() {
        assert!(PersonaCatalog::builtin().find("").is_none());
    }
}
