//! Persona and language configuration surface.
//!
//! Both catalogs are static and enumerable. Unknown persona names fall back
//! to the default persona; language codes are validated at selection time.

mod descriptor;
mod language;

pub use descriptor::{PersonaCatalog, PersonaDescriptor, DEFAULT_PERSONA};
pub use language::{Language, LanguageCatalog, VoiceSettings, DEFAULT_LANGUAGE};
