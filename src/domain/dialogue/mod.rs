//! Dialogue module - intents, slots and the dialogue act.

mod act;
mod error;
mod intent;
mod slots;

pub use act::DialogueAct;
pub use error::{DialogueErrorKind, DialogueFault};
pub use intent::{CandidateIntentSet, Intent};
pub use slots::{Entities, Slot, SlotVocabulary, DEFAULT_CATEGORIES, DEFAULT_PAGES};
