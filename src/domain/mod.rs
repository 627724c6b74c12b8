//! Domain layer containing dialogue rules and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (timestamps, validation errors)
//! - `dialogue` - Intents, slots, the dialogue act and its error kinds
//! - `conversation` - Turn log and prompt assembly
//! - `persona` - Persona and language catalogs

pub mod conversation;
pub mod dialogue;
pub mod foundation;
pub mod persona;
