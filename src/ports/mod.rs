//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the dialogue core and the outside world. Adapters implement these ports.
//!
//! ## Oracle Ports
//!
//! - `ZeroShotClassifier` - Intent scoring over a candidate label set
//! - `TokenTagger` - Named-entity style token tagging
//! - `AIProvider` - Generative text completion
//!
//! ## Speech Ports
//!
//! - `SpeechToText` - Capture and recognition collaborator
//! - `TextToSpeech` - Synthesis collaborator

mod ai_provider;
mod oracle_error;
mod speech;
mod token_tagger;
mod zero_shot_classifier;

pub use ai_provider::{
    AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
};
pub use oracle_error::OracleError;
pub use speech::{SpeechCapture, SpeechToText, TextToSpeech};
pub use token_tagger::{TaggedSpan, TokenTagger};
pub use zero_shot_classifier::{ZeroShotClassifier, ZeroShotOutput};
