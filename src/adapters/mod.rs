//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the dialogue core to external systems:
//! - `ai` - Completion providers (Gemini, OpenAI, failover, mock)
//! - `nlu` - Hosted zero-shot classification and token tagging
//! - `speech` - Speech collaborator mocks
//! - `http` - Axum HTTP boundary

pub mod ai;
pub mod http;
pub mod nlu;
pub(crate) mod oracle_transport;
pub mod speech;

pub use ai::{FailoverAIProvider, GeminiProvider, MockAIProvider, OpenAIProvider};
pub use nlu::{HuggingFaceInference, MockTokenTagger, MockZeroShotClassifier};
