//! NLU Oracle Adapters.
//!
//! - `HuggingFaceInference` - hosted zero-shot, token classification and text generation
//! - `MockZeroShotClassifier`, `MockTokenTagger` - configurable mocks for testing

mod hf_inference;
mod mock;

pub use hf_inference::{HuggingFaceConfig, HuggingFaceInference};
pub use mock::{MockTokenTagger, MockZeroShotClassifier};
