//! Speech Adapters.
//!
//! Capture and synthesis run outside this service; these mocks stand in for
//! them in tests and in text-only deployments.

mod mock;

pub use mock::{MockSpeechToText, MockTextToSpeech};
