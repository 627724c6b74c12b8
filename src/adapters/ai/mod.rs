//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port for the persona reply path.
//!
//! ## Available Adapters
//!
//! - `MockAIProvider` - Configurable mock for testing
//! - `GeminiProvider` - Google Gemini models (gemini-pro)
//! - `OpenAIProvider` - OpenAI chat models
//! - `FailoverAIProvider` - Wrapper with automatic failover between providers

mod failover_provider;
mod gemini_provider;
mod mock_provider;
mod openai_provider;

pub use failover_provider::FailoverAIProvider;
pub use gemini_provider::{GeminiConfig, GeminiProvider};
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
