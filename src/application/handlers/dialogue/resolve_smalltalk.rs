//! Fallback response resolution for the `smalltalk` intent.
//!
//! Two states per invocation: `RuleCheck` tries canned replies, `Generate`
//! asks the generative oracle. A rule match never reaches the oracle.

use std::sync::Arc;

use crate::ports::{AIProvider, CompletionRequest, OracleError};

/// Default cap on generated length, in tokens.
pub const DEFAULT_SMALLTALK_MAX_TOKENS: u32 = 50;

/// A canned reply and the phrases that trigger it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmalltalkRule {
    /// Matched as case-insensitive substrings.
    pub triggers: &'static [&'static str],
    pub reply: &'static str,
}

impl SmalltalkRule {
    /// Returns true if any trigger occurs in the lowercased utterance.
    fn matches(&self, lowered: &str) -> bool {
        self.triggers.iter().any(|t| lowered.contains(t))
    }
}

/// Canned replies in precedence order: greeting, wellbeing, gratitude.
pub const SMALLTALK_RULES: [SmalltalkRule; 3] = [
    SmalltalkRule {
        triggers: &["hello", "hi"],
        reply: "Hello! How can I help you today?",
    },
    SmalltalkRule {
        triggers: &["how are you"],
        reply: "I'm doing well, thank you for asking! How can I assist you?",
    },
    SmalltalkRule {
        triggers: &["thank"],
        reply: "You're welcome! Is there anything else I can help with?",
    },
];

/// Resolver state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverState {
    RuleCheck,
    Generate,
}

/// Where a smalltalk reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Rule,
    Generated,
}

/// A resolved smalltalk reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmalltalkReply {
    pub text: String,
    pub source: ReplySource,
}

/// Rule-based short-circuit in front of a generative fallback.
pub struct FallbackResolver {
    generator: Arc<dyn AIProvider>,
    max_tokens: u32,
}

impl FallbackResolver {
    /// Creates a resolver that falls back to `generator`.
    pub fn new(generator: Arc<dyn AIProvider>) -> Self {
        Self {
            generator,
            max_tokens: DEFAULT_SMALLTALK_MAX_TOKENS,
        }
    }

    /// Sets the cap on generated length.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Returns the first rule whose trigger occurs in the utterance.
    pub fn match_rule(utterance: &str) -> Option<&'static SmalltalkRule> {
        let lowered = utterance.to_lowercase();
        SMALLTALK_RULES.iter().find(|rule| rule.matches(&lowered))
    }

    /// Resolves a reply for a smalltalk utterance.
    ///
    /// The generate state sends the raw utterance, not a persona prompt, and
    /// keeps only the first line of the generated text.
    pub async fn resolve(&self, utterance: &str) -> Result<SmalltalkReply, OracleError> {
        let mut state = ResolverState::RuleCheck;
        loop {
            match state {
                ResolverState::RuleCheck => match Self::match_rule(utterance) {
                    Some(rule) => {
                        tracing::debug!(reply = rule.reply, "Smalltalk rule matched");
                        return Ok(SmalltalkReply {
                            text: rule.reply.to_string(),
                            source: ReplySource::Rule,
                        });
                    }
                    None => state = ResolverState::Generate,
                },
                ResolverState::Generate => {
                    let request =
                        CompletionRequest::new(utterance).with_max_tokens(self.max_tokens);
                    let response = self.generator.complete(request).await?;
                    let text = first_line(&response.content).to_string();
                    if text.trim().is_empty() {
                        tracing::warn!(
                            model = %response.model,
                            generated_len = response.content.len(),
                            "Smalltalk continuation has an empty first line"
                        );
                        return Err(OracleError::malformed(
                            "generated continuation has an empty first line",
                        ));
                    }

                    tracing::debug!(
                        model = %response.model,
                        generated_len = response.content.len(),
                        "Smalltalk reply generated"
                    );
                    return Ok(SmalltalkReply {
                        text,
                        source: ReplySource::Generated,
                    });
                }
            }
        }
    }
}

/// First line of generated text.
fn first_line(text: &str) -> &str {
    let line = text.split('\n').next().unwrap_or_default();
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};

    #[tokio::test]
    async fn greeting_uses_canned_reply_without_oracle_call() {
        let generator = MockAIProvider::new();
        let resolver = FallbackResolver::new(Arc::new(generator.clone()));

        let reply = resolver.resolve("hello there").await.unwrap();

        assert_eq!(reply.text, "Hello! How can I help you today?");
        assert_eq!(reply.source, ReplySource::Rule);
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn unmatched_utterance_generates_first_line() {
        let generator = MockAIProvider::new()
            .with_response("It looks sunny today.\nIn other news, the stock market...");
        let resolver = FallbackResolver::new(Arc::new(generator.clone()));

        let reply = resolver.resolve("what is the weather").await.unwrap();

        assert_eq!(reply.text, "It looks sunny today.");
        assert_eq!(reply.source, ReplySource::Generated);
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn continuation_starting_with_blank_line_is_malformed() {
        let generator = MockAIProvider::new().with_response("\n\nIt is sunny in Paris.");
        let resolver = FallbackResolver::new(Arc::new(generator.clone()));

        let err = resolver.resolve("what is the weather").await.unwrap_err();

        assert!(err.is_malformed());
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn generation_uses_raw_utterance_and_token_cap() {
        let generator = MockAIProvider::new().with_response("ok");
        let resolver = FallbackResolver::new(Arc::new(generator.clone())).with_max_tokens(32);

        resolver.resolve("what is the weather").await.unwrap();

        let calls = generator.get_calls();
        assert_eq!(calls[0].prompt, "what is the weather");
        assert_eq!(calls[0].max_tokens, Some(32));
        assert_eq!(calls[0].candidates, 1);
    }

    #[tokio::test]
    async fn generation_failure_is_surfaced() {
        let generator = MockAIProvider::new().with_error(MockError::Unavailable {
            message: "model loading".to_string(),
        });
        let resolver = FallbackResolver::new(Arc::new(generator));

        let err = resolver.resolve("what is the weather").await.unwrap_err();
        assert!(matches!(err, OracleError::Unavailable { .. }));
    }

    #[test]
    fn rules_apply_in_precedence_order() {
        assert_eq!(
            FallbackResolver::match_rule("Hi, how are you?").unwrap().reply,
            SMALLTALK_RULES[0].reply
        );
        assert_eq!(
            FallbackResolver::match_rule("How are you doing").unwrap().reply,
            SMALLTALK_RULES[1].reply
        );
        assert_eq!(
            FallbackResolver::match_rule("THANKS a lot").unwrap().reply,
            SMALLTALK_RULES[2].reply
        );
        assert!(FallbackResolver::match_rule("what is the weather").is_none());
    }

    #[test]
    fn triggers_match_as_substrings() {
        assert_eq!(
            FallbackResolver::match_rule("this is nice").unwrap().reply,
            SMALLTALK_RULES[0].reply
        );
    }

    #[test]
    fn first_line_strips_carriage_return() {
        assert_eq!(first_line("one\r\ntwo"), "one");
        assert_eq!(first_line("single"), "single");
        assert_eq!(first_line(""), "");
    }
}
