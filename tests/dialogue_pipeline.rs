//! Integration tests for the dialogue pipeline.
//!
//! Drives the orchestrator end to end with mock oracles:
//! 1. Structured acts for navigation and job queries
//! 2. Short-circuit paths that make no oracle call
//! 3. Conversational replies recorded in the context store
//! 4. Voice turns from speech capture through synthesis

use std::sync::Arc;

use voice_agent::adapters::ai::{MockAIProvider, MockError};
use voice_agent::adapters::nlu::{MockTokenTagger, MockZeroShotClassifier};
use voice_agent::adapters::speech::{MockSpeechToText, MockTextToSpeech};
use voice_agent::application::handlers::dialogue::{
    DialogueOrchestrator, EntityExtractor, FallbackResolver, IntentClassifier,
    OrchestratorSettings, ReplyMode,
};
use voice_agent::domain::conversation::TurnRole;
use voice_agent::domain::dialogue::{
    CandidateIntentSet, DialogueErrorKind, Intent, Slot, SlotVocabulary,
};
use voice_agent::domain::persona::VoiceSettings;
use voice_agent::ports::{SpeechCapture, SpeechToText, TaggedSpan};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Pipeline {
    classifier: MockZeroShotClassifier,
    tagger: MockTokenTagger,
    generator: MockAIProvider,
    completion: MockAIProvider,
}

impl Pipeline {
    fn new() -> Self {
        Self {
            classifier: MockZeroShotClassifier::new(),
            tagger: MockTokenTagger::new(),
            generator: MockAIProvider::new(),
            completion: MockAIProvider::new(),
        }
    }

    fn orchestrator(&self, mode: ReplyMode) -> DialogueOrchestrator {
        DialogueOrchestrator::new(
            IntentClassifier::new(
                Arc::new(self.classifier.clone()),
                CandidateIntentSet::default(),
            ),
            EntityExtractor::new(Arc::new(self.tagger.clone()), SlotVocabulary::default()),
            FallbackResolver::new(Arc::new(self.generator.clone())),
        )
        .with_settings(OrchestratorSettings {
            reply_mode: mode,
            ..Default::default()
        })
    }

    fn oracle_calls(&self) -> usize {
        self.classifier.get_calls().len()
            + self.tagger.call_count()
            + self.generator.call_count()
            + self.completion.call_count()
    }
}

// =============================================================================
// Structured acts
// =============================================================================

#[tokio::test]
async fn navigation_request_yields_page_slot() {
    let pipeline = Pipeline::new();
    pipeline
        .classifier
        .clone()
        .with_ranking(&[("navigate", 0.91), ("ask_info", 0.05), ("query_jobs", 0.04)]);
    pipeline
        .tagger
        .clone()
        .with_spans(vec![TaggedSpan::new("careers", "PAGE")]);

    let act = pipeline
        .orchestrator(ReplyMode::Structured)
        .handle("go to careers page")
        .await;

    assert_eq!(act.intent, Some(Intent::Navigate));
    assert_eq!(act.entities.get(&Slot::Page).map(String::as_str), Some("careers"));
    assert!(act.reply.is_none());
    assert!(act.error.is_none());
    assert_eq!(pipeline.completion.call_count(), 0);
}

#[tokio::test]
async fn job_query_yields_category_slot() {
    let pipeline = Pipeline::new();
    pipeline.classifier.clone().with_ranking(&[("query_jobs", 0.8), ("navigate", 0.2)]);
    pipeline
        .tagger
        .clone()
        .with_spans(vec![
            TaggedSpan::new("Sales", "JOB"),
            TaggedSpan::new("home", "ORG"),
        ]);

    let act = pipeline
        .orchestrator(ReplyMode::Structured)
        .handle("any openings in sales?")
        .await;

    assert_eq!(act.intent, Some(Intent::QueryJobs));
    assert_eq!(act.entities.get(&Slot::Category).map(String::as_str), Some("sales"));
    assert!(!act.entities.contains_key(&Slot::Page));
}

#[tokio::test]
async fn classifier_sees_full_candidate_set() {
    let pipeline = Pipeline::new();

    pipeline
        .orchestrator(ReplyMode::Structured)
        .handle("where can I read about you")
        .await;

    let candidates = pipeline.classifier.last_candidates().unwrap();
    assert_eq!(
        candidates,
        vec!["navigate", "query_jobs", "ask_info", "smalltalk"]
    );
}

// =============================================================================
// Short-circuit paths
// =============================================================================

#[tokio::test]
async fn empty_input_makes_no_oracle_call() {
    let pipeline = Pipeline::new();
    let orchestrator = pipeline.orchestrator(ReplyMode::Conversational);

    for input in ["", "   ", "\n\t"] {
        let act = orchestrator.handle(input).await;
        assert_eq!(act.error_kind(), Some(DialogueErrorKind::InputEmpty));
        assert!(act.intent.is_none());
        assert!(act.entities.is_empty());
    }

    assert_eq!(pipeline.oracle_calls(), 0);
}

#[tokio::test]
async fn conversational_mode_without_completion_is_configuration_missing() {
    let pipeline = Pipeline::new();

    let act = pipeline
        .orchestrator(ReplyMode::Conversational)
        .handle("tell me about the company")
        .await;

    assert_eq!(act.error_kind(), Some(DialogueErrorKind::ConfigurationMissing));
    assert!(!act.error.unwrap().message.is_empty());
    assert_eq!(pipeline.oracle_calls(), 0);
}

#[tokio::test]
async fn capture_failure_makes_no_oracle_call() {
    let pipeline = Pipeline::new();
    let speech = MockSpeechToText::new().with_capture(SpeechCapture::Unrecognized);

    let response = pipeline
        .orchestrator(ReplyMode::Structured)
        .handle_capture(speech.capture().await)
        .await;

    assert_eq!(response.act.error_kind(), Some(DialogueErrorKind::CaptureFailure));
    assert!(response.audio.is_none());
    assert_eq!(pipeline.oracle_calls(), 0);
}

// =============================================================================
// Conversational replies
// =============================================================================

#[tokio::test]
async fn conversational_exchange_is_recorded_and_fed_back() {
    let pipeline = Pipeline::new();
    pipeline.classifier.clone().with_ranking(&[("ask_info", 0.7), ("navigate", 0.3)]);
    pipeline
        .completion
        .clone()
        .with_response("We build voice assistants.")
        .with_response("Mostly in Rust.");

    let orchestrator = pipeline
        .orchestrator(ReplyMode::Conversational)
        .with_completion(Arc::new(pipeline.completion.clone()))
        .with_persona("Friendly Helper");

    let first = orchestrator.handle("what do you do?").await;
    assert_eq!(first.reply.as_deref(), Some("We build voice assistants."));

    let second = orchestrator.handle("in which language?").await;
    assert_eq!(second.reply.as_deref(), Some("Mostly in Rust."));

    let window = orchestrator.conversation_window().await;
    let roles: Vec<TurnRole> = window.iter().map(|t| t.role()).collect();
    assert_eq!(
        roles,
        vec![TurnRole::User, TurnRole::Assistant, TurnRole::User, TurnRole::Assistant]
    );
    assert_eq!(window[2].content(), "in which language?");

    let second_prompt = &pipeline.completion.get_calls()[1].prompt;
    assert!(second_prompt.contains("Previous conversation:"));
    assert!(second_prompt.contains("We build voice assistants."));
    assert!(second_prompt.ends_with("User: in which language?\nAssistant:"));
}

#[tokio::test]
async fn failed_reply_leaves_context_untouched() {
    let pipeline = Pipeline::new();
    pipeline.classifier.clone().with_ranking(&[("ask_info", 1.0)]);
    pipeline.completion.clone().with_error(MockError::Unavailable {
        message: "upstream down".to_string(),
    });

    let orchestrator = pipeline
        .orchestrator(ReplyMode::Conversational)
        .with_completion(Arc::new(pipeline.completion.clone()));

    let act = orchestrator.handle("who are you?").await;

    assert_eq!(act.intent, Some(Intent::AskInfo));
    assert_eq!(act.error_kind(), Some(DialogueErrorKind::OracleUnavailable));
    assert!(orchestrator.conversation_window().await.is_empty());
}

#[tokio::test]
async fn smalltalk_rule_answers_without_generation() {
    let pipeline = Pipeline::new();
    pipeline.classifier.clone().with_ranking(&[("smalltalk", 0.95)]);

    let act = pipeline
        .orchestrator(ReplyMode::Structured)
        .handle("Hello there")
        .await;

    assert_eq!(act.intent, Some(Intent::Smalltalk));
    assert!(act.reply.is_some());
    assert_eq!(pipeline.generator.call_count(), 0);
}

#[tokio::test]
async fn voice_turn_synthesizes_and_stores_audio() {
    let pipeline = Pipeline::new();
    pipeline.classifier.clone().with_ranking(&[("ask_info", 1.0)]);
    pipeline.completion.clone().with_response("Bonjour!");
    let tts = MockTextToSpeech::new();
    let speech = MockSpeechToText::new().with_utterance("say hi in french");

    let orchestrator = pipeline
        .orchestrator(ReplyMode::Conversational)
        .with_completion(Arc::new(pipeline.completion.clone()))
        .with_synthesizer(Arc::new(tts.clone()), VoiceSettings::new("fr", true));

    let response = orchestrator.handle_capture(speech.capture().await).await;

    assert_eq!(response.act.reply.as_deref(), Some("Bonjour!"));
    assert!(response.audio.is_some());

    let calls = tts.get_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "Bonjour!");
    assert_eq!(calls[0].1.language, "fr");

    let window = orchestrator.conversation_window().await;
    assert!(window[1].audio().is_some());
}
