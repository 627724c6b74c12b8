//! Dialogue orchestrator - sequences the pipeline for one utterance.
//!
//! Empty input short-circuits before any oracle call. Otherwise intent
//! classification and entity extraction run concurrently, smalltalk goes to
//! the fallback resolver, and in conversational mode every other intent gets a
//! persona-conditioned reply. Oracle failures never escape: they come back as
//! a `DialogueAct` carrying an error marker.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::classify_intent::IntentClassifier;
use super::extract_entities::EntityExtractor;
use super::resolve_smalltalk::FallbackResolver;
use crate::domain::conversation::{
    AudioPayload, ConversationContext, PersonaPromptBuilder, Turn,
};
use crate::domain::dialogue::{DialogueAct, DialogueErrorKind, DialogueFault, Entities, Intent};
use crate::domain::persona::{PersonaCatalog, PersonaDescriptor, VoiceSettings};
use crate::ports::{AIProvider, CompletionRequest, OracleError, SpeechCapture, TextToSpeech};

/// Conversation context shared between the orchestrator and read-only views.
///
/// One writer at a time; readers may overlap each other but never a write.
pub type SharedConversation = Arc<RwLock<ConversationContext>>;

/// Whether non-smalltalk intents get a generated reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyMode {
    /// Intent and entities only; downstream collaborators answer.
    #[default]
    Structured,
    /// Persona-conditioned reply for every intent, recorded in the context.
    Conversational,
}

/// Tunables for the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub struct OrchestratorSettings {
    pub reply_mode: ReplyMode,
    /// Exchanges of history included in the prompt.
    pub context_exchanges: usize,
    pub max_reply_tokens: u32,
    /// Upper bound for each classification, tagging, smalltalk or synthesis call.
    pub oracle_timeout: Duration,
    /// Upper bound for a persona reply from the completion oracle.
    pub completion_timeout: Duration,
    /// Upper bound for a whole turn. Must stay below the transport's request
    /// timeout so callers always receive an act.
    pub turn_timeout: Duration,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            reply_mode: ReplyMode::Structured,
            context_exchanges: 5,
            max_reply_tokens: 256,
            oracle_timeout: Duration::from_secs(20),
            completion_timeout: Duration::from_secs(60),
            turn_timeout: Duration::from_secs(110),
        }
    }
}

/// Result of a voice turn: the act plus the synthesized reply, if any.
#[derive(Debug, Clone)]
pub struct VoiceResponse {
    pub act: DialogueAct,
    pub audio: Option<AudioPayload>,
}

/// Top-level coordinator for one conversation.
pub struct DialogueOrchestrator {
    classifier: IntentClassifier,
    extractor: EntityExtractor,
    resolver: FallbackResolver,
    completion: Option<Arc<dyn AIProvider>>,
    synthesizer: Option<Arc<dyn TextToSpeech>>,
    voice: VoiceSettings,
    persona: PersonaDescriptor,
    conversation: SharedConversation,
    settings: OrchestratorSettings,
}

impl DialogueOrchestrator {
    /// Creates an orchestrator in structured mode with the default persona and
    /// a fresh conversation.
    pub fn new(
        classifier: IntentClassifier,
        extractor: EntityExtractor,
        resolver: FallbackResolver,
    ) -> Self {
        Self {
            classifier,
            extractor,
            resolver,
            completion: None,
            synthesizer: None,
            voice: VoiceSettings::default(),
            persona: PersonaCatalog::builtin().default_persona().clone(),
            conversation: Arc::new(RwLock::new(ConversationContext::new())),
            settings: OrchestratorSettings::default(),
        }
    }

    /// Sets the completion oracle used for persona-conditioned replies.
    pub fn with_completion(mut self, provider: Arc<dyn AIProvider>) -> Self {
        self.completion = Some(provider);
        self
    }

    /// Selects a persona by name; unknown names fall back to the default.
    pub fn with_persona(mut self, name: &str) -> Self {
        self.persona = PersonaCatalog::builtin().resolve(name).clone();
        self
    }

    /// Uses an existing conversation context.
    pub fn with_conversation(mut self, conversation: SharedConversation) -> Self {
        self.conversation = conversation;
        self
    }

    /// Synthesizes recorded replies with the given voice.
    pub fn with_synthesizer(mut self, tts: Arc<dyn TextToSpeech>, voice: VoiceSettings) -> Self {
        self.synthesizer = Some(tts);
        self.voice = voice;
        self
    }

    pub fn with_settings(mut self, settings: OrchestratorSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn persona(&self) -> &PersonaDescriptor {
        &self.persona
    }

    pub fn settings(&self) -> &OrchestratorSettings {
        &self.settings
    }

    pub fn voice(&self) -> &VoiceSettings {
        &self.voice
    }

    /// Handle to the conversation context.
    pub fn conversation(&self) -> SharedConversation {
        Arc::clone(&self.conversation)
    }

    /// Processes one text utterance.
    pub async fn handle(&self, utterance: &str) -> DialogueAct {
        self.process(utterance).await.act
    }

    /// Processes the outcome of a speech capture.
    ///
    /// A failure signal yields a `CaptureFailure` act without any oracle call.
    pub async fn handle_capture(&self, capture: SpeechCapture) -> VoiceResponse {
        match capture {
            SpeechCapture::Utterance(text) => self.process(&text).await,
            other => {
                let message = other.failure_message().unwrap_or_default();
                tracing::info!(message = %message, "Speech capture produced no utterance");
                VoiceResponse {
                    act: DialogueAct::failed(DialogueErrorKind::CaptureFailure, message),
                    audio: None,
                }
            }
        }
    }

    /// Removes every turn from the conversation.
    pub async fn clear_conversation(&self) {
        self.conversation.write().await.clear();
        tracing::info!("Conversation cleared");
    }

    /// Snapshot of the turns that would go into the next prompt.
    pub async fn conversation_window(&self) -> Vec<Turn> {
        self.conversation
            .read()
            .await
            .window(self.settings.context_exchanges)
            .to_vec()
    }

    async fn process(&self, utterance: &str) -> VoiceResponse {
        let limit = self.settings.turn_timeout;
        match tokio::time::timeout(limit, self.process_turn(utterance)).await {
            Ok(response) => response,
            Err(_) => {
                tracing::warn!(
                    timeout_ms = limit.as_millis() as u64,
                    "Dialogue turn exceeded its deadline"
                );
                VoiceResponse {
                    act: DialogueAct::failed(
                        DialogueErrorKind::OracleUnavailable,
                        format!("The turn did not complete within {}ms", limit.as_millis()),
                    ),
                    audio: None,
                }
            }
        }
    }

    async fn process_turn(&self, utterance: &str) -> VoiceResponse {
        if utterance.trim().is_empty() {
            return VoiceResponse {
                act: DialogueAct::empty_input(),
                audio: None,
            };
        }

        let conversational = self.settings.reply_mode == ReplyMode::Conversational;
        if conversational && self.completion.is_none() {
            return VoiceResponse {
                act: DialogueAct::failed(
                    DialogueErrorKind::ConfigurationMissing,
                    "No completion provider is configured. Set an API key for the AI provider.",
                ),
                audio: None,
            };
        }

        let (classified, extracted) = tokio::join!(
            self.deadline(self.classifier.classify(utterance)),
            self.deadline(self.extractor.extract(utterance)),
        );

        let classification = match classified {
            Ok(classification) => classification,
            Err(err) => {
                return VoiceResponse {
                    act: DialogueAct::default().with_fault(fault_from_oracle("classification", &err)),
                    audio: None,
                }
            }
        };
        let intent = classification.intent;

        let act = match extracted {
            Ok(entities) => DialogueAct::understood(intent, entities),
            Err(err) => {
                return VoiceResponse {
                    act: DialogueAct::understood(intent, Entities::new())
                        .with_fault(fault_from_oracle("entity extraction", &err)),
                    audio: None,
                }
            }
        };

        let reply = if intent == Intent::Smalltalk {
            self.deadline(self.resolver.resolve(utterance))
                .await
                .map(|reply| Some(reply.text))
                .map_err(|err| fault_from_oracle("smalltalk generation", &err))
        } else if conversational {
            self.generate_reply(utterance).await.map(Some)
        } else {
            Ok(None)
        };

        let reply = match reply {
            Ok(reply) => reply,
            Err(fault) => {
                return VoiceResponse {
                    act: act.with_fault(fault),
                    audio: None,
                }
            }
        };

        let Some(reply) = reply else {
            tracing::info!(intent = %intent, "Served structured dialogue act");
            return VoiceResponse { act, audio: None };
        };

        let audio = if conversational {
            self.record_exchange(utterance, &reply).await
        } else {
            None
        };

        tracing::info!(intent = %intent, reply_len = reply.len(), "Served dialogue reply");
        VoiceResponse {
            act: act.with_reply(reply),
            audio,
        }
    }

    /// Bounds an oracle call by the configured oracle timeout.
    async fn deadline<T>(
        &self,
        call: impl Future<Output = Result<T, OracleError>>,
    ) -> Result<T, OracleError> {
        within(self.settings.oracle_timeout, call).await
    }

    /// Builds the persona prompt from the current window and asks the completion oracle.
    async fn generate_reply(&self, utterance: &str) -> Result<String, DialogueFault> {
        let Some(provider) = self.completion.as_ref() else {
            return Err(DialogueFault::new(
                DialogueErrorKind::ConfigurationMissing,
                "No completion provider is configured",
            ));
        };

        let prompt = {
            let context = self.conversation.read().await;
            PersonaPromptBuilder::build(
                &self.persona,
                context.window(self.settings.context_exchanges),
                utterance,
            )
        };

        let request = CompletionRequest::new(prompt).with_max_tokens(self.settings.max_reply_tokens);
        let trace_id = request.trace_id.clone();
        tracing::debug!(
            trace_id = %trace_id,
            persona = %self.persona.name,
            provider = %provider.provider_info().name,
            "Requesting persona reply"
        );

        let response = within(self.settings.completion_timeout, provider.complete(request))
            .await
            .map_err(|err| fault_from_oracle("reply generation", &err))?;

        let reply = response.content.trim();
        if reply.is_empty() {
            tracing::warn!(trace_id = %trace_id, "Completion oracle returned an empty reply");
            return Err(DialogueFault::new(
                DialogueErrorKind::OracleMalformedOutput,
                "The completion service returned an empty reply",
            ));
        }
        Ok(reply.to_string())
    }

    /// Synthesizes the reply (when configured) and appends the exchange.
    ///
    /// Both turns go in under one write guard, after the reply is complete.
    async fn record_exchange(&self, utterance: &str, reply: &str) -> Option<AudioPayload> {
        let audio = match self.synthesizer.as_ref() {
            Some(tts) => match self.deadline(tts.synthesize(reply, &self.voice)).await {
                Ok(audio) => Some(audio),
                Err(err) => {
                    tracing::warn!(error = %err, "Speech synthesis failed, storing reply without audio");
                    None
                }
            },
            None => None,
        };

        let mut assistant = Turn::assistant(reply);
        if let Some(audio) = audio.clone() {
            assistant = assistant.with_audio(audio);
        }

        self.conversation
            .write()
            .await
            .append_exchange(Turn::user(utterance), assistant);
        audio
    }
}

async fn within<T>(
    limit: Duration,
    call: impl Future<Output = Result<T, OracleError>>,
) -> Result<T, OracleError> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(OracleError::timeout(limit)),
    }
}

/// Converts an oracle failure into the fault carried by the act.
fn fault_from_oracle(stage: &str, err: &OracleError) -> DialogueFault {
    let kind = DialogueErrorKind::from(err);
    tracing::warn!(stage, error = %err, kind = %kind, "Oracle call failed");
    DialogueFault::new(kind, format!("{} failed: {}", stage, err))
}
