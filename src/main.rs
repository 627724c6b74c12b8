use std::error::Error;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use voice_agent::adapters::ai::{
    FailoverAIProvider, GeminiConfig, GeminiProvider, OpenAIConfig, OpenAIProvider,
};
use voice_agent::adapters::http::{build_app, DialogueAppState};
use voice_agent::adapters::nlu::{HuggingFaceConfig, HuggingFaceInference};
use voice_agent::application::handlers::dialogue::{
    DialogueOrchestrator, EntityExtractor, FallbackResolver, IntentClassifier,
    OrchestratorSettings,
};
use voice_agent::config::{AiConfig, AiProvider, AppConfig};
use voice_agent::domain::dialogue::{CandidateIntentSet, SlotVocabulary};
use voice_agent::ports::{AIProvider, OracleError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let orchestrator = build_orchestrator(&config)?;
    let app = build_app(
        DialogueAppState::new(Arc::new(orchestrator)),
        &config.server.cors_origins_list(),
        config.server.request_timeout(),
    );

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "voice agent listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("voice agent stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_orchestrator(config: &AppConfig) -> Result<DialogueOrchestrator, OracleError> {
    let nlu = &config.nlu;
    let mut hf_config = HuggingFaceConfig::new()
        .with_base_url(&nlu.base_url)
        .with_classifier_model(&nlu.classifier_model)
        .with_tagger_model(&nlu.tagger_model)
        .with_generator_model(&nlu.generator_model)
        .with_timeout(nlu.oracle_timeout());
    if let Some(token) = nlu.api_token() {
        hf_config = hf_config.with_api_token(token);
    }
    let inference = Arc::new(HuggingFaceInference::new(hf_config)?);

    let dialogue = &config.dialogue;
    let classifier = IntentClassifier::new(inference.clone(), CandidateIntentSet::default());
    let extractor = EntityExtractor::new(inference.clone(), SlotVocabulary::default());
    let resolver =
        FallbackResolver::new(inference).with_max_tokens(dialogue.smalltalk_max_tokens);

    let settings = OrchestratorSettings {
        reply_mode: dialogue.reply_mode,
        context_exchanges: dialogue.context_exchanges,
        max_reply_tokens: config.ai.max_reply_tokens,
        oracle_timeout: nlu.oracle_timeout(),
        completion_timeout: config.ai.timeout(),
        turn_timeout: dialogue.turn_timeout(),
    };

    let mut orchestrator = DialogueOrchestrator::new(classifier, extractor, resolver)
        .with_persona(&dialogue.persona)
        .with_settings(settings);

    match completion_provider(&config.ai)? {
        Some(provider) => {
            tracing::info!(
                provider = %provider.provider_info().name,
                model = %provider.provider_info().model,
                "Completion provider configured"
            );
            orchestrator = orchestrator.with_completion(provider);
        }
        None => tracing::warn!(
            "No completion provider credentials; conversational replies will report configuration_missing"
        ),
    }

    Ok(orchestrator)
}

fn completion_provider(ai: &AiConfig) -> Result<Option<Arc<dyn AIProvider>>, OracleError> {
    let Some(primary) = build_provider(ai, ai.provider, ai.model.as_deref())? else {
        return Ok(None);
    };

    let mut failover = FailoverAIProvider::new(primary);
    if let Some(kind) = ai.fallback_provider {
        match build_provider(ai, kind, None)? {
            Some(fallback) => failover = failover.with_fallback(fallback),
            None => tracing::warn!(provider = ?kind, "Fallback provider has no API key, skipping"),
        }
    }
    Ok(Some(Arc::new(failover)))
}

fn build_provider(
    ai: &AiConfig,
    kind: AiProvider,
    model: Option<&str>,
) -> Result<Option<Arc<dyn AIProvider>>, OracleError> {
    let Some(key) = ai.api_key(kind) else {
        return Ok(None);
    };

    let provider: Arc<dyn AIProvider> = match kind {
        AiProvider::Gemini => {
            let mut gemini = GeminiConfig::new(key)
                .with_timeout(ai.timeout())
                .with_max_retries(ai.max_retries);
            if let Some(model) = model {
                gemini = gemini.with_model(model);
            }
            Arc::new(GeminiProvider::new(gemini)?)
        }
        AiProvider::OpenAI => {
            let mut openai = OpenAIConfig::new(key)
                .with_timeout(ai.timeout())
                .with_max_retries(ai.max_retries);
            if let Some(model) = model {
                openai = openai.with_model(model);
            }
            Arc::new(OpenAIProvider::new(openai)?)
        }
    };
    Ok(Some(provider))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
