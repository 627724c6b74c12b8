//! Hugging Face Inference API adapter.
//!
//! One client serves all three hosted oracles:
//!
//! - zero-shot classification (`facebook/bart-large-mnli`) as `ZeroShotClassifier`
//! - token classification (`dslim/bert-base-NER`) as `TokenTagger`
//! - text generation (`gpt2`) as `AIProvider`, used for smalltalk fallback
//!
//! Every request is `POST {base_url}/{model}` with `{"inputs", "parameters", "options"}`.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::adapters::oracle_transport::{build_client, check_status, map_send_error, with_retries};
use crate::ports::{
    AIProvider, CompletionRequest, CompletionResponse, FinishReason, OracleError, ProviderInfo,
    TaggedSpan, TokenTagger, ZeroShotClassifier, ZeroShotOutput,
};

/// Configuration for the hosted inference oracles.
#[derive(Debug, Clone)]
pub struct HuggingFaceConfig {
    /// Optional access token; anonymous requests are rate limited harder.
    api_token: Option<Secret<String>>,
    pub base_url: String,
    pub classifier_model: String,
    pub tagger_model: String,
    pub generator_model: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            base_url: "https://api-inference.huggingface.co/models".to_string(),
            classifier_model: "facebook/bart-large-mnli".to_string(),
            tagger_model: "dslim/bert-base-NER".to_string(),
            generator_model: "gpt2".to_string(),
            timeout: Duration::from_secs(20),
            max_retries: 2,
        }
    }
}

impl HuggingFaceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(Secret::new(token.into()));
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_classifier_model(mut self, model: impl Into<String>) -> Self {
        self.classifier_model = model.into();
        self
    }

    pub fn with_tagger_model(mut self, model: impl Into<String>) -> Self {
        self.tagger_model = model.into();
        self
    }

    pub fn with_generator_model(mut self, model: impl Into<String>) -> Self {
        self.generator_model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn has_token(&self) -> bool {
        self.api_token.is_some()
    }
}

/// Client for the hosted inference API.
pub struct HuggingFaceInference {
    config: HuggingFaceConfig,
    client: Client,
}

impl HuggingFaceInference {
    pub fn new(config: HuggingFaceConfig) -> Result<Self, OracleError> {
        let client = build_client(config.timeout)?;
        Ok(Self { config, client })
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), model)
    }

    /// Posts one inference request and decodes the JSON answer.
    async fn infer<P, R>(&self, model: &str, inputs: &str, parameters: P) -> Result<R, OracleError>
    where
        P: Serialize + Send + Sync,
        R: DeserializeOwned + Send,
    {
        let body = InferenceRequest {
            inputs,
            parameters: &parameters,
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        let body = &body;
        with_retries(model, self.config.max_retries, move || async move {
            let mut builder = self.client.post(self.model_url(model)).json(body);
            if let Some(token) = &self.config.api_token {
                builder = builder.bearer_auth(token.expose_secret());
            }

            let response = builder
                .send()
                .await
                .map_err(|e| map_send_error(e, self.config.timeout))?;
            let response = check_status(response).await?;

            response
                .json::<R>()
                .await
                .map_err(|e| OracleError::parse(format!("Unexpected {} response: {}", model, e)))
        })
        .await
    }
}

#[async_trait]
impl ZeroShotClassifier for HuggingFaceInference {
    async fn classify(
        &self,
        text: &str,
        candidate_labels: &[String],
    ) -> Result<ZeroShotOutput, OracleError> {
        tracing::debug!(model = %self.config.classifier_model, "Zero-shot classification");
        let raw: ZeroShotPayload = self
            .infer(
                &self.config.classifier_model,
                text,
                ZeroShotParameters { candidate_labels },
            )
            .await?;
        raw.into_output()
    }
}

#[async_trait]
impl TokenTagger for HuggingFaceInference {
    async fn tag(&self, text: &str) -> Result<Vec<TaggedSpan>, OracleError> {
        tracing::debug!(model = %self.config.tagger_model, "Token classification");
        self.infer(
            &self.config.tagger_model,
            text,
            TaggerParameters {
                aggregation_strategy: "simple",
            },
        )
        .await
    }
}

#[async_trait]
impl AIProvider for HuggingFaceInference {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, OracleError> {
        tracing::debug!(
            trace_id = %request.trace_id,
            model = %self.config.generator_model,
            "Text generation"
        );
        let generated: Vec<GeneratedText> = self
            .infer(
                &self.config.generator_model,
                &request.prompt,
                GenerationParameters {
                    max_length: request.max_tokens,
                    temperature: request.temperature,
                    num_return_sequences: request.candidates,
                    return_full_text: false,
                },
            )
            .await?;

        let first = generated
            .into_iter()
            .next()
            .ok_or_else(|| OracleError::malformed("Text generation returned no sequences"))?;

        Ok(CompletionResponse::new(first.generated_text, &self.config.generator_model)
            .with_finish_reason(FinishReason::Stop))
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("huggingface", &self.config.generator_model)
    }
}

// ----- Inference API Types -----

#[derive(Debug, Serialize)]
struct InferenceRequest<'a, P> {
    inputs: &'a str,
    parameters: &'a P,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Debug, Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: &'a [String],
}

#[derive(Debug, Serialize)]
struct TaggerParameters {
    aggregation_strategy: &'static str,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    num_return_sequences: u32,
    return_full_text: bool,
}

/// Zero-shot answers come either as one object or as a list of label/score pairs.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ZeroShotPayload {
    Ranked(ZeroShotOutput),
    Pairs(Vec<LabelScore>),
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

impl ZeroShotPayload {
    fn into_output(self) -> Result<ZeroShotOutput, OracleError> {
        let output = match self {
            ZeroShotPayload::Ranked(output) => output,
            ZeroShotPayload::Pairs(pairs) => {
                let (labels, scores): (Vec<String>, Vec<f32>) =
                    pairs.into_iter().map(|p| (p.label, p.score)).unzip();
                ZeroShotOutput::new(labels, scores)
            }
        };
        if output.labels.is_empty() {
            return Err(OracleError::malformed("Zero-shot classifier returned no labels"));
        }
        Ok(output)
    }
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_models_match_hosted_pipeline() {
        let config = HuggingFaceConfig::default();
        assert_eq!(config.classifier_model, "facebook/bart-large-mnli");
        assert_eq!(config.tagger_model, "dslim/bert-base-NER");
        assert_eq!(config.generator_model, "gpt2");
        assert!(!config.has_token());
    }

    #[test]
    fn model_url_joins_base_and_model() {
        let client = HuggingFaceInference::new(
            HuggingFaceConfig::new().with_base_url("http://localhost:8080/models/"),
        )
        .unwrap();
        assert_eq!(
            client.model_url("dslim/bert-base-NER"),
            "http://localhost:8080/models/dslim/bert-base-NER"
        );
    }

    #[test]
    fn zero_shot_request_shape() {
        let labels = vec!["navigate".to_string(), "smalltalk".to_string()];
        let params = ZeroShotParameters {
            candidate_labels: &labels,
        };
        let body = InferenceRequest {
            inputs: "go home",
            parameters: &params,
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "inputs": "go home",
                "parameters": {"candidate_labels": ["navigate", "smalltalk"]},
                "options": {"wait_for_model": true}
            })
        );
    }

    #[test]
    fn generation_parameters_cap_length_and_sequences() {
        let json = serde_json::to_value(GenerationParameters {
            max_length: Some(50),
            temperature: None,
            num_return_sequences: 1,
            return_full_text: false,
        })
        .unwrap();

        assert_eq!(json["max_length"], 50);
        assert_eq!(json["num_return_sequences"], 1);
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn zero_shot_payload_accepts_both_shapes() {
        let object: ZeroShotPayload = serde_json::from_str(
            r#"{"sequence":"hi","labels":["smalltalk","navigate"],"scores":[0.9,0.1]}"#,
        )
        .unwrap();
        assert_eq!(object.into_output().unwrap().labels[0], "smalltalk");

        let pairs: ZeroShotPayload = serde_json::from_str(
            r#"[{"label":"navigate","score":0.7},{"label":"smalltalk","score":0.3}]"#,
        )
        .unwrap();
        let output = pairs.into_output().unwrap();
        assert_eq!(output.labels, vec!["navigate", "smalltalk"]);
        assert_eq!(output.scores, vec![0.7, 0.3]);
    }

    #[test]
    fn empty_zero_shot_payload_is_malformed() {
        let payload: ZeroShotPayload = serde_json::from_str("[]").unwrap();
        assert!(payload.into_output().unwrap_err().is_malformed());
    }

    #[test]
    fn tagger_payload_deserializes_into_spans() {
        let spans: Vec<TaggedSpan> = serde_json::from_str(
            r#"[{"entity_group":"ORG","score":0.99,"word":"Acme","start":0,"end":4}]"#,
        )
        .unwrap();
        assert_eq!(spans[0].entity_group, "ORG");
        assert_eq!(spans[0].start, Some(0));
    }
}
