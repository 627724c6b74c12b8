//! Mock NLU oracles for testing.
//!
//! Both mocks return a fixed, configurable answer for every call and record
//! what they were asked. Clones share configuration and call history.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{OracleError, TaggedSpan, TokenTagger, ZeroShotClassifier, ZeroShotOutput};

/// What a mock classifier answers.
#[derive(Debug, Clone)]
enum ClassifierBehavior {
    /// Echo the candidate labels in order with uniform scores.
    Uniform,
    Ranking(Vec<(String, f32)>),
    Error(OracleError),
}

/// Mock zero-shot classifier.
#[derive(Debug, Clone)]
pub struct MockZeroShotClassifier {
    behavior: Arc<Mutex<ClassifierBehavior>>,
    calls: Arc<Mutex<Vec<(String, Vec<String>)>>>,
    delay: Duration,
}

impl Default for MockZeroShotClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl MockZeroShotClassifier {
    /// Creates a classifier that scores every candidate equally.
    pub fn new() -> Self {
        Self {
            behavior: Arc::new(Mutex::new(ClassifierBehavior::Uniform)),
            calls: Arc::new(Mutex::new(Vec::new())),
            delay: Duration::ZERO,
        }
    }

    /// Waits this long before answering each call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Answers every call with these labels and scores, in this order.
    pub fn with_ranking(self, ranking: &[(&str, f32)]) -> Self {
        let ranking = ranking
            .iter()
            .map(|(label, score)| (label.to_string(), *score))
            .collect();
        *self.behavior.lock().unwrap() = ClassifierBehavior::Ranking(ranking);
        self
    }

    /// Fails every call with this error.
    pub fn with_error(self, error: OracleError) -> Self {
        *self.behavior.lock().unwrap() = ClassifierBehavior::Error(error);
        self
    }

    /// Texts sent to the classifier, in call order.
    pub fn get_calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(text, _)| text.clone())
            .collect()
    }

    /// Candidate labels of the most recent call.
    pub fn last_candidates(&self) -> Option<Vec<String>> {
        self.calls
            .lock()
            .unwrap()
            .last()
            .map(|(_, labels)| labels.clone())
    }
}

#[async_trait]
impl ZeroShotClassifier for MockZeroShotClassifier {
    async fn classify(
        &self,
        text: &str,
        candidate_labels: &[String],
    ) -> Result<ZeroShotOutput, OracleError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), candidate_labels.to_vec()));

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let behavior = self.behavior.lock().unwrap().clone();
        match behavior {
            ClassifierBehavior::Uniform => {
                let share = 1.0 / candidate_labels.len().max(1) as f32;
                Ok(ZeroShotOutput::new(
                    candidate_labels.to_vec(),
                    vec![share; candidate_labels.len()],
                ))
            }
            ClassifierBehavior::Ranking(ranking) => {
                let (labels, scores): (Vec<String>, Vec<f32>) = ranking.into_iter().unzip();
                Ok(ZeroShotOutput::new(labels, scores))
            }
            ClassifierBehavior::Error(err) => Err(err),
        }
    }
}

/// Mock token tagger.
#[derive(Debug, Clone)]
pub struct MockTokenTagger {
    behavior: Arc<Mutex<Result<Vec<TaggedSpan>, OracleError>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl Default for MockTokenTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTokenTagger {
    /// Creates a tagger that recognizes nothing.
    pub fn new() -> Self {
        Self {
            behavior: Arc::new(Mutex::new(Ok(Vec::new()))),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answers every call with these spans.
    pub fn with_spans(self, spans: Vec<TaggedSpan>) -> Self {
        *self.behavior.lock().unwrap() = Ok(spans);
        self
    }

    /// Fails every call with this error.
    pub fn with_error(self, error: OracleError) -> Self {
        *self.behavior.lock().unwrap() = Err(error);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Texts sent to the tagger, in call order.
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenTagger for MockTokenTagger {
    async fn tag(&self, text: &str) -> Result<Vec<TaggedSpan>, OracleError> {
        self.calls.lock().unwrap().push(text.to_string());
        self.behavior.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn uniform_classifier_echoes_candidates() {
        let mock = MockZeroShotClassifier::new();
        let labels = vec!["a".to_string(), "b".to_string()];

        let output = mock.classify("text", &labels).await.unwrap();

        assert_eq!(output.labels, labels);
        assert_eq!(output.scores, vec![0.5, 0.5]);
        assert_eq!(mock.get_calls(), vec!["text".to_string()]);
    }

    #[tokio::test]
    async fn ranking_is_returned_for_every_call() {
        let mock = MockZeroShotClassifier::new().with_ranking(&[("x", 0.9), ("y", 0.1)]);

        for _ in 0..2 {
            let output = mock.classify("t", &[]).await.unwrap();
            assert_eq!(output.labels, vec!["x", "y"]);
        }
    }

    #[tokio::test]
    async fn tagger_configuration_is_shared_between_clones() {
        let mock = MockTokenTagger::new();
        let _configured = mock.clone().with_spans(vec![TaggedSpan::new("home", "PAGE")]);

        let spans = mock.tag("go home").await.unwrap();

        assert_eq!(spans.len(), 1);
        assert_eq!(mock.call_count(), 1);
    }
}
