//! Zero-Shot Classifier Port - text classification over caller-supplied labels.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::OracleError;

/// Port for zero-shot text classification.
///
/// The oracle scores the text against every candidate label and returns the
/// labels ranked best first.
#[async_trait]
pub trait ZeroShotClassifier: Send + Sync {
    /// Scores `text` against `candidate_labels`.
    async fn classify(
        &self,
        text: &str,
        candidate_labels: &[String],
    ) -> Result<ZeroShotOutput, OracleError>;
}

/// Ranked labels with their scores, parallel vectors, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZeroShotOutput {
    pub labels: Vec<String>,
    pub scores: Vec<f32>,
}

impl ZeroShotOutput {
    /// Creates an output from parallel label and score vectors.
    pub fn new(labels: Vec<String>, scores: Vec<f32>) -> Self {
        Self { labels, scores }
    }

    /// Iterates `(label, score)` pairs. Extra labels without a score are skipped.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, f32)> + '_ {
        self.labels
            .iter()
            .zip(self.scores.iter())
            .map(|(l, s)| (l.as_str(), *s))
    }
}
