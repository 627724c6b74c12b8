//! Intent classification over a fixed candidate set.
//!
//! Wraps a zero-shot classification oracle and guarantees closure: whatever
//! the oracle answers, the chosen label is a member of the candidate set.

use std::sync::Arc;

use crate::domain::dialogue::{CandidateIntentSet, Intent};
use crate::ports::{OracleError, ZeroShotClassifier, ZeroShotOutput};

/// Text sent to the oracle in place of an empty utterance.
pub const EMPTY_INPUT_PLACEHOLDER: &str = " ";

/// Width of the buckets scores are rounded into before ranking.
///
/// Two scores tie when they round to the same bucket. Scores closer than this
/// can still straddle a bucket boundary and rank apart; bucketing keeps the
/// sort order total, which a pairwise tolerance would not.
const SCORE_PRECISION: f32 = 1e-4;

/// A candidate and the score the oracle gave it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntentScore {
    pub intent: Intent,
    pub score: f32,
}

/// Result of classifying an utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentClassification {
    /// Winning label, always a member of the candidate set.
    pub intent: Intent,
    /// Every candidate, best first. Ties keep declaration order.
    pub ranking: Vec<IntentScore>,
    /// True when the oracle output had to be coerced (unknown, duplicate or missing labels).
    pub coerced: bool,
}

/// Maps utterances to one label of a fixed candidate set.
pub struct IntentClassifier {
    oracle: Arc<dyn ZeroShotClassifier>,
    candidates: CandidateIntentSet,
}

impl IntentClassifier {
    /// Creates a classifier over the given candidates.
    pub fn new(oracle: Arc<dyn ZeroShotClassifier>, candidates: CandidateIntentSet) -> Self {
        Self { oracle, candidates }
    }

    pub fn candidates(&self) -> &CandidateIntentSet {
        &self.candidates
    }

    /// Classifies the utterance. Empty input is replaced by a neutral placeholder.
    pub async fn classify(&self, utterance: &str) -> Result<IntentClassification, OracleError> {
        let text = if utterance.trim().is_empty() {
            EMPTY_INPUT_PLACEHOLDER
        } else {
            utterance
        };

        let output = self
            .oracle
            .classify(text, &self.candidates.label_strings())
            .await?;
        let classification = rank_candidates(&self.candidates, &output);

        tracing::debug!(
            intent = %classification.intent,
            ranking = ?classification.ranking,
            "Classified utterance"
        );
        Ok(classification)
    }
}

/// Rebuilds a ranking over the candidate set from raw oracle output.
///
/// Labels outside the set and repeated labels are ignored; candidates the
/// oracle did not score get 0.0. Sorting is stable over declaration order, so
/// the first-declared candidate wins ties.
pub fn rank_candidates(
    candidates: &CandidateIntentSet,
    output: &ZeroShotOutput,
) -> IntentClassification {
    let mut scores: Vec<Option<f32>> = vec![None; candidates.len()];
    let mut rejected: Vec<&str> = Vec::new();

    for (label, score) in output.pairs() {
        let slot = label
            .parse::<Intent>()
            .ok()
            .and_then(|intent| candidates.position(intent));
        match slot {
            Some(idx) if scores[idx].is_none() && score.is_finite() => scores[idx] = Some(score),
            _ => rejected.push(label),
        }
    }

    let coerced = !rejected.is_empty()
        || output.labels.len() != output.scores.len()
        || scores.iter().any(Option::is_none);
    if coerced {
        tracing::warn!(
            rejected = ?rejected,
            labels = output.labels.len(),
            scores = output.scores.len(),
            "Classifier output outside contract, coercing to candidate set"
        );
    }

    let mut ranking: Vec<IntentScore> = candidates
        .labels()
        .iter()
        .zip(scores)
        .map(|(intent, score)| IntentScore {
            intent: *intent,
            score: score.unwrap_or(0.0),
        })
        .collect();
    ranking.sort_by(|a, b| quantize(b.score).cmp(&quantize(a.score)));

    IntentClassification {
        intent: ranking[0].intent,
        ranking,
        coerced,
    }
}

/// Bucket index of a score at `SCORE_PRECISION` resolution.
fn quantize(score: f32) -> i64 {
    (score / SCORE_PRECISION).round() as i64
}
