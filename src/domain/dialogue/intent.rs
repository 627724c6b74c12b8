//! Intent labels and the fixed candidate set they are drawn from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Coarse-grained purpose of an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Move to a page of the site.
    Navigate,
    /// Ask about open positions, optionally within a category.
    QueryJobs,
    /// Ask a general question about the organization.
    AskInfo,
    /// Casual conversation with no structured goal.
    Smalltalk,
}

impl Intent {
    /// All intents in declaration order.
    pub const ALL: [Intent; 4] = [
        Intent::Navigate,
        Intent::QueryJobs,
        Intent::AskInfo,
        Intent::Smalltalk,
    ];

    /// Returns the wire label for this intent.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Navigate => "navigate",
            Intent::QueryJobs => "query_jobs",
            Intent::AskInfo => "ask_info",
            Intent::Smalltalk => "smalltalk",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Intent::ALL
            .iter()
            .copied()
            .find(|intent| intent.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("intent", format!("unknown label '{}'", s))
            })
    }
}

/// Ordered, non-empty set of intent labels offered to the classifier.
///
/// Declaration order matters: it breaks ties between equally scored
/// candidates, the first-declared label winning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateIntentSet {
    labels: Vec<Intent>,
}

impl CandidateIntentSet {
    /// Creates a candidate set, rejecting empty or duplicated label lists.
    pub fn new(labels: Vec<Intent>) -> Result<Self, ValidationError> {
        if labels.is_empty() {
            return Err(ValidationError::empty_field("candidate_intents"));
        }
        for (idx, label) in labels.iter().enumerate() {
            if labels[..idx].contains(label) {
                return Err(ValidationError::invalid_format(
                    "candidate_intents",
                    format!("duplicate label '{}'", label),
                ));
            }
        }
        Ok(Self { labels })
    }

    /// Labels in declaration order.
    pub fn labels(&self) -> &[Intent] {
        &self.labels
    }

    /// Wire labels in declaration order, as sent to the classification oracle.
    pub fn label_strings(&self) -> Vec<String> {
        self.labels.iter().map(|l| l.as_str().to_string()).collect()
    }

    /// Returns true if the label belongs to this set.
    pub fn contains(&self, intent: Intent) -> bool {
        self.labels.contains(&intent)
    }

    /// Position of the label in declaration order.
    pub fn position(&self, intent: Intent) -> Option<usize> {
        self.labels.iter().position(|l| *l == intent)
    }

    /// First-declared label.
    pub fn first(&self) -> Intent {
        self.labels[0]
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for CandidateIntentSet {
    fn default() -> Self {
        Self {
            labels: Intent::ALL.to_vec(),
        }
    }
}
