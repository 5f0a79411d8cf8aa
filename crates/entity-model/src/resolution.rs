//! Resolution output types.

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::record::CompanyRecord;

/// The resolver's categorical verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// The top candidate is the answer.
    Accepted,
    /// A plausible match exists but needs review (near tie or borderline score).
    Ambiguous,
    /// No candidate is close enough, or there were no candidates.
    Rejected,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Ambiguous => "ambiguous",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A signal contributing to a candidate's score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreComponent {
    /// Signal name (e.g., "Name similarity").
    pub name: &'static str,
    /// Contribution; negative for penalties.
    pub value: f64,
    /// Human-readable detail.
    pub description: String,
}

/// A reference record scored against one query.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate {
    /// The scored record, shared with the reference snapshot.
    pub record: Arc<CompanyRecord>,
    /// Position of the record in database order.
    pub position: usize,
    /// Final score in [0, 1].
    pub score: f64,
    /// Signal breakdown that produced `score`.
    pub components: Vec<ScoreComponent>,
}

/// Render score components as `"Name: +NN%"` entries joined by `"; "`.
pub fn explain_components(components: &[ScoreComponent]) -> String {
    components
        .iter()
        .map(|c| format!("{}: {:+.0}%", c.name, c.value * 100.0))
        .collect::<Vec<_>>()
        .join("; ")
}

impl MatchCandidate {
    /// Human-readable explanation of the score.
    pub fn explain(&self) -> String {
        explain_components(&self.components)
    }
}

#[derive(Serialize)]
struct MatchView<'a> {
    #[serde(flatten)]
    record: &'a CompanyRecord,
    score: f64,
    signals: &'a [ScoreComponent],
}

impl Serialize for MatchCandidate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        MatchView {
            record: &self.record,
            score: self.score,
            signals: &self.components,
        }
        .serialize(serializer)
    }
}

/// Outcome of resolving one query.
///
/// `matches` is sorted by descending score with ties in database order,
/// and `final_match` is present exactly when the decision is accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionResult {
    /// The query as given by the caller.
    pub query: String,
    /// The query's normalized key.
    pub normalized: String,
    /// Country hint, if one was supplied.
    pub country: Option<String>,
    /// Verdict for this query.
    pub decision: Decision,
    /// Accepted record, if any.
    pub final_match: Option<Arc<CompanyRecord>>,
    /// Scored candidates, best first.
    pub matches: Vec<MatchCandidate>,
}

impl ResolutionResult {
    /// A rejected result with no candidates.
    pub fn rejected(
        query: impl Into<String>,
        normalized: impl Into<String>,
        country: Option<String>,
    ) -> Self {
        Self {
            query: query.into(),
            normalized: normalized.into(),
            country,
            decision: Decision::Rejected,
            final_match: None,
            matches: Vec::new(),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.decision == Decision::Accepted
    }

    pub fn final_record(&self) -> Option<&CompanyRecord> {
        self.final_match.as_deref()
    }

    pub fn top(&self) -> Option<&MatchCandidate> {
        self.matches.first()
    }

    pub fn top_score(&self) -> Option<f64> {
        self.top().map(|m| m.score)
    }
}

#[derive(Serialize)]
struct ResolutionView<'a> {
    query: &'a str,
    normalized: &'a str,
    country: Option<&'a str>,
    #[serde(rename = "final")]
    final_match: Option<&'a CompanyRecord>,
    decision: Decision,
    matches: &'a [MatchCandidate],
}

impl Serialize for ResolutionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ResolutionView {
            query: &self.query,
            normalized: &self.normalized,
            country: self.country.as_deref(),
            final_match: self.final_match.as_deref(),
            decision: self.decision,
            matches: &self.matches,
        }
        .serialize(serializer)
    }
}
