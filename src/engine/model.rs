//! Contains the core data structures for the application.

use serde::{Deserialize, Serialize};

/// One feature as scored by the model.
///
/// Field values are taken verbatim from the model's JSON; nothing here is
/// range-checked or recomputed. R/I/C/E are meant to be 1–10 but any JSON
/// number is kept, fractional or not.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FeatureScore {
    pub name: String,
    #[serde(rename = "R")]
    pub reach: f64,
    #[serde(rename = "I")]
    pub impact: f64,
    #[serde(rename = "C")]
    pub confidence: f64,
    #[serde(rename = "E")]
    pub effort: f64,
    pub rice_score: f64,
}

impl FeatureScore {
    /// R×I×C/E computed locally. `None` when effort is zero.
    ///
    /// Display only: ranking and bubble size use the model's `rice_score`.
    pub fn computed_rice(&self) -> Option<f64> {
        (self.effort != 0.0).then(|| self.reach * self.impact * self.confidence / self.effort)
    }

    /// Whether the model's arithmetic disagrees with [`Self::computed_rice`].
    pub fn score_mismatch(&self) -> bool {
        match self.computed_rice() {
            Some(local) => (local - self.rice_score).abs() > 0.05,
            None => true,
        }
    }
}

/// The ordered records of a single run. Position is the only key.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ScoreSet {
    records: Vec<FeatureScore>,
}

impl ScoreSet {
    pub fn new(records: Vec<FeatureScore>) -> Self {
        Self { records }
    }

    /// Records in the order the model returned them.
    pub fn records(&self) -> &[FeatureScore] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FeatureScore> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a ScoreSet {
    type Item = &'a FeatureScore;
    type IntoIter = std::slice::Iter<'a, FeatureScore>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
