use crate::model::errors::RankError;

/// Every mark awarded for one assessment, the subject's included.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSet {
    scores: Vec<f64>,
}

impl ScoreSet {
    /// `label` only feeds error messages.
    pub fn new(label: &str, scores: Vec<f64>) -> Result<Self, RankError> {
        if scores.is_empty() {
            return Err(RankError::EmptyScoreSet {
                assessment: label.to_string(),
            });
        }
        if scores.iter().any(|s| !s.is_finite()) {
            return Err(RankError::NonFiniteScore {
                assessment: label.to_string(),
            });
        }
        Ok(Self { scores })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// All participants share one mark; such a set says nothing about rank.
    pub fn is_constant(&self) -> bool {
        let first = self.scores[0];
        self.scores.iter().all(|&s| s == first)
    }
}
