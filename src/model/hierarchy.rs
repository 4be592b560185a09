use std::fmt;

use crate::model::errors::RankError;
use crate::model::ranks::AssessmentRanks;
use crate::model::rounding::RoundingPolicy;
use crate::model::scores::ScoreSet;
use crate::pipeline::stage2_assessment::rank_assessment;

#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub id: String,
    pub name: String,
    pub scores: ScoreSet,
    pub subject_score: f64,
    pub ranks: AssessmentRanks,
}

impl Assessment {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        scores: ScoreSet,
        subject_score: f64,
        rounding: RoundingPolicy,
    ) -> Result<Self, RankError> {
        let id = id.into();
        let ranks = rank_assessment(&id, &scores, subject_score, rounding)?;
        Ok(Self {
            id,
            name: name.into(),
            scores,
            subject_score,
            ranks,
        })
    }

    pub fn participants(&self) -> usize {
        self.scores.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    NotSat,
    MissingMarks,
    Unparseable(String),
    Degenerate,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotSat => write!(f, "not_sat"),
            SkipReason::MissingMarks => write!(f, "missing_marks"),
            SkipReason::Unparseable(detail) => write!(f, "unparseable ({detail})"),
            SkipReason::Degenerate => write!(f, "degenerate"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedAssessment {
    pub id: String,
    pub name: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub weight: f64,
    pub assessments: Vec<Assessment>,
    pub skipped: Vec<SkippedAssessment>,
}

impl Course {
    /// Constant-score assessments are moved to `skipped` as `Degenerate`.
    ///
    /// Weight must be finite and non-negative; `0.0` is accepted and simply
    /// contributes nothing to a rollup.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        weight: f64,
        assessments: Vec<Assessment>,
        mut skipped: Vec<SkippedAssessment>,
    ) -> Result<Self, RankError> {
        let id = id.into();
        if !weight.is_finite() || weight < 0.0 {
            return Err(RankError::InvalidWeight { course: id, weight });
        }

        let mut kept = Vec::with_capacity(assessments.len());
        for assessment in assessments {
            if assessment.scores.is_constant() {
                tracing::debug!(
                    course = %id,
                    assessment = %assessment.id,
                    "dropping assessment with identical marks"
                );
                skipped.push(SkippedAssessment {
                    id: assessment.id,
                    name: assessment.name,
                    reason: SkipReason::Degenerate,
                });
            } else {
                kept.push(assessment);
            }
        }

        Ok(Self {
            id,
            name: name.into(),
            weight,
            assessments: kept,
            skipped,
        })
    }
}

/// Curricular unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub id: String,
    pub name: String,
    pub courses: Vec<Course>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Semester {
    pub number: u32,
    pub units: Vec<Unit>,
}

/// Anything whose courses can be rolled up into one estimate.
pub trait RankScope {
    fn courses(&self) -> Vec<&Course>;
}

impl RankScope for Course {
    fn courses(&self) -> Vec<&Course> {
        vec![self]
    }
}

impl RankScope for Unit {
    fn courses(&self) -> Vec<&Course> {
        self.courses.iter().collect()
    }
}

impl RankScope for Semester {
    fn courses(&self) -> Vec<&Course> {
        self.units.iter().flat_map(|u| u.courses.iter()).collect()
    }
}

impl RankScope for [Course] {
    fn courses(&self) -> Vec<&Course> {
        self.iter().collect()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/hierarchy.rs"]
mod tests;
