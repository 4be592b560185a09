use std::collections::{BTreeMap, BTreeSet};

use crate::model::errors::RankError;
use crate::model::hierarchy::{RankScope, Semester};
use crate::model::ranks::{RankEstimate, RankVariant};

/// One assessment's normalized rank paired with its owning course's weight.
///
/// `course` is the course's position within the scope; ids are labels only and
/// may repeat across units.
#[derive(Debug, Clone, PartialEq)]
pub struct RankSample<'a> {
    pub course: usize,
    pub course_id: &'a str,
    pub weight: f64,
    pub normalized_rank: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollupOutcome {
    pub weighted_sum: f64,
    pub weight_denominator: f64,
    pub average_normalized: f64,
    pub absolute_rank: u32,
}

/// Weighted average of normalized ranks, scaled back to the cohort.
///
/// A course adds its weight to the numerator once per sample but to the
/// denominator once in total. The scaled rank rounds half to even, like the
/// `Nearest` mean-rank policy, then clamps into `[1, cohort_size]`.
pub fn weighted_rollup(
    samples: &[RankSample<'_>],
    cohort_size: usize,
) -> Result<RollupOutcome, RankError> {
    if samples.is_empty() || cohort_size == 0 {
        return Err(RankError::ZeroWeightScope);
    }

    let mut course_weights: BTreeMap<usize, f64> = BTreeMap::new();
    let mut weighted_sum = 0.0f64;
    for sample in samples {
        if let Some(&first) = course_weights.get(&sample.course) {
            if first != sample.weight {
                return Err(RankError::InconsistentCourseWeight {
                    course: sample.course_id.to_string(),
                    first,
                    second: sample.weight,
                });
            }
        } else {
            course_weights.insert(sample.course, sample.weight);
        }
        weighted_sum += sample.normalized_rank * sample.weight;
    }

    let weight_denominator: f64 = course_weights.values().sum();
    if weight_denominator <= 0.0 {
        return Err(RankError::ZeroWeightScope);
    }

    let average_normalized = weighted_sum / weight_denominator;
    let scaled = (average_normalized * cohort_size as f64).round_ties_even();
    let absolute_rank = scaled.clamp(1.0, cohort_size as f64) as u32;

    Ok(RollupOutcome {
        weighted_sum,
        weight_denominator,
        average_normalized,
        absolute_rank,
    })
}

/// Largest participant count over the qualifying assessments of `scope`.
pub fn cohort_size(scope: &(impl RankScope + ?Sized)) -> usize {
    scope
        .courses()
        .iter()
        .flat_map(|c| c.assessments.iter())
        .map(|a| a.participants())
        .max()
        .unwrap_or(0)
}

pub fn collect_samples<'a>(
    scope: &'a (impl RankScope + ?Sized),
    variant: RankVariant,
) -> Vec<RankSample<'a>> {
    let mut samples = Vec::new();
    for (position, course) in scope.courses().into_iter().enumerate() {
        for assessment in &course.assessments {
            samples.push(RankSample {
                course: position,
                course_id: course.id.as_str(),
                weight: course.weight,
                normalized_rank: assessment.ranks.normalized(variant),
            });
        }
    }
    samples
}

/// Best, mean and worst class rank over every course in `scope`.
pub fn estimate_scope(scope: &(impl RankScope + ?Sized)) -> Result<RankEstimate, RankError> {
    let cohort = cohort_size(scope);

    let mut absolute = [0u32; 3];
    let mut normalized = [0.0f64; 3];
    let mut assessments_used = 0usize;
    let mut courses_used = 0usize;
    for (slot, variant) in RankVariant::all().into_iter().enumerate() {
        let samples = collect_samples(scope, variant);
        let outcome = weighted_rollup(&samples, cohort)?;
        tracing::debug!(
            variant = variant.name(),
            weighted_sum = outcome.weighted_sum,
            denominator = outcome.weight_denominator,
            rank = outcome.absolute_rank,
            "rollup"
        );
        absolute[slot] = outcome.absolute_rank;
        normalized[slot] = outcome.average_normalized;
        assessments_used = samples.len();
        courses_used = samples
            .iter()
            .map(|s| s.course)
            .collect::<BTreeSet<_>>()
            .len();
    }

    Ok(RankEstimate {
        best: absolute[0],
        mean: absolute[1],
        worst: absolute[2],
        cohort_size: cohort,
        normalized_best: normalized[0],
        normalized_mean: normalized[1],
        normalized_worst: normalized[2],
        assessments_used,
        courses_used,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnitEstimate {
    pub id: String,
    pub name: String,
    pub estimate: Option<RankEstimate>,
}

/// Per-unit estimates; a unit without rankable data yields `None` instead of failing the run.
pub fn estimate_units(semester: &Semester) -> Vec<UnitEstimate> {
    semester
        .units
        .iter()
        .map(|unit| {
            let estimate = match estimate_scope(unit) {
                Ok(e) => Some(e),
                Err(err) => {
                    tracing::warn!(unit = %unit.id, "no unit estimate: {err}");
                    None
                }
            };
            UnitEstimate {
                id: unit.id.clone(),
                name: unit.name.clone(),
                estimate,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_rollup.rs"]
mod tests;
