use crate::model::errors::RankError;
use crate::model::ranks::AssessmentRanks;
use crate::model::rounding::RoundingPolicy;
use crate::model::scores::ScoreSet;
use crate::pipeline::stage1_ties::rank_with_ties;

/// Best, mean and worst rank of `subject` among `scores`.
///
/// Best places the subject ahead of everyone sharing its mark, worst behind them,
/// mean takes the tie-averaged rank. `scores` itself is never reordered.
pub fn rank_assessment(
    assessment_id: &str,
    scores: &ScoreSet,
    subject: f64,
    rounding: RoundingPolicy,
) -> Result<AssessmentRanks, RankError> {
    let values = scores.as_slice();
    let subject_idx = values
        .iter()
        .position(|&s| s == subject)
        .ok_or_else(|| RankError::MissingSubjectScore {
            assessment: assessment_id.to_string(),
            score: subject,
        })?;

    let n = values.len();
    let above = values.iter().filter(|&&s| s > subject).count();
    let below = values.iter().filter(|&&s| s < subject).count();

    let best_rank = (above + 1) as u32;
    let worst_rank = (n - below) as u32;

    let tied = rank_with_ties(values);
    let mean_rank_exact = tied[subject_idx];
    let mean_rank = rounding.apply(mean_rank_exact);

    let total = n as f64;
    Ok(AssessmentRanks {
        participants: n,
        best_rank,
        worst_rank,
        mean_rank,
        mean_rank_exact,
        normalized_best: best_rank as f64 / total,
        normalized_mean: mean_rank_exact / total,
        normalized_worst: worst_rank as f64 / total,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_assessment.rs"]
mod tests;
