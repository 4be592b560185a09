use serde::Serialize;

use crate::model::hierarchy::{Semester, SkipReason};
use crate::model::ranks::RankEstimate;
use crate::pipeline::stage4_rollup::UnitEstimate;

pub mod json;
pub mod text;

#[derive(Debug, Clone, Serialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputMeta {
    pub path: String,
    pub semester: u32,
    pub scope: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkipCounts {
    pub not_sat: usize,
    pub missing_marks: usize,
    pub unparseable: usize,
    pub degenerate: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnitSummary {
    pub id: String,
    pub name: String,
    pub estimate: Option<RankEstimate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: ToolMeta,
    pub input: InputMeta,
    pub rounding: String,
    pub estimate: RankEstimate,
    pub units: Vec<UnitSummary>,
    pub assessments_ranked: usize,
    pub skipped: SkipCounts,
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

pub fn count_skips(semester: &Semester) -> SkipCounts {
    let mut counts = SkipCounts::default();
    for unit in &semester.units {
        for course in &unit.courses {
            for skip in &course.skipped {
                match skip.reason {
                    SkipReason::NotSat => counts.not_sat += 1,
                    SkipReason::MissingMarks => counts.missing_marks += 1,
                    SkipReason::Unparseable(_) => counts.unparseable += 1,
                    SkipReason::Degenerate => counts.degenerate += 1,
                }
            }
        }
    }
    counts
}

pub fn count_ranked(semester: &Semester) -> usize {
    semester
        .units
        .iter()
        .flat_map(|u| u.courses.iter())
        .map(|c| c.assessments.len())
        .sum()
}

pub fn unit_summaries(units: &[UnitEstimate]) -> Vec<UnitSummary> {
    units
        .iter()
        .map(|u| UnitSummary {
            id: u.id.clone(),
            name: u.name.clone(),
            estimate: u.estimate.clone(),
        })
        .collect()
}

/// `rank/cohort - best: b - worst: w`
pub fn format_estimate(e: &RankEstimate) -> String {
    format!(
        "{}/{} - best: {} - worst: {}",
        e.mean, e.cohort_size, e.best, e.worst
    )
}
