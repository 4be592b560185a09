use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::model::hierarchy::Semester;
use crate::model::ranks::RankEstimate;
use crate::model::rounding::RoundingPolicy;
use crate::pipeline::stage4_rollup::UnitEstimate;
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{
    InputMeta, SummaryData, ToolMeta, count_ranked, count_skips, format_f64_6, unit_summaries,
};

#[derive(Debug, Clone)]
pub struct ReportInput<'a> {
    pub semester: &'a Semester,
    pub estimate: &'a RankEstimate,
    pub units: &'a [UnitEstimate],
    pub rounding: RoundingPolicy,
    pub input_path: String,
    pub scope: String,
    pub tool_name: String,
    pub tool_version: String,
}

pub fn build_summary(input: &ReportInput<'_>) -> SummaryData {
    SummaryData {
        tool: ToolMeta {
            name: input.tool_name.clone(),
            version: input.tool_version.clone(),
        },
        input: InputMeta {
            path: input.input_path.clone(),
            semester: input.semester.number,
            scope: input.scope.clone(),
        },
        rounding: input.rounding.name().to_string(),
        estimate: input.estimate.clone(),
        units: unit_summaries(input.units),
        assessments_ranked: count_ranked(input.semester),
        skipped: count_skips(input.semester),
    }
}

/// Writes `summary.json`, `report.txt` and `assessments.tsv` into `out_dir`.
pub fn write_reports(input: &ReportInput<'_>, out_dir: &Path) -> std::io::Result<SummaryData> {
    fs::create_dir_all(out_dir)?;

    let summary = build_summary(input);

    let json = render_summary_json(&summary)?;
    write_text(&out_dir.join("summary.json"), &json)?;

    let report = render_report_text(input.semester, &summary);
    write_text(&out_dir.join("report.txt"), &report)?;

    write_assessments_tsv(input.semester, &out_dir.join("assessments.tsv"))?;

    tracing::info!(out = %out_dir.display(), "reports written");
    Ok(summary)
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}

const TSV_HEADER: &str = "unit\tcourse\tweight\tassessment\tname\tstatus\tsubject_score\tparticipants\tbest_rank\tmean_rank\tworst_rank\tmean_rank_exact\tnormalized_best\tnormalized_mean\tnormalized_worst";

fn write_assessments_tsv(semester: &Semester, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "{TSV_HEADER}")?;
    for unit in &semester.units {
        for course in &unit.courses {
            for a in &course.assessments {
                let r = &a.ranks;
                writeln!(
                    w,
                    "{}\t{}\t{}\t{}\t{}\tranked\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    unit.id,
                    course.id,
                    course.weight,
                    a.id,
                    a.name,
                    a.subject_score,
                    r.participants,
                    r.best_rank,
                    r.mean_rank,
                    r.worst_rank,
                    format_f64_6(r.mean_rank_exact),
                    format_f64_6(r.normalized_best),
                    format_f64_6(r.normalized_mean),
                    format_f64_6(r.normalized_worst)
                )?;
            }
            for skip in &course.skipped {
                writeln!(
                    w,
                    "{}\t{}\t{}\t{}\t{}\t{}\t\t\t\t\t\t\t\t\t",
                    unit.id, course.id, course.weight, skip.id, skip.name, skip.reason
                )?;
            }
        }
    }
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_report.rs"]
mod tests;
