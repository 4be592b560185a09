use crate::model::hierarchy::{Assessment, Course, Semester};
use crate::report::{SummaryData, format_estimate, format_f64_6};

pub fn render_report_text(semester: &Semester, summary: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str("Class Rank Estimate\n");
    out.push_str("===================\n\n");
    out.push_str(&format!("Semester {}\n", semester.number));
    out.push_str(&format!("Scope: {}\n", summary.input.scope));
    out.push_str(&format!("Mean rank rounding: {}\n\n", summary.rounding));

    for unit in &semester.units {
        if unit.name.is_empty() {
            out.push_str(&format!("[{}]\n", unit.id));
        } else {
            out.push_str(&format!("[{}] {}\n", unit.id, unit.name));
        }
        for course in &unit.courses {
            push_course(&mut out, course);
        }
        out.push('\n');
    }

    out.push_str("Unit estimates\n");
    for unit in &summary.units {
        match &unit.estimate {
            Some(e) => out.push_str(&format!("  {}: {}\n", unit.id, format_estimate(e))),
            None => out.push_str(&format!("  {}: no rankable data\n", unit.id)),
        }
    }
    out.push('\n');

    let e = &summary.estimate;
    out.push_str(&format!(
        "Assessments ranked: {} (skipped: not sat {}, missing marks {}, unparseable {}, degenerate {})\n",
        summary.assessments_ranked,
        summary.skipped.not_sat,
        summary.skipped.missing_marks,
        summary.skipped.unparseable,
        summary.skipped.degenerate
    ));
    out.push_str(&format!(
        "Normalized rank: best {}, mean {}, worst {}\n",
        format_f64_6(e.normalized_best),
        format_f64_6(e.normalized_mean),
        format_f64_6(e.normalized_worst)
    ));
    out.push_str(&format!("Estimated class rank: {}\n", format_estimate(e)));

    out
}

fn push_course(out: &mut String, course: &Course) {
    let label = if course.name.is_empty() {
        &course.id
    } else {
        &course.name
    };
    out.push_str(&format!("{} (weight {})\n", label, course.weight));
    for assessment in &course.assessments {
        push_assessment(out, assessment);
    }
    for skip in &course.skipped {
        let name = if skip.name.is_empty() {
            &skip.id
        } else {
            &skip.name
        };
        out.push_str(&format!("  {}: skipped ({})\n", name, skip.reason));
    }
}

fn push_assessment(out: &mut String, a: &Assessment) {
    let name = if a.name.is_empty() { &a.id } else { &a.name };
    out.push_str(&format!("  {}:\n", name));
    out.push_str(&format!("    Score: {}\n", a.subject_score));
    out.push_str(&format!(
        "    Rank: {}/{} - best: {} - worst: {}\n",
        a.ranks.mean_rank, a.ranks.participants, a.ranks.best_rank, a.ranks.worst_rank
    ));
}
