use rayon::prelude::*;

use crate::input::cache::MarksTable;
use crate::input::document::{PortalDocument, RawAssessment};
use crate::input::numbers::{parse_marks, parse_subject_mark};
use crate::model::errors::RankError;
use crate::model::hierarchy::{Assessment, Course, Semester, SkipReason, SkippedAssessment, Unit};
use crate::model::rounding::RoundingPolicy;
use crate::model::scores::ScoreSet;

/// Outcome of inspecting one listed assessment before ranking.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    Rankable {
        id: String,
        name: String,
        scores: ScoreSet,
        subject: f64,
    },
    Skipped(SkippedAssessment),
}

/// Decides whether a listed assessment can be ranked.
///
/// Structural problems (empty or non-finite score lists) are errors; missing or
/// unreadable marks become a named skip.
pub fn classify_assessment(
    raw: &RawAssessment,
    marks: &MarksTable,
) -> Result<Classified, RankError> {
    let skip = |reason: SkipReason| {
        Ok(Classified::Skipped(SkippedAssessment {
            id: raw.id.clone(),
            name: raw.name.clone(),
            reason,
        }))
    };

    let Some(record) = marks.get(&raw.id) else {
        return skip(SkipReason::MissingMarks);
    };

    let subject = match parse_subject_mark(record.subject.as_ref()) {
        Ok(Some(v)) => v,
        Ok(None) => return skip(SkipReason::NotSat),
        Err(detail) => return skip(SkipReason::Unparseable(detail)),
    };

    let values = match parse_marks(&record.scores) {
        Ok(v) => v,
        Err(detail) => return skip(SkipReason::Unparseable(detail)),
    };
    let scores = ScoreSet::new(&raw.id, values)?;

    Ok(Classified::Rankable {
        id: raw.id.clone(),
        name: raw.name.clone(),
        scores,
        subject,
    })
}

struct Pending {
    unit: usize,
    course: usize,
    id: String,
    name: String,
    scores: ScoreSet,
    subject: f64,
}

/// Builds the ranked hierarchy for one export.
///
/// Every rankable assessment is ranked independently in parallel; the first
/// data error aborts the whole semester.
pub fn build_semester(
    doc: &PortalDocument,
    marks: &MarksTable,
    rounding: RoundingPolicy,
) -> Result<Semester, RankError> {
    if marks.is_empty() {
        tracing::warn!("export carries no mark records");
    } else {
        tracing::debug!(records = marks.len(), "marks table ready");
    }

    let mut pending = Vec::new();
    let mut skipped: Vec<Vec<Vec<SkippedAssessment>>> = Vec::with_capacity(doc.units.len());
    for (u, unit) in doc.units.iter().enumerate() {
        let mut unit_skips = Vec::with_capacity(unit.courses.len());
        for (c, course) in unit.courses.iter().enumerate() {
            let mut course_skips = Vec::new();
            for raw in &course.assessments {
                match classify_assessment(raw, marks)? {
                    Classified::Rankable {
                        id,
                        name,
                        scores,
                        subject,
                    } => pending.push(Pending {
                        unit: u,
                        course: c,
                        id,
                        name,
                        scores,
                        subject,
                    }),
                    Classified::Skipped(skip) => {
                        tracing::info!(
                            course = %course.id,
                            assessment = %skip.id,
                            reason = %skip.reason,
                            "assessment skipped"
                        );
                        course_skips.push(skip);
                    }
                }
            }
            unit_skips.push(course_skips);
        }
        skipped.push(unit_skips);
    }

    let ranked: Vec<(usize, usize, Assessment)> = pending
        .into_par_iter()
        .map(|p| -> Result<(usize, usize, Assessment), RankError> {
            let assessment = Assessment::new(p.id, p.name, p.scores, p.subject, rounding)?;
            Ok((p.unit, p.course, assessment))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut grouped: Vec<Vec<Vec<Assessment>>> = doc
        .units
        .iter()
        .map(|u| u.courses.iter().map(|_| Vec::new()).collect())
        .collect();
    for (u, c, assessment) in ranked {
        grouped[u][c].push(assessment);
    }

    let mut units = Vec::with_capacity(doc.units.len());
    for ((raw_unit, unit_assessments), unit_skips) in
        doc.units.iter().zip(grouped).zip(skipped)
    {
        let mut courses = Vec::with_capacity(raw_unit.courses.len());
        for ((raw_course, assessments), skips) in
            raw_unit.courses.iter().zip(unit_assessments).zip(unit_skips)
        {
            courses.push(Course::new(
                raw_course.id.clone(),
                raw_course.name.clone(),
                raw_course.weight,
                assessments,
                skips,
            )?);
        }
        units.push(Unit {
            id: raw_unit.id.clone(),
            name: raw_unit.name.clone(),
            courses,
        });
    }

    Ok(Semester {
        number: doc.semester,
        units,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_classify.rs"]
mod tests;
