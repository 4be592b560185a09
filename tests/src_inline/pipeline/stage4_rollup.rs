use super::*;
use crate::model::hierarchy::{Assessment, Course, Unit};
use crate::model::rounding::RoundingPolicy;
use crate::model::scores::ScoreSet;
use proptest::prelude::*;

fn assessment(id: &str, scores: &[f64], subject: f64) -> Assessment {
    let set = ScoreSet::new(id, scores.to_vec()).unwrap();
    Assessment::new(id, "", set, subject, RoundingPolicy::Nearest).unwrap()
}

fn course(id: &str, weight: f64, assessments: Vec<Assessment>) -> Course {
    Course::new(id, "", weight, assessments, Vec::new()).unwrap()
}

const COURSE_IDS: [&str; 4] = ["a", "b", "c", "d"];

fn sample(course: usize, weight: f64, normalized_rank: f64) -> RankSample<'static> {
    RankSample {
        course,
        course_id: COURSE_IDS[course],
        weight,
        normalized_rank,
    }
}

#[test]
fn test_single_course_scenario() {
    let c = course("mat1", 2.0, vec![assessment("n1", &[12.0, 15.0, 15.0, 9.0], 15.0)]);
    let e = estimate_scope(&c).unwrap();
    assert_eq!(e.cohort_size, 4);
    assert_eq!(e.best, 1);
    assert_eq!(e.worst, 2);
    assert_eq!(e.mean, 2);
    assert_eq!(e.normalized_best, 0.25);
    assert_eq!(e.normalized_worst, 0.5);
    assert_eq!(e.assessments_used, 1);
    assert_eq!(e.courses_used, 1);
}

#[test]
fn test_course_weight_counts_once_in_denominator() {
    let samples = [
        sample(0, 2.0, 0.25),
        sample(0, 2.0, 0.5),
        sample(1, 1.0, 0.5),
    ];
    let out = weighted_rollup(&samples, 8).unwrap();
    assert_eq!(out.weighted_sum, 2.0);
    assert_eq!(out.weight_denominator, 3.0);
    assert!((out.average_normalized - 2.0 / 3.0).abs() < 1e-12);
    assert_eq!(out.absolute_rank, 5);
}

#[test]
fn test_reordering_samples_is_neutral() {
    let samples = vec![
        sample(0, 3.0, 0.125),
        sample(1, 1.0, 0.75),
        sample(0, 3.0, 0.5),
        sample(2, 2.0, 0.25),
    ];
    let mut reversed = samples.clone();
    reversed.reverse();
    let a = weighted_rollup(&samples, 30).unwrap();
    let b = weighted_rollup(&reversed, 30).unwrap();
    assert_eq!(a.absolute_rank, b.absolute_rank);
    assert!((a.average_normalized - b.average_normalized).abs() < 1e-12);
}

#[test]
fn test_scaling_weights_keeps_average() {
    let samples = [sample(0, 1.5, 0.2), sample(1, 4.0, 0.9), sample(1, 4.0, 0.6)];
    let doubled: Vec<_> = samples
        .iter()
        .map(|s| sample(s.course, s.weight * 2.0, s.normalized_rank))
        .collect();
    let a = weighted_rollup(&samples, 25).unwrap();
    let b = weighted_rollup(&doubled, 25).unwrap();
    assert!((a.average_normalized - b.average_normalized).abs() < 1e-12);
    assert_eq!(a.absolute_rank, b.absolute_rank);
}

#[test]
fn test_rank_clamped_to_cohort() {
    let low = weighted_rollup(&[sample(0, 1.0, 0.01)], 10).unwrap();
    assert_eq!(low.absolute_rank, 1);
    let high = weighted_rollup(&[sample(0, 1.0, 1.0), sample(0, 1.0, 1.0)], 10).unwrap();
    assert_eq!(high.absolute_rank, 10);
}

#[test]
fn test_scaled_rank_rounds_half_to_even() {
    // 0.625 * 4 = 2.5
    let even_floor = weighted_rollup(&[sample(0, 1.0, 0.625)], 4).unwrap();
    assert_eq!(even_floor.absolute_rank, 2);
    // 0.875 * 4 = 3.5
    let odd_floor = weighted_rollup(&[sample(0, 1.0, 0.875)], 4).unwrap();
    assert_eq!(odd_floor.absolute_rank, 4);
}

#[test]
fn test_empty_scope_is_reported() {
    assert_eq!(weighted_rollup(&[], 10), Err(RankError::ZeroWeightScope));
    assert_eq!(
        weighted_rollup(&[sample(0, 0.0, 0.5)], 10),
        Err(RankError::ZeroWeightScope)
    );
    let empty = course("mat1", 2.0, Vec::new());
    assert_eq!(estimate_scope(&empty), Err(RankError::ZeroWeightScope));
}

#[test]
fn test_inconsistent_course_weight() {
    let err = weighted_rollup(&[sample(0, 1.0, 0.5), sample(0, 2.0, 0.5)], 4).unwrap_err();
    assert_eq!(
        err,
        RankError::InconsistentCourseWeight {
            course: "a".to_string(),
            first: 1.0,
            second: 2.0
        }
    );
}

#[test]
fn test_degenerate_assessment_does_not_change_course() {
    let base = vec![
        assessment("n1", &[12.0, 15.0, 15.0, 9.0], 12.0),
        assessment("n2", &[8.0, 14.0, 11.0], 14.0),
    ];
    let mut with_flat = base.clone();
    with_flat.push(assessment("n3", &[10.0, 10.0, 10.0, 10.0, 10.0], 10.0));

    let without = course("mat1", 3.0, base);
    let with = course("mat1", 3.0, with_flat);
    assert_eq!(with.skipped.len(), 1);
    assert_eq!(estimate_scope(&with).unwrap(), estimate_scope(&without).unwrap());
}

#[test]
fn test_cohort_size_is_largest_assessment() {
    let courses = vec![
        course("a", 1.0, vec![assessment("n1", &[1.0, 2.0, 3.0], 2.0)]),
        course("b", 1.0, vec![assessment("n2", &[1.0, 2.0, 3.0, 4.0, 5.0], 5.0)]),
    ];
    assert_eq!(cohort_size(courses.as_slice()), 5);
    let e = estimate_scope(courses.as_slice()).unwrap();
    assert_eq!(e.cohort_size, 5);
    assert_eq!(e.courses_used, 2);
}

#[test]
fn test_estimate_units_tolerates_empty_unit() {
    let semester = Semester {
        number: 7,
        units: vec![
            Unit {
                id: "ue1".to_string(),
                name: "Maths".to_string(),
                courses: vec![course("a", 1.0, vec![assessment("n1", &[1.0, 2.0], 2.0)])],
            },
            Unit {
                id: "ue2".to_string(),
                name: String::new(),
                courses: vec![course("b", 1.0, Vec::new())],
            },
        ],
    };
    let units = estimate_units(&semester);
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].estimate.as_ref().unwrap().best, 1);
    assert!(units[1].estimate.is_none());

    // The semester estimate still stands on ue1 alone.
    let e = estimate_scope(&semester).unwrap();
    assert_eq!(e.courses_used, 1);
}

fn unit(id: &str, courses: Vec<Course>) -> Unit {
    Unit {
        id: id.to_string(),
        name: String::new(),
        courses,
    }
}

#[test]
fn test_shared_course_id_across_units_counts_twice() {
    let first_of_four = || assessment("n1", &[15.0, 12.0, 9.0, 7.0], 15.0);
    let semester = Semester {
        number: 7,
        units: vec![
            unit("ue1", vec![course("mat1", 1.0, vec![first_of_four()])]),
            unit("ue2", vec![course("mat1", 1.0, vec![first_of_four()])]),
        ],
    };
    let e = estimate_scope(&semester).unwrap();
    assert_eq!(e.best, 1);
    assert_eq!(e.normalized_best, 0.25);
    assert_eq!(e.courses_used, 2);

    let samples = collect_samples(&semester, RankVariant::Best);
    assert_eq!(weighted_rollup(&samples, 4).unwrap().weight_denominator, 2.0);
}

#[test]
fn test_shared_course_id_with_different_weights() {
    let semester = Semester {
        number: 7,
        units: vec![
            unit(
                "ue1",
                vec![course("mat1", 1.0, vec![assessment("n1", &[15.0, 12.0, 9.0, 7.0], 15.0)])],
            ),
            unit(
                "ue2",
                vec![course("mat1", 2.0, vec![assessment("n2", &[15.0, 12.0, 9.0, 7.0], 7.0)])],
            ),
        ],
    };
    let e = estimate_scope(&semester).unwrap();
    // (0.25 * 1 + 1.0 * 2) / 3
    assert!((e.normalized_best - 0.75).abs() < 1e-12);
    assert_eq!(e.best, 3);
    assert_eq!(e.courses_used, 2);
}

proptest! {
    #[test]
    fn rollup_stays_within_cohort(
        entries in prop::collection::vec((0usize..4, 1u32..10_000), 1..30),
        cohort in 1usize..200,
    ) {
        let weights = [1.0, 2.5, 0.5, 4.0];
        let samples: Vec<_> = entries
            .iter()
            .map(|&(c, r)| sample(c, weights[c], r as f64 / 10_000.0))
            .collect();
        let out = weighted_rollup(&samples, cohort).unwrap();
        prop_assert!(out.absolute_rank >= 1);
        prop_assert!(out.absolute_rank as usize <= cohort);

        let mut rotated = samples.clone();
        rotated.rotate_left(entries.len() / 2);
        let again = weighted_rollup(&rotated, cohort).unwrap();
        prop_assert!((out.average_normalized - again.average_normalized).abs() < 1e-9);
    }
}

proptest! {
    #[test]
    fn semester_rollup_stays_in_unit_interval(
        units in prop::collection::vec(
            prop::collection::vec((1u32..5, prop::collection::vec(0u32..20, 2..12), 0usize..12), 1..4),
            1..4,
        ),
    ) {
        let units: Vec<Unit> = units
            .iter()
            .enumerate()
            .map(|(u, courses)| {
                let courses = courses
                    .iter()
                    .enumerate()
                    .map(|(c, (weight, marks, pick))| {
                        let scores: Vec<f64> = marks.iter().map(|&m| m as f64).collect();
                        let subject = scores[pick % scores.len()];
                        // every unit reuses the same course ids
                        course(
                            &format!("c{c}"),
                            *weight as f64,
                            vec![assessment(&format!("n{u}_{c}"), &scores, subject)],
                        )
                    })
                    .collect();
                unit(&format!("ue{u}"), courses)
            })
            .collect();
        let semester = Semester { number: 7, units };

        if let Ok(e) = estimate_scope(&semester) {
            for normalized in [e.normalized_best, e.normalized_mean, e.normalized_worst] {
                prop_assert!(normalized > 0.0);
                prop_assert!(normalized <= 1.0 + 1e-12);
            }
            prop_assert!(e.normalized_best <= e.normalized_mean + 1e-12);
            prop_assert!(e.normalized_mean <= e.normalized_worst + 1e-12);
        }
    }
}
