use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankError {
    #[error("score set of assessment {assessment} is empty")]
    EmptyScoreSet { assessment: String },

    #[error("score set of assessment {assessment} contains a non-finite value")]
    NonFiniteScore { assessment: String },

    #[error("subject score {score} not found in the scores of assessment {assessment}")]
    MissingSubjectScore { assessment: String, score: f64 },

    #[error("length mismatch: {values} values but {ranks} ranks")]
    LengthMismatch { values: usize, ranks: usize },

    #[error("course {course} has invalid weight {weight}")]
    InvalidWeight { course: String, weight: f64 },

    #[error("course {course} appears with weights {first} and {second}")]
    InconsistentCourseWeight {
        course: String,
        first: f64,
        second: f64,
    },

    #[error("no rankable data in scope")]
    ZeroWeightScope,
}
