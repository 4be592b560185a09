use serde::Serialize;

/// Rank figures of the subject within one assessment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AssessmentRanks {
    pub participants: usize,
    pub best_rank: u32,
    pub worst_rank: u32,
    pub mean_rank: u32,
    pub mean_rank_exact: f64,
    pub normalized_best: f64,
    pub normalized_mean: f64,
    pub normalized_worst: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankVariant {
    Best,
    Mean,
    Worst,
}

impl RankVariant {
    pub fn all() -> [RankVariant; 3] {
        [RankVariant::Best, RankVariant::Mean, RankVariant::Worst]
    }

    pub fn name(self) -> &'static str {
        match self {
            RankVariant::Best => "best",
            RankVariant::Mean => "mean",
            RankVariant::Worst => "worst",
        }
    }
}

impl AssessmentRanks {
    pub fn normalized(&self, variant: RankVariant) -> f64 {
        match variant {
            RankVariant::Best => self.normalized_best,
            RankVariant::Mean => self.normalized_mean,
            RankVariant::Worst => self.normalized_worst,
        }
    }
}

/// Class rank estimate over a scope of courses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankEstimate {
    pub best: u32,
    pub mean: u32,
    pub worst: u32,
    pub cohort_size: usize,
    pub normalized_best: f64,
    pub normalized_mean: f64,
    pub normalized_worst: f64,
    pub assessments_used: usize,
    pub courses_used: usize,
}
