use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How the tie-averaged rank becomes an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RoundingPolicy {
    /// Round half to even: 1.5 -> 2, 2.5 -> 2.
    #[default]
    Nearest,
    /// Ceiling: any fractional rank goes to the worse position.
    Pessimistic,
}

impl RoundingPolicy {
    pub fn apply(self, rank: f64) -> u32 {
        let rounded = match self {
            RoundingPolicy::Nearest => rank.round_ties_even(),
            RoundingPolicy::Pessimistic => rank.ceil(),
        };
        rounded as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            RoundingPolicy::Nearest => "nearest",
            RoundingPolicy::Pessimistic => "pessimistic",
        }
    }
}
