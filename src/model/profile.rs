use serde::Deserialize;

use crate::model::rounding::RoundingPolicy;

#[derive(Debug, Clone, PartialEq)]
pub struct RankingProfile {
    pub rounding: RoundingPolicy,
    /// Restrict the headline estimate to one curricular unit.
    pub unit: Option<String>,
}

/// Optional settings read from a params file; unset fields keep the current value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileOverrides {
    #[serde(default)]
    pub rounding: Option<RoundingPolicy>,
    #[serde(default)]
    pub unit: Option<String>,
}

impl RankingProfile {
    pub fn default_v1() -> Self {
        Self {
            rounding: RoundingPolicy::Nearest,
            unit: None,
        }
    }

    pub fn apply(&mut self, overrides: ProfileOverrides) {
        if let Some(rounding) = overrides.rounding {
            self.rounding = rounding;
        }
        if let Some(unit) = overrides.unit {
            self.unit = Some(unit);
        }
    }

    pub fn scope_label(&self) -> String {
        match &self.unit {
            Some(id) => format!("unit {id}"),
            None => "semester".to_string(),
        }
    }
}
