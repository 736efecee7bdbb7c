use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    #[default]
    Free,
    Basic,
    Premium,
}

impl Display for PlanTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tier = match self {
            PlanTier::Free => "free",
            PlanTier::Basic => "basic",
            PlanTier::Premium => "premium",
        };
        write!(f, "{}", tier)
    }
}

impl PlanTier {
    /// Unknown or empty values resolve to the free tier.
    pub fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "basic" => PlanTier::Basic,
            "premium" => PlanTier::Premium,
            _ => PlanTier::Free,
        }
    }

    pub fn all() -> [PlanTier; 3] {
        [PlanTier::Free, PlanTier::Basic, PlanTier::Premium]
    }
}
