use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HighlightStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl Display for HighlightStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            HighlightStatus::Pending => "pending",
            HighlightStatus::Approved => "approved",
            HighlightStatus::Rejected => "rejected",
        };
        write!(f, "{}", status)
    }
}

impl HighlightStatus {
    pub fn from_str(value: &str) -> Self {
        match value {
            "pending" => HighlightStatus::Pending,
            "approved" => HighlightStatus::Approved,
            _ => HighlightStatus::Rejected,
        }
    }
}
