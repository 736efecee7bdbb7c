use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BusinessStatus {
    #[default]
    Pending,
    Active,
    Inactive,
}

impl Display for BusinessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            BusinessStatus::Pending => "pending",
            BusinessStatus::Active => "active",
            BusinessStatus::Inactive => "inactive",
        };
        write!(f, "{}", status)
    }
}

impl BusinessStatus {
    pub fn from_str(value: &str) -> Self {
        match value {
            "pending" => BusinessStatus::Pending,
            "active" => BusinessStatus::Active,
            _ => BusinessStatus::Inactive,
        }
    }
}
