use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HighlightType {
    #[default]
    Carousel,
    Card,
}

impl Display for HighlightType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let highlight_type = match self {
            HighlightType::Carousel => "carousel",
            HighlightType::Card => "card",
        };
        write!(f, "{}", highlight_type)
    }
}

impl HighlightType {
    pub fn from_str(value: &str) -> Self {
        match value {
            "card" => HighlightType::Card,
            _ => HighlightType::Carousel,
        }
    }
}
