use std::{
    collections::{BTreeSet, HashMap},
    fmt::Display,
    sync::Arc,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::value_objects::enums::plan_tiers::PlanTier;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Description,
    SocialLinks,
    Gallery,
    AddressMap,
    Tags,
    Statistics,
    HighlightRequest,
    VerifiedBadge,
    SearchPriority,
}

impl Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let capability = match self {
            Capability::Description => "description",
            Capability::SocialLinks => "social_links",
            Capability::Gallery => "gallery",
            Capability::AddressMap => "address_map",
            Capability::Tags => "tags",
            Capability::Statistics => "statistics",
            Capability::HighlightRequest => "highlight_request",
            Capability::VerifiedBadge => "verified_badge",
            Capability::SearchPriority => "search_priority",
        };
        write!(f, "{}", capability)
    }
}

/// Immutable set of capabilities unlocked by a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    pub fn new(capabilities: impl IntoIterator<Item = Capability>) -> Self {
        Self(capabilities.into_iter().collect())
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Limits {
    #[serde(default)]
    pub social_links: usize,

    #[serde(default)]
    pub gallery_photos: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanSpec {
    #[serde(default)]
    pub capabilities: CapabilitySet,

    #[serde(default)]
    pub limits: Limits,
}

#[derive(Debug, Error)]
pub enum PlanCatalogError {
    #[error("plan catalog must define the free tier")]
    MissingFreeTier,
    #[error("invalid plan catalog: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Per-tier capabilities and limits. Built once at startup and shared read-only.
///
/// Tiers absent from the catalog resolve to the free tier's entry, so lookups never fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanCatalog {
    free: PlanSpec,
    tiers: HashMap<PlanTier, PlanSpec>,
}

impl PlanCatalog {
    pub fn new(mut tiers: HashMap<PlanTier, PlanSpec>) -> Result<Self, PlanCatalogError> {
        let free = tiers
            .remove(&PlanTier::Free)
            .ok_or(PlanCatalogError::MissingFreeTier)?;
        Ok(Self { free, tiers })
    }

    /// Parses a catalog of the form `{"free": {"capabilities": [...], "limits": {...}}, ...}`.
    pub fn from_json_str(raw: &str) -> Result<Self, PlanCatalogError> {
        let tiers: HashMap<PlanTier, PlanSpec> = serde_json::from_str(raw)?;
        Self::new(tiers)
    }

    pub fn standard() -> Self {
        use Capability::*;

        let basic = [Description, SocialLinks, Gallery, AddressMap, Tags];
        let premium = basic
            .iter()
            .copied()
            .chain([Statistics, HighlightRequest, VerifiedBadge, SearchPriority]);

        let tiers = HashMap::from([
            (
                PlanTier::Basic,
                PlanSpec {
                    capabilities: CapabilitySet::new(basic),
                    limits: Limits {
                        social_links: 3,
                        gallery_photos: 5,
                    },
                },
            ),
            (
                PlanTier::Premium,
                PlanSpec {
                    capabilities: CapabilitySet::new(premium),
                    limits: Limits {
                        social_links: 5,
                        gallery_photos: 20,
                    },
                },
            ),
        ]);

        Self {
            free: PlanSpec::default(),
            tiers,
        }
    }

    fn spec_of(&self, plan: PlanTier) -> &PlanSpec {
        self.tiers.get(&plan).unwrap_or(&self.free)
    }

    pub fn capabilities_of(&self, plan: PlanTier) -> &CapabilitySet {
        &self.spec_of(plan).capabilities
    }

    pub fn limits_of(&self, plan: PlanTier) -> Limits {
        self.spec_of(plan).limits
    }
}

impl Default for PlanCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// The one place that answers "can this plan do X".
#[derive(Debug, Clone)]
pub struct CapabilityGate {
    catalog: Arc<PlanCatalog>,
}

impl CapabilityGate {
    pub fn new(catalog: Arc<PlanCatalog>) -> Self {
        Self { catalog }
    }

    pub fn has(&self, plan: PlanTier, capability: Capability) -> bool {
        self.catalog.capabilities_of(plan).contains(capability)
    }

    pub fn limits(&self, plan: PlanTier) -> Limits {
        self.catalog.limits_of(plan)
    }

    pub fn capabilities(&self, plan: PlanTier) -> &CapabilitySet {
        self.catalog.capabilities_of(plan)
    }
}

#[derive(Debug, Serialize)]
pub struct PlanDto {
    pub plan: PlanTier,
    pub capabilities: CapabilitySet,
    pub limits: Limits,
}

impl PlanDto {
    pub fn list(gate: &CapabilityGate) -> Vec<PlanDto> {
        PlanTier::all()
            .into_iter()
            .map(|plan| PlanDto {
                plan,
                capabilities: gate.capabilities(plan).clone(),
                limits: gate.limits(plan),
            })
            .collect()
    }
}
