pub mod business_statuses;
pub mod highlight_statuses;
pub mod highlight_types;
pub mod plan_tiers;
