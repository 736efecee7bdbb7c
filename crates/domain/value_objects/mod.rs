pub mod audit_logs;
pub mod business_profile;
pub mod businesses;
pub mod enums;
pub mod gallery;
pub mod highlight_lifecycle;
pub mod highlights;
pub mod plans;
pub mod public_business;
pub mod slug;
