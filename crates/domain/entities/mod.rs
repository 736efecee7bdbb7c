pub mod audit_logs;
pub mod business_images;
pub mod businesses;
pub mod highlights;
