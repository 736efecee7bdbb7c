pub mod admin_businesses;
pub mod audit;
pub mod business_profile;
pub mod gallery;
pub mod highlights;
pub mod public_directory;
