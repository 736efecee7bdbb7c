pub mod admin_businesses;
pub mod admin_highlights;
pub mod businesses;
pub mod highlights;
pub mod public;
