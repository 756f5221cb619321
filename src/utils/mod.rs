//! Helpers used by the HTTP layer.
//!
//! - [`links`] - Location and pagination link generation
//! - [`media_type`] - Content type selection from the `Accept` header

pub mod links;
pub mod media_type;
