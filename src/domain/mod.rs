//! Domain layer containing business entities and repository contracts.
//!
//! - [`entities`] - Core data structures (`User`, `NewUser`, `Page`)
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Orchestration lives in [`crate::application::services`].

pub mod entities;
pub mod repositories;
