//! Core domain entities.
//!
//! Entities are plain data structures without business logic.
//!
//! - [`User`] - A stored user record
//! - [`NewUser`] - Insert payload, identifier assigned by the repository
//! - [`Page`] - One page of a paginated listing

pub mod page;
pub mod user;

pub use page::Page;
pub use user::{NewUser, User};
