//! Application layer services.
//!
//! Services consume repository traits and give HTTP handlers and the admin
//! CLI a single entry point per operation.
//!
//! - [`services::user_service::UserService`] - User lookup, listing and writes

pub mod services;
