//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::UserService;
use crate::domain::repositories::UserRepository;
use crate::utils::links::LinkGenerator;

/// State cloned into each request; holds only `Arc`s and small values.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub links: LinkGenerator,
}

impl AppState {
    /// Wires the service layer on top of `repository`.
    pub fn new(repository: Arc<dyn UserRepository>, links: LinkGenerator) -> Self {
        Self {
            user_service: Arc::new(UserService::new(repository)),
            links,
        }
    }
}
