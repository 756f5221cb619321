#![allow(dead_code)]

use axum_test::TestServer;
use std::sync::Arc;
use users_api::domain::entities::User;
use users_api::domain::repositories::UserRepository;
use users_api::infrastructure::persistence::InMemoryUserRepository;
use users_api::routes::api_router;
use users_api::state::AppState;
use users_api::utils::links::LinkGenerator;
use uuid::Uuid;

pub fn test_user(login: &str, first_name: &str, last_name: &str) -> User {
    User::new(
        Uuid::new_v4(),
        login.to_string(),
        first_name.to_string(),
        last_name.to_string(),
    )
}

pub fn create_test_state(repository: Arc<InMemoryUserRepository>) -> AppState {
    AppState::new(repository, LinkGenerator::new(None))
}

/// Server over an in-memory repository seeded with `users`.
///
/// The repository is returned as well so tests can inspect what was stored.
pub fn create_test_server(users: Vec<User>) -> (TestServer, Arc<InMemoryUserRepository>) {
    let repository = Arc::new(InMemoryUserRepository::with_users(users));
    let app = api_router(create_test_state(repository.clone()));

    (TestServer::new(app).unwrap(), repository)
}

/// Seeds `count` users with logins `user00`, `user01`, ...
pub fn numbered_users(count: usize) -> Vec<User> {
    (0..count)
        .map(|i| test_user(&format!("user{i:02}"), "First", "Last"))
        .collect()
}

/// Number of users currently held by `repository`.
pub async fn stored_count(repository: &InMemoryUserRepository) -> u64 {
    repository.get_page(1, 1).await.unwrap().total_count
}
