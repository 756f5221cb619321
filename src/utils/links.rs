//! URL generation for `Location` headers and pagination links.

use uuid::Uuid;

use crate::api::routes::USERS_PATH;

/// Builds links to user resources.
///
/// With a base URL (`BASE_URL`, e.g. `https://users.example.com`) links are
/// absolute; without one they are path-absolute (`/api/users/...`).
#[derive(Debug, Clone, Default)]
pub struct LinkGenerator {
    base_url: String,
}

impl LinkGenerator {
    /// Creates a generator; a trailing slash on `base_url` is ignored.
    pub fn new(base_url: Option<&str>) -> Self {
        Self {
            base_url: base_url
                .map(|b| b.trim_end_matches('/').to_string())
                .unwrap_or_default(),
        }
    }

    /// Link to a single user, as returned in `Location`.
    pub fn user(&self, id: Uuid) -> String {
        format!("{}{}/{}", self.base_url, USERS_PATH, id)
    }

    /// Link to one page of the user listing.
    pub fn users_page(&self, page_number: u32, page_size: u32) -> String {
        format!(
            "{}{}?pageNumber={}&pageSize={}",
            self.base_url, USERS_PATH, page_number, page_size
        )
    }
}
