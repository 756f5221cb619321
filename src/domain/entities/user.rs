//! Domain entity representing a registered user.

use uuid::Uuid;

/// A user record as stored by a [`crate::domain::repositories::UserRepository`].
///
/// `id` is assigned by the repository on insert (or supplied by the caller on
/// upsert) and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub login: String,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    /// Creates a new User instance.
    pub fn new(id: Uuid, login: String, first_name: String, last_name: String) -> Self {
        Self {
            id,
            login,
            first_name,
            last_name,
        }
    }
}

/// Input data for inserting a user; the repository assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub login: String,
    pub first_name: String,
    pub last_name: String,
}

impl NewUser {
    /// Attaches an identifier, producing the stored form.
    pub fn with_id(self, id: Uuid) -> User {
        User::new(id, self.login, self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let id = Uuid::new_v4();
        let user = User::new(
            id,
            "johndoe375".to_string(),
            "John".to_string(),
            "Doe".to_string(),
        );

        assert_eq!(user.id, id);
        assert_eq!(user.login, "johndoe375");
        assert_eq!(user.first_name, "John");
        assert_eq!(user.last_name, "Doe");
    }

    #[test]
    fn test_new_user_with_id() {
        let id = Uuid::new_v4();
        let new_user = NewUser {
            login: "jane1".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Roe".to_string(),
        };

        let user = new_user.with_id(id);

        assert_eq!(user.id, id);
        assert_eq!(user.login, "jane1");
    }
}
