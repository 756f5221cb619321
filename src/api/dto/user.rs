//! DTOs for the user resource and their mapping to the entity.
//!
//! Mapping is written out field by field; every conversion between the wire
//! shapes and [`User`] lives in this module.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{DefaultOnNull, serde_as};
use std::sync::LazyLock;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::patch::Patchable;
use crate::domain::entities::{NewUser, User};

/// Logins are restricted to ASCII letters and digits.
static LOGIN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap());

/// Request body for `POST /api/users`.
///
/// Missing or `null` fields deserialize as empty strings so that they are
/// reported as validation errors (422) rather than malformed input (400).
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "Login must be between 1 and 50 characters"))]
    #[validate(regex(path = "*LOGIN_REGEX", message = "Login may contain only letters and digits"))]
    pub login: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "First name must be between 1 and 100 characters"))]
    pub first_name: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Last name must be between 1 and 100 characters"))]
    pub last_name: String,
}

/// Request body for `PUT /api/users/{id}`.
///
/// A full replacement: every field of the stored user is overwritten.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PutUserDto {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "Login must be between 1 and 50 characters"))]
    #[validate(regex(path = "*LOGIN_REGEX", message = "Login may contain only letters and digits"))]
    pub login: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "First name must be between 1 and 100 characters"))]
    pub first_name: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Last name must be between 1 and 100 characters"))]
    pub last_name: String,
}

/// The patchable projection of a user, target of `PATCH /api/users/{id}`.
///
/// `login` is not part of it; it changes only through a full `PUT`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDto {
    #[validate(length(min = 1, max = 100, message = "First name must be between 1 and 100 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100, message = "Last name must be between 1 and 100 characters"))]
    pub last_name: String,
}

/// Response representation of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub login: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<CreateUserDto> for NewUser {
    fn from(dto: CreateUserDto) -> Self {
        NewUser {
            login: dto.login,
            first_name: dto.first_name,
            last_name: dto.last_name,
        }
    }
}

impl PutUserDto {
    /// Builds the entity stored under `id`.
    pub fn into_user(self, id: Uuid) -> User {
        User::new(id, self.login, self.first_name, self.last_name)
    }
}

impl From<&User> for UpdateUserDto {
    fn from(user: &User) -> Self {
        UpdateUserDto {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

impl UpdateUserDto {
    /// Copies the patchable fields onto `user`, keeping its id and login.
    pub fn apply_to(self, user: &User) -> User {
        User::new(user.id, user.login.clone(), self.first_name, self.last_name)
    }

    fn field_mut(&mut self, field: &str) -> Option<&mut String> {
        if field.eq_ignore_ascii_case("firstName") {
            Some(&mut self.first_name)
        } else if field.eq_ignore_ascii_case("lastName") {
            Some(&mut self.last_name)
        } else {
            None
        }
    }
}

impl Patchable for UpdateUserDto {
    fn set_field(&mut self, field: &str, value: &Value) -> Result<(), String> {
        let slot = self
            .field_mut(field)
            .ok_or_else(|| format!("Unknown field '{field}'"))?;
        match value {
            Value::String(s) => {
                *slot = s.clone();
                Ok(())
            }
            other => Err(format!("Expected a string value, got {other}")),
        }
    }

    fn clear_field(&mut self, field: &str) -> Result<(), String> {
        let slot = self
            .field_mut(field)
            .ok_or_else(|| format!("Unknown field '{field}'"))?;
        slot.clear();
        Ok(())
    }

    fn field_value(&self, field: &str) -> Option<Value> {
        let value = if field.eq_ignore_ascii_case("firstName") {
            &self.first_name
        } else if field.eq_ignore_ascii_case("lastName") {
            &self.last_name
        } else {
            return None;
        };
        Some(Value::String(value.clone()))
    }
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            id: user.id,
            login: user.login,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_dto(login: &str, first: &str, last: &str) -> CreateUserDto {
        CreateUserDto {
            login: login.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
        }
    }

    #[test]
    fn test_create_dto_valid() {
        assert!(create_dto("johndoe375", "John", "Doe").validate().is_ok());
    }

    #[test]
    fn test_create_dto_rejects_non_alphanumeric_login() {
        for login in ["john.doe", "john doe", "john_doe", "jöhn", "john-doe"] {
            let errors = create_dto(login, "John", "Doe").validate().unwrap_err();
            assert!(
                errors.field_errors().contains_key("login"),
                "login {login:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_create_dto_rejects_empty_fields() {
        let errors = create_dto("", "", "").validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("login"));
        assert!(fields.contains_key("first_name"));
        assert!(fields.contains_key("last_name"));
    }

    #[test]
    fn test_create_dto_rejects_overlong_login() {
        let login = "a".repeat(51);
        assert!(create_dto(&login, "John", "Doe").validate().is_err());
        let login = "a".repeat(50);
        assert!(create_dto(&login, "John", "Doe").validate().is_ok());
    }

    #[test]
    fn test_create_dto_missing_and_null_fields_default_to_empty() {
        let dto: CreateUserDto =
            serde_json::from_value(json!({ "login": "john", "firstName": null })).unwrap();
        assert_eq!(dto.login, "john");
        assert_eq!(dto.first_name, "");
        assert_eq!(dto.last_name, "");
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_dto_maps_to_new_user() {
        let new_user: NewUser = create_dto("johndoe375", "John", "Doe").into();
        assert_eq!(new_user.login, "johndoe375");
        assert_eq!(new_user.first_name, "John");
        assert_eq!(new_user.last_name, "Doe");
    }

    #[test]
    fn test_put_dto_into_user_carries_id() {
        let id = Uuid::new_v4();
        let dto: PutUserDto = serde_json::from_value(json!({
            "login": "neo",
            "firstName": "Thomas",
            "lastName": "Anderson"
        }))
        .unwrap();

        let user = dto.into_user(id);

        assert_eq!(user.id, id);
        assert_eq!(user.login, "neo");
    }

    #[test]
    fn test_update_dto_projection_round_trip_keeps_login() {
        let user = User::new(
            Uuid::new_v4(),
            "johndoe375".into(),
            "John".into(),
            "Doe".into(),
        );

        let mut dto = UpdateUserDto::from(&user);
        dto.first_name = "Johnny".into();
        let patched = dto.apply_to(&user);

        assert_eq!(patched.id, user.id);
        assert_eq!(patched.login, "johndoe375");
        assert_eq!(patched.first_name, "Johnny");
        assert_eq!(patched.last_name, "Doe");
    }

    #[test]
    fn test_update_dto_patchable_fields() {
        let mut dto = UpdateUserDto {
            first_name: "John".into(),
            last_name: "Doe".into(),
        };

        dto.set_field("firstname", &json!("Jane")).unwrap();
        assert_eq!(dto.first_name, "Jane");

        dto.clear_field("lastName").unwrap();
        assert_eq!(dto.last_name, "");

        assert!(dto.set_field("login", &json!("x")).is_err());
        assert!(dto.set_field("firstName", &json!(42)).is_err());
        assert_eq!(dto.field_value("firstName"), Some(json!("Jane")));
        assert_eq!(dto.field_value("id"), None);
    }

    #[test]
    fn test_user_dto_serializes_camel_case() {
        let id = Uuid::new_v4();
        let dto = UserDto::from(User::new(id, "john".into(), "John".into(), "Doe".into()));

        let value = serde_json::to_value(&dto).unwrap();

        assert_eq!(value["id"], json!(id));
        assert_eq!(value["firstName"], "John");
        assert_eq!(value["lastName"], "Doe");
        assert!(value.get("first_name").is_none());
    }
}
