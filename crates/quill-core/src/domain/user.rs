use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User role - determines administrative privileges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

/// User entity - represents an account in the system.
///
/// The password hash is opaque and must never leave the backend;
/// API responses strip it at the DTO boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether this user may perform admin-only operations.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Data required to create a user. The id and timestamps are
/// generated by the persistence layer.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}

/// Partial update applied to a user record. `None` fields are left
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<Role>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        let now = Utc::now();
        User {
            id: 1,
            email: "a@example.com".to_string(),
            password_hash: "hash".to_string(),
            first_name: None,
            last_name: None,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn admin_check() {
        assert!(user(Role::Admin).is_admin());
        assert!(!user(Role::User).is_admin());
    }

    #[test]
    fn password_hash_is_not_serialized() {
        let json = serde_json::to_value(user(Role::User)).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "a@example.com");
    }

    #[test]
    fn role_uses_uppercase_wire_format() {
        assert_eq!(serde_json::to_value(Role::Admin).unwrap(), "ADMIN");
        assert_eq!(serde_json::to_value(Role::User).unwrap(), "USER");
    }
}
