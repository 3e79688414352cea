use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

/// Access level attached to an account.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Builder,
    #[default]
    Client,
}

impl UserRole {
    /// Builders and admins may approve products and cost changes.
    pub fn can_approve(self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Builder)
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::Builder => write!(f, "builder"),
            UserRole::Client => write!(f, "client"),
        }
    }
}

impl FromStr for UserRole {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "builder" => Ok(UserRole::Builder),
            "client" => Ok(UserRole::Client),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    /// Argon2id hash in PHC string format. Never serialized to templates.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub email_verified: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

impl NewUser {
    #[must_use]
    pub fn new(name: String, email: String, password_hash: String, role: UserRole) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            password_hash,
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trip() {
        for role in [UserRole::Admin, UserRole::Builder, UserRole::Client] {
            assert_eq!(role.to_string().parse::<UserRole>().unwrap(), role);
        }
        assert!("manager".parse::<UserRole>().is_err());
    }

    #[test]
    fn approval_rights() {
        assert!(UserRole::Admin.can_approve());
        assert!(UserRole::Builder.can_approve());
        assert!(!UserRole::Client.can_approve());
    }

    #[test]
    fn new_user_normalizes_email() {
        let user = NewUser::new(
            " Jo ".into(),
            " Jo@Example.com ".into(),
            "$argon2id$...".into(),
            UserRole::Client,
        );
        assert_eq!(user.name, "Jo");
        assert_eq!(user.email, "jo@example.com");
    }
}
