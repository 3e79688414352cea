use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::TypeConstraintError;
use crate::domain::user::{NewUser as DomainNewUser, User as DomainUser};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::users)]
/// Diesel model for [`crate::domain::user::User`].
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub email_verified: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
/// Insertable form of [`User`].
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: String,
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: user.id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role.parse()?,
            email_verified: user.email_verified,
            created_at: user.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewUser> for NewUser<'a> {
    fn from(user: &'a DomainNewUser) -> Self {
        Self {
            name: user.name.as_str(),
            email: user.email.as_str(),
            password_hash: user.password_hash.as_str(),
            role: user.role.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserRole;
    use chrono::Utc;

    #[test]
    fn user_into_domain_parses_role() {
        let now = Utc::now().naive_utc();
        let db_user = User {
            id: 1,
            name: "Jo".into(),
            email: "jo@example.com".into(),
            password_hash: "$argon2id$...".into(),
            role: "builder".into(),
            email_verified: true,
            created_at: now,
        };
        let domain: DomainUser = db_user.try_into().unwrap();
        assert_eq!(domain.role, UserRole::Builder);
        assert!(domain.email_verified);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let db_user = User {
            id: 1,
            name: "Jo".into(),
            email: "jo@example.com".into(),
            password_hash: String::new(),
            role: "owner".into(),
            email_verified: false,
            created_at: Utc::now().naive_utc(),
        };
        assert!(DomainUser::try_from(db_user).is_err());
    }
}
