//! Session identity, signed action tokens, and password hashing.
//!
//! The identity cookie stores a JWT with the user's id, name, email, and role.
//! Email-verification and password-reset links carry a separate short-lived
//! token scoped by purpose so one kind of link cannot be replayed as the
//! other. Password hashes use Argon2id in PHC string format so parameters and
//! salt travel with the hash.

use std::future::{Ready, ready};

use actix_identity::Identity;
use actix_web::dev::Payload;
use actix_web::error::{ErrorInternalServerError, ErrorUnauthorized};
use actix_web::{FromRequest, HttpRequest, web};
use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::user::{User, UserRole};
use crate::models::config::ServerConfig;

/// Lifetime of the identity cookie's JWT.
pub const SESSION_TTL_DAYS: i64 = 7;
/// Lifetime of verification and reset tokens.
pub const ACTION_TOKEN_TTL_HOURS: i64 = 24;

pub const PURPOSE_VERIFY_EMAIL: &str = "verify-email";
pub const PURPOSE_RESET_PASSWORD: &str = "reset-password";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("token purpose mismatch")]
    Purpose,

    #[error("password hash error")]
    Hash,
}

/// Claims carried by the identity cookie, available to handlers as an
/// extractor.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuthenticatedUser {
    /// User id.
    pub sub: i32,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub exp: usize,
}

impl AuthenticatedUser {
    pub fn from_user(user: &User) -> Self {
        let exp = (Utc::now() + Duration::days(SESSION_TTL_DAYS)).timestamp() as usize;
        Self {
            sub: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            exp,
        }
    }

    pub fn to_jwt(&self, secret: &str) -> Result<String, AuthError> {
        let token = encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )?;
        Ok(token)
    }

    pub fn from_jwt(token: &str, secret: &str) -> Result<Self, AuthError> {
        let data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(data.claims)
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let identity = match Identity::from_request(req, payload).into_inner() {
            Ok(identity) => identity,
            Err(_) => return ready(Err(ErrorUnauthorized("not signed in"))),
        };

        let Some(config) = req.app_data::<web::Data<ServerConfig>>() else {
            return ready(Err(ErrorInternalServerError("server config missing")));
        };

        let result = identity
            .id()
            .map_err(|_| ErrorUnauthorized("not signed in"))
            .and_then(|token| {
                AuthenticatedUser::from_jwt(&token, &config.secret)
                    .map_err(|_| ErrorUnauthorized("session expired"))
            });

        ready(result)
    }
}

/// Claims of a single-purpose link token (verification, password reset).
#[derive(Clone, Debug, Serialize, Deserialize)]
struct ActionClaims {
    sub: i32,
    purpose: String,
    exp: usize,
}

/// Issues a signed token authorizing `purpose` for the given user.
pub fn issue_action_token(user_id: i32, purpose: &str, secret: &str) -> Result<String, AuthError> {
    let claims = ActionClaims {
        sub: user_id,
        purpose: purpose.to_string(),
        exp: (Utc::now() + Duration::hours(ACTION_TOKEN_TTL_HOURS)).timestamp() as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// Verifies an action token and returns the user id it was issued for.
pub fn verify_action_token(token: &str, purpose: &str, secret: &str) -> Result<i32, AuthError> {
    let data = decode::<ActionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    if data.claims.purpose != purpose {
        return Err(AuthError::Purpose);
    }
    Ok(data.claims.sub)
}

/// Hash a plaintext password using Argon2id with a random salt.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AuthError::Hash)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted hash.
///
/// Returns `Ok(false)` on mismatch; `Err` only for malformed hashes.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|_| AuthError::Hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(_) => Err(AuthError::Hash),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    const SECRET: &str = "test-secret";

    fn sample_user() -> User {
        User {
            id: 7,
            name: "Jo".into(),
            email: "jo@example.com".into(),
            password_hash: String::new(),
            role: UserRole::Builder,
            email_verified: true,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn session_jwt_round_trip() {
        let claims = AuthenticatedUser::from_user(&sample_user());
        let token = claims.to_jwt(SECRET).unwrap();
        let back = AuthenticatedUser::from_jwt(&token, SECRET).unwrap();
        assert_eq!(back, claims);
    }

    #[test]
    fn session_jwt_rejects_wrong_secret() {
        let claims = AuthenticatedUser::from_user(&sample_user());
        let token = claims.to_jwt(SECRET).unwrap();
        assert!(AuthenticatedUser::from_jwt(&token, "other-secret").is_err());
    }

    #[test]
    fn action_token_round_trip() {
        let token = issue_action_token(7, PURPOSE_RESET_PASSWORD, SECRET).unwrap();
        let user_id = verify_action_token(&token, PURPOSE_RESET_PASSWORD, SECRET).unwrap();
        assert_eq!(user_id, 7);
    }

    #[test]
    fn action_token_purpose_is_enforced() {
        let token = issue_action_token(7, PURPOSE_VERIFY_EMAIL, SECRET).unwrap();
        assert!(matches!(
            verify_action_token(&token, PURPOSE_RESET_PASSWORD, SECRET),
            Err(AuthError::Purpose)
        ));
    }

    #[test]
    fn password_hash_and_verify() {
        let hash = hash_password("correct-horse-battery").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct-horse-battery", &hash).unwrap());
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }
}
