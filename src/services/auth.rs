//! Account lifecycle: registration, credentials, verification, reset.
//!
//! Backend failures are mapped to the human-readable messages shown inline on
//! the auth forms ("Invalid email or password", "Email not confirmed").

use crate::auth::{self, PURPOSE_RESET_PASSWORD, PURPOSE_VERIFY_EMAIL};
use crate::domain::types::{Password, UserEmail};
use crate::domain::user::{NewUser, User, UserRole};
use crate::forms::auth::{RegisterForm, ResetPasswordForm, SignInForm};
use crate::repository::{UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};

/// Validates the registration form, creates an unverified account, and
/// returns it with the email-verification token to deliver.
pub fn register<R>(repo: &R, form: &RegisterForm, secret: &str) -> ServiceResult<(User, String)>
where
    R: UserReader + UserWriter + ?Sized,
{
    form.validate()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let email = UserEmail::new(&form.email)?;
    if repo.get_user_by_email(email.as_str())?.is_some() {
        return Err(ServiceError::Form(
            "An account with this email already exists".to_string(),
        ));
    }

    let password = Password::new(&form.password)?;
    let password_hash = auth::hash_password(password.as_str())?;
    let new_user = NewUser::new(
        form.name.clone(),
        email.into_inner(),
        password_hash,
        UserRole::Client,
    );

    let user = repo.create_user(&new_user)?;
    let token = auth::issue_action_token(user.id, PURPOSE_VERIFY_EMAIL, secret)?;

    Ok((user, token))
}

/// Checks the submitted credentials and returns the account on success.
///
/// Unknown emails and wrong passwords produce the same message so the form
/// does not leak which accounts exist.
pub fn login<R>(repo: &R, form: &SignInForm) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    let email = form.email.trim().to_lowercase();

    let user = repo
        .get_user_by_email(&email)?
        .ok_or_else(|| ServiceError::Form("Invalid email or password".to_string()))?;

    if !auth::verify_password(&form.password, &user.password_hash)? {
        return Err(ServiceError::Form("Invalid email or password".to_string()));
    }

    if !user.email_verified {
        return Err(ServiceError::Form("Email not confirmed".to_string()));
    }

    Ok(user)
}

/// Consumes a verification token and marks the account confirmed.
pub fn verify_email<R>(repo: &R, token: &str, secret: &str) -> ServiceResult<()>
where
    R: UserWriter + ?Sized,
{
    let user_id = auth::verify_action_token(token, PURPOSE_VERIFY_EMAIL, secret)
        .map_err(|_| ServiceError::Form("This verification link is no longer valid".to_string()))?;

    repo.mark_email_verified(user_id)?;
    Ok(())
}

/// Issues a password-reset token for the account, if one exists.
///
/// Returns `None` for unknown emails; the caller shows the same message either
/// way.
pub fn request_password_reset<R>(
    repo: &R,
    email: &str,
    secret: &str,
) -> ServiceResult<Option<String>>
where
    R: UserReader + ?Sized,
{
    let email = email.trim().to_lowercase();
    match repo.get_user_by_email(&email)? {
        Some(user) => {
            let token = auth::issue_action_token(user.id, PURPOSE_RESET_PASSWORD, secret)?;
            Ok(Some(token))
        }
        None => Ok(None),
    }
}

/// Consumes a reset token and stores the new password hash.
pub fn reset_password<R>(repo: &R, form: &ResetPasswordForm, secret: &str) -> ServiceResult<()>
where
    R: UserWriter + ?Sized,
{
    form.validate()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let user_id = auth::verify_action_token(&form.token, PURPOSE_RESET_PASSWORD, secret)
        .map_err(|_| ServiceError::Form("This reset link is no longer valid".to_string()))?;

    let password_hash = auth::hash_password(&form.password)?;
    repo.set_user_password(user_id, &password_hash)?;
    Ok(())
}

/// Issues a fresh verification token for an unverified account.
pub fn resend_verification<R>(
    repo: &R,
    email: &str,
    secret: &str,
) -> ServiceResult<Option<String>>
where
    R: UserReader + ?Sized,
{
    let email = email.trim().to_lowercase();
    match repo.get_user_by_email(&email)? {
        Some(user) if !user.email_verified => {
            let token = auth::issue_action_token(user.id, PURPOSE_VERIFY_EMAIL, secret)?;
            Ok(Some(token))
        }
        _ => Ok(None),
    }
}
