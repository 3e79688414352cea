use serde::Deserialize;

use crate::domain::types::{Password, UserEmail, UserName, ensure_password_match};
use crate::forms::FormError;

#[derive(Clone, Debug, Deserialize)]
/// Form data for creating an account.
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

impl RegisterForm {
    /// Validates the registration fields, reporting the first failure in
    /// order: name, email, password length, password match.
    pub fn validate(&self) -> Result<(), FormError> {
        UserName::new(&self.name).map_err(|_| FormError::InvalidName)?;
        UserEmail::new(&self.email).map_err(|_| FormError::InvalidEmail)?;
        Password::new(&self.password).map_err(|_| FormError::PasswordTooShort)?;
        ensure_password_match(&self.password, &self.password_confirm)
            .map_err(|_| FormError::PasswordMismatch)?;
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize)]
/// Form data for signing in.
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Deserialize)]
/// Form data requesting a password-reset link.
pub struct ForgotPasswordForm {
    pub email: String,
}

#[derive(Clone, Debug, Deserialize)]
/// Form data completing a password reset.
pub struct ResetPasswordForm {
    pub token: String,
    pub password: String,
    pub password_confirm: String,
}

impl ResetPasswordForm {
    pub fn validate(&self) -> Result<(), FormError> {
        Password::new(&self.password).map_err(|_| FormError::PasswordTooShort)?;
        ensure_password_match(&self.password, &self.password_confirm)
            .map_err(|_| FormError::PasswordMismatch)?;
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize)]
/// Form data requesting another verification email.
pub struct ResendVerificationForm {
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, password: &str, confirm: &str) -> RegisterForm {
        RegisterForm {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            password_confirm: confirm.into(),
        }
    }

    #[test]
    fn empty_name_fails_first() {
        assert_eq!(
            form("", "a@b.com", "password123", "password123").validate(),
            Err(FormError::InvalidName)
        );
    }

    #[test]
    fn bad_email_fails_after_name() {
        assert_eq!(
            form("Jo", "bad-email", "password123", "password123").validate(),
            Err(FormError::InvalidEmail)
        );
    }

    #[test]
    fn short_password_fails_after_email() {
        assert_eq!(
            form("Jo", "a@b.com", "short", "short").validate(),
            Err(FormError::PasswordTooShort)
        );
    }

    #[test]
    fn mismatched_confirmation_fails_last() {
        let err = form("Jo", "a@b.com", "password123", "different")
            .validate()
            .unwrap_err();
        assert_eq!(err, FormError::PasswordMismatch);
        assert_eq!(err.to_string(), "Passwords do not match");
    }

    #[test]
    fn valid_registration_passes() {
        assert!(
            form("Jo", "a@b.com", "password123", "password123")
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn reset_form_applies_password_rules() {
        let reset = ResetPasswordForm {
            token: "t".into(),
            password: "short".into(),
            password_confirm: "short".into(),
        };
        assert_eq!(reset.validate(), Err(FormError::PasswordTooShort));

        let reset = ResetPasswordForm {
            token: "t".into(),
            password: "password123".into(),
            password_confirm: "password124".into(),
        };
        assert_eq!(reset.validate(), Err(FormError::PasswordMismatch));
    }
}
