//! Form definitions backing the BuildSync routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod auth;
pub mod chat;
pub mod cost_change;
pub mod decision;
pub mod drawing;
pub mod milestone;
pub mod product;
pub mod project;
pub mod remedial_item;
pub mod schedule_item;

#[derive(Debug, Error, PartialEq)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Name is required")]
    InvalidName,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Password must be at least 8 characters")]
    PasswordTooShort,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Title is required")]
    InvalidTitle,

    #[error("invalid amount")]
    InvalidAmount,

    #[error("invalid date")]
    InvalidDate,

    #[error("End date cannot be before start date")]
    InvalidDateRange,

    #[error("invalid status")]
    InvalidStatus,

    #[error("invalid priority")]
    InvalidPriority,

    #[error("A file is required")]
    MissingFile,
}

/// Parses a money amount entered by the user ("1250", "1250.50") into minor
/// units. Rejects negatives and more than two decimal places.
pub fn parse_minor_units(input: &str) -> Result<i64, FormError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.starts_with('-') {
        return Err(FormError::InvalidAmount);
    }

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (trimmed, ""),
    };

    if fraction.len() > 2 {
        return Err(FormError::InvalidAmount);
    }

    let whole: i64 = whole.parse().map_err(|_| FormError::InvalidAmount)?;
    let fraction: i64 = if fraction.is_empty() {
        0
    } else {
        let padded = format!("{fraction:0<2}");
        padded.parse().map_err(|_| FormError::InvalidAmount)?
    };

    whole
        .checked_mul(100)
        .and_then(|cents| cents.checked_add(fraction))
        .ok_or(FormError::InvalidAmount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_amounts() {
        assert_eq!(parse_minor_units("1250"), Ok(125_000));
        assert_eq!(parse_minor_units("0"), Ok(0));
    }

    #[test]
    fn parses_decimal_amounts() {
        assert_eq!(parse_minor_units("1250.5"), Ok(125_050));
        assert_eq!(parse_minor_units("1250.55"), Ok(125_055));
        assert_eq!(parse_minor_units(" 12.00 "), Ok(1_200));
    }

    #[test]
    fn rejects_bad_amounts() {
        for bad in ["", "-5", "12.345", "abc", "12.a"] {
            assert_eq!(parse_minor_units(bad), Err(FormError::InvalidAmount));
        }
    }
}
