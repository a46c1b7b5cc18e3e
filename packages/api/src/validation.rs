//! Account form validation shared by the pages and the server.

use thiserror::Error;

use crate::auth::Role;

/// Minimum password length accepted by the auth provider.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid email.")]
    InvalidEmail,
    #[error("Password must be at least 6 characters.")]
    PasswordTooShort,
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("Please select a role.")]
    MissingRole,
}

/// Check the registration form before it is submitted.
pub fn validate_registration(
    email: &str,
    password: &str,
    confirm: &str,
    role: Option<Role>,
) -> Result<(), ValidationError> {
    validate_email(email)?;
    validate_new_password(password, confirm)?;
    if role.is_none() {
        return Err(ValidationError::MissingRole);
    }
    Ok(())
}

/// Check a new password and its confirmation.
pub fn validate_new_password(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ValidationError::InvalidEmail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_registration() {
        assert_eq!(
            validate_registration("a@b.org", "secret1", "secret1", Some(Role::Patient)),
            Ok(())
        );
    }

    #[test]
    fn test_registration_errors() {
        assert_eq!(
            validate_registration("", "secret1", "secret1", Some(Role::Doctor)),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_registration("nobody", "secret1", "secret1", Some(Role::Doctor)),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_registration("a@b.org", "short", "short", Some(Role::Doctor)),
            Err(ValidationError::PasswordTooShort)
        );
        assert_eq!(
            validate_registration("a@b.org", "secret1", "secret2", Some(Role::Doctor)),
            Err(ValidationError::PasswordMismatch)
        );
        assert_eq!(
            validate_registration("a@b.org", "secret1", "secret1", None),
            Err(ValidationError::MissingRole)
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::PasswordMismatch.to_string(),
            "Passwords do not match."
        );
        assert_eq!(ValidationError::MissingRole.to_string(), "Please select a role.");
    }
}
