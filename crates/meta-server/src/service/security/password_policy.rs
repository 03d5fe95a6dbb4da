//! Registration password policy.

use validator::ValidationError;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum accepted password length, in characters.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Checks a candidate password against the registration policy.
///
/// A password must be 8 to 128 characters long and contain at least one
/// letter, one digit and one character that is neither.
///
/// Usable as a `validator` custom function:
///
/// ```rust,ignore
/// #[validate(custom(function = "validate_password"))]
/// pub password: String,
/// ```
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let length = password.chars().count();
    if length < MIN_PASSWORD_LENGTH {
        return Err(policy_error(
            "password_too_short",
            "must be at least 8 characters long",
        ));
    }

    if length > MAX_PASSWORD_LENGTH {
        return Err(policy_error(
            "password_too_long",
            "must be at most 128 characters long",
        ));
    }

    if !password.chars().any(char::is_alphabetic) {
        return Err(policy_error(
            "password_missing_letter",
            "must contain at least one letter",
        ));
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(policy_error(
            "password_missing_digit",
            "must contain at least one digit",
        ));
    }

    if password.chars().all(char::is_alphanumeric) {
        return Err(policy_error(
            "password_missing_symbol",
            "must contain at least one symbol",
        ));
    }

    Ok(())
}

fn policy_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(password: &str) -> Option<String> {
        validate_password(password).err().map(|e| e.code.into_owned())
    }

    #[test]
    fn accepts_policy_compliant_passwords() {
        assert!(validate_password("Secret123!").is_ok());
        assert!(validate_password("çãoéü 9 ok").is_ok());
    }

    #[test]
    fn rejects_each_missing_class() {
        assert_eq!(code("Sh0rt!").as_deref(), Some("password_too_short"));
        assert_eq!(code("12345678!").as_deref(), Some("password_missing_letter"));
        assert_eq!(code("Password!").as_deref(), Some("password_missing_digit"));
        assert_eq!(code("Secret123").as_deref(), Some("password_missing_symbol"));
    }

    #[test]
    fn rejects_overlong_passwords() {
        let password = format!("a1!{}", "x".repeat(MAX_PASSWORD_LENGTH));
        assert_eq!(code(&password).as_deref(), Some("password_too_long"));
    }
}
