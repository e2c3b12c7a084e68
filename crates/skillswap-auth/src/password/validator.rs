//! Signup password rules.

use skillswap_core::config::AuthConfig;
use skillswap_core::error::AppError;

/// Checks a candidate password against the configured minimum length.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
}

impl PasswordValidator {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.min_length
            )));
        }
        if password.trim().is_empty() {
            return Err(AppError::validation("Password must not be blank"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enforces_minimum_length_in_characters() {
        let validator = PasswordValidator::new(&AuthConfig::default());
        assert!(validator.validate("12345").is_err());
        assert!(validator.validate("123456").is_ok());
        assert!(validator.validate("ñññññß").is_ok());
    }

    #[test]
    fn rejects_whitespace_only() {
        let validator = PasswordValidator::new(&AuthConfig::default());
        assert!(validator.validate("        ").is_err());
    }
}
