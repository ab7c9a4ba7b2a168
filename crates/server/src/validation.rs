//! Request-field validation.
//!
//! Field-keyed error messages, checked by the handlers before any
//! storage access. A non-valid outcome is an immediate rejection.

use std::collections::HashMap;

/// Result of validating a request's fields.
#[derive(Debug, Default)]
pub struct ValidationOutcome {
    pub errors: HashMap<String, String>,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn add(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
}

pub fn validate_register(display_name: &str, email: &str, password: &str) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::default();

    if display_name.trim().is_empty() {
        outcome.add("displayName", "Display name field is required");
    } else if display_name.len() < 2 || display_name.len() > 30 {
        outcome.add(
            "displayName",
            "Display name must be between 2 and 30 characters",
        );
    }

    if email.trim().is_empty() {
        outcome.add("email", "Email field is required");
    } else if !is_plausible_email(email) {
        outcome.add("email", "Email is invalid");
    }

    if password.is_empty() {
        outcome.add("password", "Password field is required");
    } else if password.len() < 6 || password.len() > 30 {
        outcome.add("password", "Password must be between 6 and 30 characters");
    }

    outcome
}

pub fn validate_login(email: &str, password: &str) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::default();

    if email.trim().is_empty() {
        outcome.add("email", "Email field is required");
    } else if !is_plausible_email(email) {
        outcome.add("email", "Email is invalid");
    }

    if password.is_empty() {
        outcome.add("password", "Password field is required");
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_register() {
        let outcome = validate_register("Alice", "alice@example.com", "secret123");
        assert!(outcome.is_valid());
    }

    #[test]
    fn test_register_missing_fields() {
        let outcome = validate_register("", "", "");
        assert!(!outcome.is_valid());
        assert_eq!(
            outcome.errors.get("displayName").map(String::as_str),
            Some("Display name field is required")
        );
        assert_eq!(
            outcome.errors.get("email").map(String::as_str),
            Some("Email field is required")
        );
        assert_eq!(
            outcome.errors.get("password").map(String::as_str),
            Some("Password field is required")
        );
    }

    #[test]
    fn test_register_bad_email() {
        for email in ["no-at-sign", "@example.com", "a@nodot", "a b@example.com"] {
            let outcome = validate_register("Alice", email, "secret123");
            assert_eq!(
                outcome.errors.get("email").map(String::as_str),
                Some("Email is invalid"),
                "email {email:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_register_password_length() {
        let outcome = validate_register("Alice", "alice@example.com", "short");
        assert!(outcome.errors.contains_key("password"));

        let outcome = validate_register("Alice", "alice@example.com", &"x".repeat(31));
        assert!(outcome.errors.contains_key("password"));
    }

    #[test]
    fn test_valid_login() {
        let outcome = validate_login("alice@example.com", "secret123");
        assert!(outcome.is_valid());
    }

    #[test]
    fn test_login_missing_password() {
        let outcome = validate_login("alice@example.com", "");
        assert_eq!(
            outcome.errors.get("password").map(String::as_str),
            Some("Password field is required")
        );
    }
}
