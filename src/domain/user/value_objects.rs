use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::errors::ValidationError;

/// Minimum accepted length for a display name
pub const NAME_MIN_CHARS: usize = 2;
/// Maximum accepted length for a display name
pub const NAME_MAX_CHARS: usize = 100;
/// Minimum accepted password length
pub const PASSWORD_MIN_CHARS: usize = 6;

/// Email value object representing a well-formed address
///
/// # Invariants
/// - Exactly one '@', with a non-empty local part
/// - No whitespace anywhere
/// - The domain contains a '.' with text on both sides
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Creates a new Email value object
    ///
    /// # Example
    /// ```
    /// use storefront_dashboard::domain::user::value_objects::Email;
    ///
    /// let email = Email::new("jean@example.com").expect("valid email");
    /// assert_eq!(email.as_str(), "jean@example.com");
    /// assert!(Email::new("jean@localhost").is_err());
    /// ```
    pub fn new(email: impl Into<String>) -> Result<Self, ValidationError> {
        let email = email.into();
        if email.is_empty() {
            return Err(ValidationError::field("email", "Email is required"));
        }
        if Self::is_valid(&email) {
            Ok(Email(email))
        } else {
            Err(ValidationError::field("email", "Please enter a valid email address"))
        }
    }

    fn is_valid(email: &str) -> bool {
        if email.chars().any(char::is_whitespace) {
            return false;
        }
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        if local.is_empty() || domain.contains('@') {
            return false;
        }
        domain
            .char_indices()
            .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
    }

    /// Returns the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Email::new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Checks a display name is between 2 and 100 characters
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let len = name.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len) {
        return Err(ValidationError::field(
            "name",
            format!(
                "Name must be between {} and {} characters",
                NAME_MIN_CHARS, NAME_MAX_CHARS
            ),
        ));
    }
    Ok(())
}

/// Checks a password has at least 6 characters
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < PASSWORD_MIN_CHARS {
        return Err(ValidationError::field(
            "password",
            format!("Password must be at least {} characters", PASSWORD_MIN_CHARS),
        ));
    }
    Ok(())
}
