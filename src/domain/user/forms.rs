// Login and registration form validation
// Mirrors the checks done before any auth call is made

use serde::{Deserialize, Serialize};

use super::value_objects::{validate_name, validate_password, Email};
use crate::domain::errors::ValidationError;

/// Login request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Validates a login form
///
/// # Validation Rules
/// - Email and password are both required
/// - Email must be well-formed
pub fn validate_login(email: &str, password: &str) -> Result<Credentials, ValidationError> {
    if email.is_empty() || password.is_empty() {
        return Err(ValidationError::field("form", "Please fill in all fields"));
    }
    let email = Email::new(email)?;
    Ok(Credentials {
        email: email.into(),
        password: password.to_string(),
    })
}

/// Raw registration form values
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
    pub phone: &'a str,
}

impl RegistrationForm<'_> {
    /// Validates the form, reporting the first failing rule
    ///
    /// # Validation Rules
    /// - Name, email, password and confirmation are required
    /// - Name is 2 to 100 characters
    /// - Email must be well-formed
    /// - Password is at least 6 characters
    /// - Confirmation matches the password
    /// - A blank phone is treated as absent
    pub fn validate(&self) -> Result<Registration, ValidationError> {
        if self.name.is_empty()
            || self.email.is_empty()
            || self.password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(ValidationError::field(
                "form",
                "Please fill in all required fields",
            ));
        }

        validate_name(self.name)?;
        let email = Email::new(self.email)?;
        validate_password(self.password)?;

        if self.password != self.confirm_password {
            return Err(ValidationError::field(
                "confirmPassword",
                "Passwords do not match",
            ));
        }

        let phone = self.phone.trim();
        Ok(Registration {
            name: self.name.to_string(),
            email: email.into(),
            password: self.password.to_string(),
            phone: (!phone.is_empty()).then(|| phone.to_string()),
        })
    }
}
