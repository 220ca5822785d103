use serde::Serialize;
use validator::{ValidateEmail, ValidateLength};

use crate::domain::error::DomainError;

/// A single named check applied to an incoming registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationRule {
    EmailRequired,
    UsernameRequired,
    PasswordRequired,
    EmailType,
    UsernameType,
    PasswordType,
    EmailFormat,
    PasswordLength,
}

impl RegistrationRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmailRequired => "email_required",
            Self::UsernameRequired => "username_required",
            Self::PasswordRequired => "password_required",
            Self::EmailType => "email_type",
            Self::UsernameType => "username_type",
            Self::PasswordType => "password_type",
            Self::EmailFormat => "email_format",
            Self::PasswordLength => "password_length",
        }
    }
}

/// Raw value of one request field, before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Absent, or a falsy value such as `null`, `false` or `0`
    Missing,
    Text(String),
    /// A truthy value that is not a string
    NotText,
}

/// Optional format rules. Presence rules are always applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub require_email_format: bool,
    pub min_password_length: Option<usize>,
}

impl ValidationPolicy {
    fn format_violations(&self, email: &str, password: &str) -> Vec<RegistrationRule> {
        let mut violations = Vec::new();
        if self.require_email_format && !email.validate_email() {
            violations.push(RegistrationRule::EmailFormat);
        }
        if let Some(min) = self.min_password_length {
            if !password.validate_length(Some(min as u64), None, None) {
                violations.push(RegistrationRule::PasswordLength);
            }
        }
        violations
    }
}

/// Registration request that passed validation.
///
/// The plaintext password lives only as long as this value and is consumed
/// by hashing.
pub struct Registration {
    email: String,
    username: String,
    password: String,
}

impl Registration {
    /// Validate raw request fields. Missing values and `""` are both absent.
    ///
    /// Presence rules are checked first; type and format rules only run once
    /// every field is present.
    pub fn new(
        email: FieldValue,
        username: FieldValue,
        password: FieldValue,
        policy: &ValidationPolicy,
    ) -> Result<Self, DomainError> {
        let mut missing = Vec::new();
        let mut invalid = Vec::new();
        let mut check = |value: FieldValue, required: RegistrationRule, typed: RegistrationRule| {
            match value {
                FieldValue::Text(text) if !text.is_empty() => Some(text),
                FieldValue::Text(_) | FieldValue::Missing => {
                    missing.push(required);
                    None
                }
                FieldValue::NotText => {
                    invalid.push(typed);
                    None
                }
            }
        };
        let email = check(email, RegistrationRule::EmailRequired, RegistrationRule::EmailType);
        let username = check(
            username,
            RegistrationRule::UsernameRequired,
            RegistrationRule::UsernameType,
        );
        let password = check(
            password,
            RegistrationRule::PasswordRequired,
            RegistrationRule::PasswordType,
        );

        let (Some(email), Some(username), Some(password)) = (email, username, password) else {
            return Err(if missing.is_empty() {
                DomainError::InvalidFields(invalid)
            } else {
                DomainError::MissingFields(missing)
            });
        };

        let invalid = policy.format_violations(&email, &password);
        if !invalid.is_empty() {
            return Err(DomainError::InvalidFields(invalid));
        }

        Ok(Self {
            email,
            username,
            password,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Split into `(email, username, password)`
    pub fn into_parts(self) -> (String, String, String) {
        (self.email, self.username, self.password)
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
