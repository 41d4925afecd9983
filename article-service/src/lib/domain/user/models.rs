use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::user::errors::EmailError;
use crate::domain::user::errors::FullNameError;
use crate::domain::user::errors::PasswordPolicyError;
use crate::domain::user::errors::UserIdError;

/// User aggregate entity.
///
/// Represents a registered account that can publish articles and comments.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub fullname: FullName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub institution: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Arguments
    /// * `s` - UUID string to parse
    ///
    /// # Returns
    /// Parsed UserId
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Full name value type
///
/// Carries the display name shown next to published articles and comments.
/// The only constraint is that it must not be empty; spelling, casing, and
/// spacing are preserved exactly as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName(String);

impl FullName {
    /// Create a new valid full name.
    ///
    /// # Arguments
    /// * `fullname` - Raw full name string
    ///
    /// # Returns
    /// Validated FullName value object
    ///
    /// # Errors
    /// * `Empty` - Full name is the empty string
    pub fn new(fullname: String) -> Result<Self, FullNameError> {
        if fullname.is_empty() {
            return Err(FullNameError::Empty);
        }
        Ok(Self(fullname))
    }

    /// Get full name as string slice.
    ///
    /// # Returns
    /// Full name string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Validated EmailAddress value object
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    ///
    /// # Returns
    /// Email string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub fullname: FullName,
    pub email: EmailAddress,
    pub password: String,
    pub institution: Option<String>,
}

impl RegisterUserCommand {
    /// Construct a new register user command.
    ///
    /// # Arguments
    /// * `fullname` - Validated full name
    /// * `email` - Validated email address
    /// * `password` - Plain text password (will be hashed by service)
    /// * `institution` - Optional affiliation, stored as submitted
    ///
    /// # Returns
    /// RegisterUserCommand with validated fields
    ///
    /// # Errors
    /// * `Empty` - Password is the empty string
    pub fn new(
        fullname: FullName,
        email: EmailAddress,
        password: String,
        institution: Option<String>,
    ) -> Result<Self, PasswordPolicyError> {
        if password.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }

        Ok(Self {
            fullname,
            email,
            password,
            institution,
        })
    }
}
