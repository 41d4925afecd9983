use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// JWT claims carried by access tokens.
///
/// `sub` holds the user identifier; `email` is embedded so requests can be
/// attributed to an account without an extra lookup. Every token carries an
/// expiration, which [`super::JwtHandler`] enforces on decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Account email at issue time
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for an authenticated user with a relative expiration.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `email` - Account email address
    /// * `expiration_hours` - Hours until the token expires
    ///
    /// # Returns
    /// Claims with sub, email, iat, and exp set
    pub fn for_user(
        user_id: impl ToString,
        email: impl Into<String>,
        expiration_hours: i64,
    ) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(expiration_hours);

        Self {
            sub: user_id.to_string(),
            email: email.into(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Check if the token is expired at the given Unix timestamp.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
