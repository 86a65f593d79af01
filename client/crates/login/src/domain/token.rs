//! Token Types
//!
//! What an [`AuthClient`](crate::domain::collaborator::AuthClient) hands back.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authentication token with its expiry
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthToken {
    /// Opaque token value
    pub token: String,
    /// Instant after which the token is no longer valid
    pub expires_at: DateTime<Utc>,
}

impl AuthToken {
    pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    /// Check if the token has expired at `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

// Keep token values out of logs
impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Result of one login attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Credentials accepted
    Success { token: AuthToken },
    /// Credentials rejected, or the attempt could not be completed
    Failure { reason: String },
}

impl AuthOutcome {
    pub fn success(token: AuthToken) -> Self {
        Self::Success { token }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Lets fallible clients surface their errors as failures
impl<E: fmt::Display> From<Result<AuthToken, E>> for AuthOutcome {
    fn from(result: Result<AuthToken, E>) -> Self {
        match result {
            Ok(token) => Self::success(token),
            Err(err) => Self::failure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(millis: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(millis).unwrap()
    }

    #[test]
    fn test_is_expired_boundary() {
        let token = AuthToken::new("abc", at(1_000));
        assert!(!token.is_expired(at(999)));
        assert!(token.is_expired(at(1_000)));
        assert!(token.is_expired(at(1_001)));
    }

    #[test]
    fn test_debug_redacts_token() {
        let token = AuthToken::new("super-secret", at(0));
        let debug = format!("{token:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_token_serialization() {
        let token = AuthToken::new("abc", at(0));
        let json = serde_json::to_string(&token).unwrap();
        assert!(json.contains(r#""token":"abc""#));
        assert!(json.contains("expiresAt"));

        let parsed: AuthToken = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, token);
    }

    #[test]
    fn test_outcome_from_result() {
        let ok: Result<AuthToken, String> = Ok(AuthToken::new("t", at(0)));
        assert!(AuthOutcome::from(ok).is_success());

        let err: Result<AuthToken, &str> = Err("server error: 503");
        assert_eq!(
            AuthOutcome::from(err),
            AuthOutcome::failure("server error: 503")
        );
    }
}
