//! Login Error Types
//!
//! Every variant's `Display` text is the message shown to the user, so the
//! controller can store `err.to_string()` directly in the form state.

use thiserror::Error;

/// Login-specific result type alias
pub type LoginResult<T> = Result<T, LoginError>;

/// Login error variants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    /// Email or password missing
    #[error("Enter email and password")]
    Validation,

    /// Submission attempted while a lockout is active
    #[error("Account locked. Try later.")]
    Locked,

    /// Device reports no connectivity
    #[error("Offline. Please connect to network.")]
    Offline,

    /// Remote rejection, reason shown verbatim
    #[error("{0}")]
    Rejected(String),

    /// Failure threshold reached; lockout started
    #[error("Too many failed attempts. Locked for {seconds}s")]
    LockedOut { seconds: u64 },

    /// Token could not be persisted
    #[error("Token persistence failed: {0}")]
    Persistence(String),

    /// Attempt task ended without an outcome (panicked or aborted)
    #[error("Login failed. Please try again.")]
    Interrupted,

    /// No tokio runtime to run the attempt on
    #[error("Login unavailable. Please try again.")]
    NoRuntime,
}

/// Classification of login errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Blank fields, handled locally
    Validation,
    /// Locked state, handled locally
    Lockout,
    /// No network, handled locally
    Offline,
    /// Remote rejection, counts toward lockout
    AuthFailure,
    /// Token save failure, never blocks the success path
    Persistence,
    /// Attempt could not run or did not finish
    Runtime,
}

impl ErrorKind {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Lockout => "lockout",
            ErrorKind::Offline => "offline",
            ErrorKind::AuthFailure => "auth_failure",
            ErrorKind::Persistence => "persistence",
            ErrorKind::Runtime => "runtime",
        }
    }

    /// Whether the error was decided without contacting the auth client
    #[inline]
    pub const fn is_local(&self) -> bool {
        matches!(
            self,
            ErrorKind::Validation | ErrorKind::Lockout | ErrorKind::Offline
        )
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl LoginError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoginError::Validation => ErrorKind::Validation,
            LoginError::Locked | LoginError::LockedOut { .. } => ErrorKind::Lockout,
            LoginError::Offline => ErrorKind::Offline,
            LoginError::Rejected(_) => ErrorKind::AuthFailure,
            LoginError::Persistence(_) => ErrorKind::Persistence,
            LoginError::Interrupted | LoginError::NoRuntime => ErrorKind::Runtime,
        }
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            LoginError::LockedOut { seconds } => {
                tracing::warn!(lockout_secs = seconds, "Failure threshold reached, locking form");
            }
            LoginError::Rejected(_) => {
                tracing::warn!("Login attempt rejected");
            }
            LoginError::Locked => {
                tracing::info!("Submission blocked by active lockout");
            }
            LoginError::Interrupted => {
                tracing::error!("Login attempt ended without an outcome");
            }
            LoginError::NoRuntime => {
                tracing::error!("No tokio runtime available for login attempt");
            }
            _ => {
                tracing::debug!(kind = %self.kind(), error = %self, "Submission rejected locally");
            }
        }
    }
}
