//! Login Form State
//!
//! Immutable snapshot of the login form. The controller never edits a
//! published snapshot; every change builds the next one from the previous.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};

/// How blank email/password input is detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlankPolicy {
    /// Only the empty string is blank; `"   "` counts as input
    #[default]
    Empty,
    /// Whitespace-only input is blank as well
    Whitespace,
}

impl BlankPolicy {
    pub fn is_blank(self, value: &str) -> bool {
        match self {
            BlankPolicy::Empty => value.is_empty(),
            BlankPolicy::Whitespace => value.trim().is_empty(),
        }
    }
}

/// Login form snapshot
///
/// Carries the blank policy it was created under, so
/// [`is_login_enabled`](Self::is_login_enabled) on a published snapshot
/// agrees with the controller's own guard.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct LoginState {
    /// Raw email input
    pub email: String,
    /// Raw password input
    pub password: String,
    /// Persist the token on success
    pub remember_me: bool,
    /// An attempt is in flight
    pub is_loading: bool,
    /// Last user-visible error
    pub error_message: Option<String>,
    /// Consecutive failures since the last success
    pub failure_count: u32,
    /// Submission is blocked until this instant
    pub locked_until: Option<DateTime<Utc>>,
    /// How blank fields are detected
    pub blank_policy: BlankPolicy,
}

impl LoginState {
    /// Create the initial (empty) form
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a lockout is active at `now`
    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        self.locked_until.is_some_and(|until| now < until)
    }

    /// Time left on the active lockout, if any
    pub fn lockout_remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.locked_until
            .filter(|until| now < *until)
            .and_then(|until| (until - now).to_std().ok())
    }

    /// Both fields are filled in under `policy`
    pub fn has_credentials(&self, policy: BlankPolicy) -> bool {
        !policy.is_blank(&self.email) && !policy.is_blank(&self.password)
    }

    /// Check if the submit control should be enabled at `now`
    ///
    /// Blank fields are detected with the snapshot's own `blank_policy`.
    pub fn is_login_enabled(&self, now: DateTime<Utc>) -> bool {
        self.is_login_enabled_with(now, self.blank_policy)
    }

    /// [`is_login_enabled`](Self::is_login_enabled) under an explicit blank policy
    pub fn is_login_enabled_with(&self, now: DateTime<Utc>, policy: BlankPolicy) -> bool {
        !self.is_loading && !self.is_locked(now) && self.has_credentials(policy)
    }

    // ========================================================================
    // Snapshot builders
    // ========================================================================

    pub fn with_email(self, email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..self
        }
    }

    pub fn with_password(self, password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            ..self
        }
    }

    pub fn with_blank_policy(self, blank_policy: BlankPolicy) -> Self {
        Self {
            blank_policy,
            ..self
        }
    }

    pub fn with_remember_me(self, remember_me: bool) -> Self {
        Self {
            remember_me,
            ..self
        }
    }

    pub fn with_loading(self, is_loading: bool) -> Self {
        Self { is_loading, ..self }
    }

    pub fn with_error(self, error_message: Option<String>) -> Self {
        Self {
            error_message,
            ..self
        }
    }

    /// Snapshot after a successful attempt
    pub fn succeeded(self) -> Self {
        Self {
            is_loading: false,
            failure_count: 0,
            error_message: None,
            ..self
        }
    }

    /// Snapshot after a rejected attempt
    pub fn failed(
        self,
        failure_count: u32,
        locked_until: Option<DateTime<Utc>>,
        error_message: String,
    ) -> Self {
        Self {
            is_loading: false,
            failure_count,
            locked_until,
            error_message: Some(error_message),
            ..self
        }
    }
}

// Password never leaves the snapshot through Debug
impl fmt::Debug for LoginState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginState")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("remember_me", &self.remember_me)
            .field("is_loading", &self.is_loading)
            .field("error_message", &self.error_message)
            .field("failure_count", &self.failure_count)
            .field("locked_until", &self.locked_until)
            .field("blank_policy", &self.blank_policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(millis: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(millis).unwrap()
    }

    fn filled() -> LoginState {
        LoginState::new().with_email("a@b.com").with_password("pw")
    }

    #[test]
    fn test_initial_state() {
        let state = LoginState::new();
        assert_eq!(state.email, "");
        assert_eq!(state.password, "");
        assert!(!state.remember_me);
        assert!(!state.is_loading);
        assert_eq!(state.error_message, None);
        assert_eq!(state.failure_count, 0);
        assert_eq!(state.locked_until, None);
        assert!(!state.is_login_enabled(at(0)));
    }

    #[test]
    fn test_is_locked_boundary() {
        let state = LoginState {
            locked_until: Some(at(1_000)),
            ..LoginState::new()
        };
        assert!(state.is_locked(at(0)));
        assert!(state.is_locked(at(999)));
        assert!(!state.is_locked(at(1_000)));
        assert!(!state.is_locked(at(5_000)));
        assert!(!LoginState::new().is_locked(at(0)));
    }

    #[test]
    fn test_blank_fields_disable_login() {
        let now = at(0);
        // Every combination of other fields: blank input always disables
        for remember_me in [false, true] {
            for failure_count in [0, 5] {
                let base = LoginState {
                    remember_me,
                    failure_count,
                    error_message: Some("x".into()),
                    ..LoginState::new()
                };
                assert!(!base.clone().with_email("a@b.com").is_login_enabled(now));
                assert!(!base.clone().with_password("pw").is_login_enabled(now));
                assert!(!base.is_login_enabled(now));
            }
        }
        assert!(filled().is_login_enabled(now));
    }

    #[test]
    fn test_loading_or_locked_disables_login() {
        let now = at(0);
        assert!(!filled().with_loading(true).is_login_enabled(now));

        let locked = LoginState {
            locked_until: Some(at(10)),
            ..filled()
        };
        assert!(!locked.is_login_enabled(now));
        assert!(locked.is_login_enabled(at(10)));
    }

    #[test]
    fn test_blank_policy() {
        let spaces = LoginState::new().with_email("   ").with_password(" ");
        assert!(spaces.is_login_enabled(at(0)));
        assert!(spaces.is_login_enabled_with(at(0), BlankPolicy::Empty));
        assert!(!spaces.is_login_enabled_with(at(0), BlankPolicy::Whitespace));
        assert!(filled().is_login_enabled_with(at(0), BlankPolicy::Whitespace));

        let strict = spaces.clone().with_blank_policy(BlankPolicy::Whitespace);
        assert!(!strict.is_login_enabled(at(0)));
        assert!(strict.with_email("a@b.com").with_password("pw").is_login_enabled(at(0)));

        assert!(BlankPolicy::Empty.is_blank(""));
        assert!(!BlankPolicy::Empty.is_blank("\t"));
        assert!(BlankPolicy::Whitespace.is_blank("\t\n "));
    }

    #[test]
    fn test_lockout_remaining() {
        let state = LoginState {
            locked_until: Some(at(1_500)),
            ..LoginState::new()
        };
        assert_eq!(
            state.lockout_remaining(at(500)),
            Some(Duration::from_millis(1_000))
        );
        assert_eq!(state.lockout_remaining(at(1_500)), None);
        assert_eq!(LoginState::new().lockout_remaining(at(0)), None);
    }

    #[test]
    fn test_builders_replace_only_their_field() {
        let state = filled().with_error(Some("oops".into()));
        let next = state.clone().with_remember_me(true);
        assert!(next.remember_me);
        assert_eq!(next.error_message.as_deref(), Some("oops"));
        assert_eq!(next.email, state.email);

        let succeeded = LoginState {
            failure_count: 2,
            is_loading: true,
            ..state.clone()
        }
        .succeeded();
        assert_eq!(succeeded.failure_count, 0);
        assert!(!succeeded.is_loading);
        assert_eq!(succeeded.error_message, None);

        let failed = state.with_loading(true).failed(1, None, "Bad creds".into());
        assert_eq!(failed.failure_count, 1);
        assert!(!failed.is_loading);
        assert_eq!(failed.error_message.as_deref(), Some("Bad creds"));
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", filled().with_password("hunter2"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("a@b.com"));
    }
}
