//! Login Controller
//!
//! The login form state machine. Processes intents from the presentation
//! layer, runs login attempts on the tokio runtime, tracks consecutive
//! failures and enforces the lockout policy.
//!
//! ## State Model
//! States are encoded in [`LoginState`] fields rather than an enum:
//! - Idle / Editing - `is_loading == false`, no active lockout
//! - Submitting - `is_loading == true`
//! - Locked - `locked_until` in the future
//! - Error - `error_message` set
//!
//! ## Ownership
//! The controller is the only writer of the state. Each change is one
//! wholesale snapshot replacement published through a `watch` channel.
//! It is meant to be driven from a single logical owner (the UI task);
//! clones are handles to the same controller.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::clock::{Clock, SystemClock, add_saturating};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::application::config::LoginConfig;
use crate::application::navigation::{NavigationEvent, NavigationEvents, NavigationSignal};
use crate::domain::collaborator::{AuthClient, NetworkStatus, TokenStore};
use crate::domain::state::LoginState;
use crate::domain::token::{AuthOutcome, AuthToken};
use crate::error::{LoginError, LoginResult};

/// What a call to [`LoginController::submit`] did
#[must_use]
#[derive(Debug)]
pub enum Submission {
    /// Attempt started on the runtime
    Dispatched(JoinHandle<()>),
    /// A guard fired; its message is now in the state
    Rejected(LoginError),
    /// An attempt is already in flight; nothing changed
    Ignored,
}

impl Submission {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, Self::Dispatched(_))
    }

    pub fn error(&self) -> Option<&LoginError> {
        match self {
            Self::Rejected(err) => Some(err),
            _ => None,
        }
    }

    /// Wait until a dispatched attempt has applied its outcome
    ///
    /// Returns immediately for rejected or ignored submissions. Dropping a
    /// `Submission` instead does not cancel the attempt. If the attempt
    /// panicked or was aborted the form is already unlocked with
    /// [`LoginError::Interrupted`] by the time this returns.
    pub async fn finished(self) {
        if let Self::Dispatched(handle) = self {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Login attempt task failed");
            }
        }
    }
}

/// Credentials and options captured when the attempt was dispatched
struct Attempt {
    email: String,
    password: String,
    remember_me: bool,
}

/// Clears the loading flag when an attempt is dropped before settling
///
/// Moved into the spawned task, so a panic in a collaborator or an abort
/// through the join handle still leaves the form submittable.
struct InFlight<A, S, N> {
    inner: Arc<Inner<A, S, N>>,
    settled: bool,
}

impl<A, S, N> InFlight<A, S, N> {
    fn settle(mut self) {
        self.settled = true;
    }
}

impl<A, S, N> Drop for InFlight<A, S, N> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let err = LoginError::Interrupted;
        err.log();
        let message = err.to_string();
        self.inner.state.send_modify(|state| {
            *state = state.clone().with_loading(false).with_error(Some(message));
        });
    }
}

/// Login form controller
pub struct LoginController<A, S, N> {
    inner: Arc<Inner<A, S, N>>,
}

struct Inner<A, S, N> {
    auth_client: Arc<A>,
    token_store: Arc<S>,
    network: Arc<N>,
    clock: Arc<dyn Clock>,
    config: LoginConfig,
    state: watch::Sender<LoginState>,
    navigation: NavigationSignal,
    runtime: Option<Handle>,
}

impl<A, S, N> Clone for LoginController<A, S, N> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A, S, N> LoginController<A, S, N>
where
    A: AuthClient + Sync + 'static,
    S: TokenStore + Sync + 'static,
    N: NetworkStatus + 'static,
{
    /// Create a controller that reads the wall clock
    pub fn new(
        auth_client: Arc<A>,
        token_store: Arc<S>,
        network: Arc<N>,
        config: LoginConfig,
    ) -> Self {
        Self::with_clock(auth_client, token_store, network, config, Arc::new(SystemClock))
    }

    /// Create a controller with an injected clock
    ///
    /// Attempts run on the tokio runtime current at construction, if any.
    pub fn with_clock(
        auth_client: Arc<A>,
        token_store: Arc<S>,
        network: Arc<N>,
        config: LoginConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let runtime = Handle::try_current().ok();
        Self::build(auth_client, token_store, network, config, clock, runtime)
    }

    /// Create a controller whose attempts run on `runtime`
    ///
    /// For controllers built and driven from threads outside any runtime.
    pub fn on_runtime(
        auth_client: Arc<A>,
        token_store: Arc<S>,
        network: Arc<N>,
        config: LoginConfig,
        clock: Arc<dyn Clock>,
        runtime: Handle,
    ) -> Self {
        Self::build(auth_client, token_store, network, config, clock, Some(runtime))
    }

    fn build(
        auth_client: Arc<A>,
        token_store: Arc<S>,
        network: Arc<N>,
        config: LoginConfig,
        clock: Arc<dyn Clock>,
        runtime: Option<Handle>,
    ) -> Self {
        let initial = LoginState::new().with_blank_policy(config.blank_policy);
        Self {
            inner: Arc::new(Inner {
                auth_client,
                token_store,
                network,
                clock,
                config,
                state: watch::Sender::new(initial),
                navigation: NavigationSignal::new(),
                runtime,
            }),
        }
    }

    // ========================================================================
    // Observation
    // ========================================================================

    /// Current snapshot
    pub fn state(&self) -> LoginState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every snapshot replacement
    pub fn subscribe_state(&self) -> watch::Receiver<LoginState> {
        self.inner.state.subscribe()
    }

    /// Subscribe to navigation events
    ///
    /// Only events emitted after this call are delivered.
    pub fn navigation(&self) -> NavigationEvents {
        self.inner.navigation.subscribe()
    }

    /// Whether the submit control should be enabled right now
    pub fn is_login_enabled(&self) -> bool {
        self.inner.state.borrow().is_login_enabled(self.now())
    }

    /// Current time on the controller's clock
    ///
    /// Rendering layers use this for lockout countdowns so they agree with
    /// [`is_login_enabled`](Self::is_login_enabled).
    pub fn now(&self) -> DateTime<Utc> {
        self.inner.clock.now()
    }

    pub fn config(&self) -> &LoginConfig {
        &self.inner.config
    }

    // ========================================================================
    // Intents
    // ========================================================================

    pub fn on_email_changed(&self, email: impl Into<String>) {
        let email = email.into();
        self.inner
            .replace(|state| state.clone().with_email(email).with_error(None));
    }

    pub fn on_password_changed(&self, password: impl Into<String>) {
        let password = password.into();
        self.inner
            .replace(|state| state.clone().with_password(password).with_error(None));
    }

    pub fn on_remember_me_changed(&self, remember_me: bool) {
        self.inner
            .replace(|state| state.clone().with_remember_me(remember_me));
    }

    /// Submit the form
    ///
    /// Guards run synchronously, in order: active lockout, blank fields,
    /// connectivity. The first one that fires sets `error_message` and the
    /// submission is rejected. Otherwise the state switches to loading and
    /// the attempt runs on a spawned task; this call never waits for it.
    ///
    /// While an attempt is in flight further submissions are ignored.
    ///
    /// The attempt is spawned on the runtime captured at construction, or
    /// the caller's runtime when none was captured. Without either the
    /// submission is rejected with [`LoginError::NoRuntime`].
    pub fn submit(&self) -> Submission {
        let snapshot = self.state();

        if snapshot.is_loading {
            tracing::debug!("Submission ignored, attempt already in flight");
            return Submission::Ignored;
        }

        let checked = self
            .inner
            .check_submittable(&snapshot, self.now())
            .and_then(|()| self.inner.runtime());
        let runtime = match checked {
            Ok(runtime) => runtime,
            Err(err) => {
                err.log();
                let message = err.to_string();
                self.inner
                    .replace(|state| state.clone().with_error(Some(message)));
                return Submission::Rejected(err);
            }
        };

        self.inner
            .replace(|state| state.clone().with_loading(true).with_error(None));

        let attempt = Attempt {
            email: snapshot.email,
            password: snapshot.password,
            remember_me: snapshot.remember_me,
        };

        tracing::debug!(
            remember_me = attempt.remember_me,
            failure_count = snapshot.failure_count,
            "Login attempt dispatched"
        );

        let guard = InFlight {
            inner: Arc::clone(&self.inner),
            settled: false,
        };
        Submission::Dispatched(runtime.spawn(async move {
            guard.inner.run(attempt).await;
            guard.settle();
        }))
    }

    /// Resume a remembered session
    ///
    /// If the token store holds a token that has not expired, emits
    /// [`NavigationEvent::SessionRestored`] and returns the token. Store
    /// errors are logged and treated as "no token".
    pub async fn restore_session(&self) -> Option<AuthToken> {
        let token = match self.inner.token_store.get().await {
            Ok(token) => token?,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored token");
                return None;
            }
        };

        if token.is_expired(self.now()) {
            tracing::debug!(expires_at = %token.expires_at, "Stored token expired");
            return None;
        }

        let receivers = self.inner.navigation.emit(NavigationEvent::SessionRestored);
        tracing::info!(receivers, "Session restored from stored token");
        Some(token)
    }
}

impl<A, S, N> Inner<A, S, N>
where
    A: AuthClient + Sync + 'static,
    S: TokenStore + Sync + 'static,
    N: NetworkStatus + 'static,
{
    /// Publish the snapshot built from the current one
    fn replace(&self, next: impl FnOnce(&LoginState) -> LoginState) {
        self.state.send_modify(|state| *state = next(state));
    }

    fn runtime(&self) -> LoginResult<Handle> {
        self.runtime
            .clone()
            .or_else(|| Handle::try_current().ok())
            .ok_or(LoginError::NoRuntime)
    }

    fn check_submittable(&self, state: &LoginState, now: DateTime<Utc>) -> LoginResult<()> {
        if state.is_locked(now) {
            return Err(LoginError::Locked);
        }
        if !state.has_credentials(self.config.blank_policy) {
            return Err(LoginError::Validation);
        }
        if !self.network.is_online() {
            return Err(LoginError::Offline);
        }
        Ok(())
    }

    async fn run(&self, attempt: Attempt) {
        let outcome = self
            .auth_client
            .login(&attempt.email, &attempt.password)
            .await;

        match outcome {
            AuthOutcome::Success { token } => self.on_success(token, attempt.remember_me).await,
            AuthOutcome::Failure { reason } => self.on_failure(reason),
        }
    }

    async fn on_success(&self, token: AuthToken, remember_me: bool) {
        if remember_me {
            // Best effort: a failed save must not block navigation
            if let Err(e) = self.token_store.save(&token).await {
                tracing::warn!(error = %e, "Token persistence failed, continuing");
            }
        }

        self.replace(|state| state.clone().succeeded());

        let receivers = self.navigation.emit(NavigationEvent::Authenticated);
        tracing::info!(remember_me, receivers, "Login succeeded");
    }

    fn on_failure(&self, reason: String) {
        let now = self.clock.now();
        let threshold = self.config.lockout_threshold;
        let mut failure_count = 0;
        let mut error = None;

        self.state.send_modify(|state| {
            failure_count = state.failure_count.saturating_add(1);
            let (err, locked_until) = if failure_count >= threshold {
                (
                    LoginError::LockedOut {
                        seconds: self.config.lockout_duration_secs(),
                    },
                    Some(add_saturating(now, self.config.lockout_duration)),
                )
            } else {
                (LoginError::Rejected(reason), None)
            };
            *state = state
                .clone()
                .failed(failure_count, locked_until, err.to_string());
            error = Some(err);
        });

        tracing::info!(failure_count, threshold, "Login attempt failed");
        if let Some(err) = error {
            err.log();
        }
    }
}
