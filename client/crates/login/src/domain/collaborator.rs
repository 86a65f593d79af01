//! Collaborator Traits
//!
//! Interfaces the controller depends on. Implementations live outside the
//! core (network transport, secure storage, platform connectivity APIs).

use tokio::sync::watch;

use crate::domain::token::{AuthOutcome, AuthToken};
use crate::error::LoginResult;

/// Performs a login attempt
///
/// Transport and server errors are reported as [`AuthOutcome::Failure`];
/// the controller applies no timeout of its own.
#[trait_variant::make(AuthClient: Send)]
pub trait LocalAuthClient {
    /// Attempt to authenticate with the given credentials
    async fn login(&self, email: &str, password: &str) -> AuthOutcome;
}

/// Persists the authentication token for "remember me"
#[trait_variant::make(TokenStore: Send)]
pub trait LocalTokenStore {
    /// Save (replace) the stored token
    async fn save(&self, token: &AuthToken) -> LoginResult<()>;

    /// Get the stored token, if any
    async fn get(&self) -> LoginResult<Option<AuthToken>>;
}

/// Reports device connectivity
///
/// Queried synchronously, once per submission.
pub trait NetworkStatus: Send + Sync {
    fn is_online(&self) -> bool;
}

/// Connectivity source that also pushes online/offline transitions
///
/// The receiver starts at the current value; it is marked changed only on
/// transitions after the call.
pub trait NetworkStatusStream: NetworkStatus {
    fn subscribe(&self) -> watch::Receiver<bool>;
}
