//! Login (Client-side Authentication Form) Module
//!
//! Clean Architecture structure:
//! - `domain/` - Form state, tokens, collaborator traits
//! - `application/` - Controller (state machine), configuration, navigation
//! - `infra/` - In-memory and watch-based collaborator implementations
//!
//! ## Features
//! - Email/password entry with "remember me"
//! - Asynchronous login orchestration that never blocks the caller
//! - Consecutive failure tracking with time-based lockout
//! - One-shot navigation events on success or restored session
//!
//! ## Rendering Model
//! The rendering layer is external. It reads [`LoginState`] snapshots
//! (or subscribes to them), dispatches intents into [`LoginController`],
//! and listens for [`NavigationEvent`]s. Every failure is surfaced as
//! `LoginState::error_message`, never as a returned error.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::config::LoginConfig;
pub use application::controller::{LoginController, Submission};
pub use application::navigation::{NavigationEvent, NavigationEvents};
pub use domain::collaborator::{AuthClient, NetworkStatus, NetworkStatusStream, TokenStore};
pub use domain::state::{BlankPolicy, LoginState};
pub use domain::token::{AuthOutcome, AuthToken};
pub use error::{ErrorKind, LoginError, LoginResult};

// Re-export kernel primitives used in public signatures
pub use kernel::clock::{Clock, ManualClock, SystemClock};

pub mod models {
    pub use crate::domain::state::*;
    pub use crate::domain::token::*;
}

pub mod store {
    pub use crate::infra::memory::InMemoryTokenStore;
}
