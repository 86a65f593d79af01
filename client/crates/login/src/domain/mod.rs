//! Domain Layer
//!
//! Contains the form state, token types, and collaborator traits.

pub mod collaborator;
pub mod state;
pub mod token;

// Re-exports
pub use collaborator::{AuthClient, NetworkStatus, NetworkStatusStream, TokenStore};
pub use state::{BlankPolicy, LoginState};
pub use token::{AuthOutcome, AuthToken};
