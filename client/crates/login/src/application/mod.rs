//! Application Layer
//!
//! The login state machine and its configuration.

pub mod config;
pub mod controller;
pub mod navigation;

// Re-exports
pub use config::LoginConfig;
pub use controller::{LoginController, Submission};
pub use navigation::{NavigationEvent, NavigationEvents, NavigationSignal};
