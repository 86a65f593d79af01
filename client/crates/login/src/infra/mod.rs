//! Infrastructure Layer
//!
//! Collaborator implementations that need no platform services.

pub mod memory;
pub mod network;

pub use memory::InMemoryTokenStore;
pub use network::{StaticNetworkStatus, WatchNetworkStatus};
