//! Shared Kernel - Cross-cutting client primitives
//!
//! This crate contains the "smallest core" shared by client features:
//! - Injectable time source ([`clock::Clock`])
//! - Zero-replay event broadcast ([`signal::Signal`])
//!
//! **Design Principle**: Only include things that have the same meaning
//! for every feature and carry no feature-specific vocabulary.

pub mod clock;
pub mod signal;

pub use clock::{Clock, ManualClock, SystemClock};
pub use signal::{Signal, SignalReceiver};
