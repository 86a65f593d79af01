//! Navigation Events
//!
//! One-shot "proceed past the login form" notifications. Built on
//! [`kernel::signal::Signal`], so an event emitted while nobody listens is
//! lost rather than delivered to the next subscriber.

use kernel::signal::{Signal, SignalReceiver};

/// Why the presentation layer should leave the login form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEvent {
    /// A login attempt succeeded
    Authenticated,
    /// A remembered, unexpired token was found
    SessionRestored,
}

/// Sending side, owned by the controller
pub type NavigationSignal = Signal<NavigationEvent>;

/// Receiving side handed to the presentation layer
pub type NavigationEvents = SignalReceiver<NavigationEvent>;
