//! Demo Auth Client
//!
//! Stands in for the network transport: accepts one fixed credential pair
//! after a short simulated round trip.

use std::time::Duration;

use chrono::{TimeDelta, Utc};
use login::{AuthClient, AuthOutcome, AuthToken};

use crate::config::DemoCredentials;

/// Simulated network latency
const ROUND_TRIP: Duration = Duration::from_millis(400);

/// Issued token lifetime
const TOKEN_TTL_SECS: i64 = 3600;

pub struct DemoAuthClient {
    credentials: DemoCredentials,
}

impl DemoAuthClient {
    pub fn new(credentials: DemoCredentials) -> Self {
        Self { credentials }
    }
}

impl AuthClient for DemoAuthClient {
    async fn login(&self, email: &str, password: &str) -> AuthOutcome {
        tokio::time::sleep(ROUND_TRIP).await;

        if email != self.credentials.email || password != self.credentials.password {
            return AuthOutcome::failure("Invalid email or password");
        }

        let token = format!("demo-{}", Utc::now().timestamp_millis());
        AuthOutcome::success(AuthToken::new(
            token,
            Utc::now() + TimeDelta::seconds(TOKEN_TTL_SECS),
        ))
    }
}
