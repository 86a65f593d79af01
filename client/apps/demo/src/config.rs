//! Demo Configuration
//!
//! Read from the environment (and `.env`, loaded by `main`).

use std::env;
use std::time::Duration;

use anyhow::Context;
use login::{BlankPolicy, LoginConfig};

/// Credentials the demo auth client accepts
pub struct DemoCredentials {
    pub email: String,
    pub password: String,
}

pub fn login_config() -> anyhow::Result<LoginConfig> {
    let mut config = LoginConfig::default();

    if let Ok(raw) = env::var("LOGIN_LOCKOUT_THRESHOLD") {
        config.lockout_threshold = raw
            .trim()
            .parse()
            .with_context(|| format!("LOGIN_LOCKOUT_THRESHOLD is not a number: {raw}"))?;
    }

    if let Ok(raw) = env::var("LOGIN_LOCKOUT_DURATION_MS") {
        let ms: u64 = raw
            .trim()
            .parse()
            .with_context(|| format!("LOGIN_LOCKOUT_DURATION_MS is not a number: {raw}"))?;
        config.lockout_duration = Duration::from_millis(ms);
    }

    let trim = env::var("LOGIN_TRIM_BLANK")
        .map(|raw| matches!(raw.trim(), "1" | "true" | "yes"))
        .unwrap_or(false);
    if trim {
        config = config.with_blank_policy(BlankPolicy::Whitespace);
    }

    Ok(config)
}

pub fn demo_credentials() -> DemoCredentials {
    DemoCredentials {
        email: env::var("LOGIN_DEMO_EMAIL").unwrap_or_else(|_| "demo@example.com".to_string()),
        password: env::var("LOGIN_DEMO_PASSWORD").unwrap_or_else(|_| "password".to_string()),
    }
}
