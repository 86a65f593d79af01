//! Login Demo Entry Point
//!
//! Terminal stand-in for the rendering layer: reads intents from stdin,
//! dispatches them into the login controller and prints every snapshot.
//! Uses `anyhow` for startup errors; form errors live in the state.

mod auth;
mod config;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use login::infra::{InMemoryTokenStore, WatchNetworkStatus};
use login::{LoginController, LoginState, NavigationEvent, NetworkStatusStream, Submission};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::auth::DemoAuthClient;

type DemoController = LoginController<DemoAuthClient, InMemoryTokenStore, WatchNetworkStatus>;

const HELP: &str = "commands: email <text> | password <text> | remember on|off | submit \
                    | online | offline | restore | status | help | quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "login=info,login_demo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let login_config = config::login_config()?;
    tracing::info!(
        lockout_threshold = login_config.lockout_threshold,
        lockout_duration_ms = login_config.lockout_duration_ms(),
        blank_policy = ?login_config.blank_policy,
        "Login configuration loaded"
    );

    let network = Arc::new(WatchNetworkStatus::new(true));
    let controller: DemoController = LoginController::new(
        Arc::new(DemoAuthClient::new(config::demo_credentials())),
        Arc::new(InMemoryTokenStore::new()),
        Arc::clone(&network),
        login_config,
    );

    // Navigation listener
    let mut navigation = controller.navigation();
    tokio::spawn(async move {
        while let Some(event) = navigation.recv().await {
            match event {
                NavigationEvent::Authenticated => println!(">> signed in, leaving login form"),
                NavigationEvent::SessionRestored => println!(">> remembered session restored"),
            }
        }
    });

    // Connectivity listener
    let mut connectivity = network.subscribe();
    tokio::spawn(async move {
        while connectivity.changed().await.is_ok() {
            let online = *connectivity.borrow_and_update();
            println!(">> network {}", if online { "online" } else { "offline" });
        }
    });

    println!("{HELP}");
    render(&controller);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim_end();
        let (command, arg) = line.split_once(' ').unwrap_or((line, ""));

        match command {
            "email" => controller.on_email_changed(arg),
            "password" => controller.on_password_changed(arg),
            "remember" => controller.on_remember_me_changed(matches!(arg, "on" | "true" | "yes")),
            "online" => network.set_online(true),
            "offline" => network.set_online(false),
            "submit" => submit(&controller).await,
            "restore" => {
                if controller.restore_session().await.is_none() {
                    println!("no remembered session");
                }
            }
            "status" => {}
            "help" => println!("{HELP}"),
            "quit" | "exit" => break,
            "" => continue,
            other => {
                println!("unknown command: {other}");
                continue;
            }
        }
        render(&controller);
    }

    Ok(())
}

async fn submit(controller: &DemoController) {
    let submission = controller.submit();
    match &submission {
        Submission::Dispatched(_) => render(controller),
        Submission::Rejected(err) => {
            tracing::debug!(kind = %err.kind(), "Submission rejected");
        }
        Submission::Ignored => println!("attempt already in flight"),
    }
    submission.finished().await;
}

fn render(controller: &DemoController) {
    let state = controller.state();
    println!(
        "{}",
        describe(&state, controller.is_login_enabled(), controller.now())
    );
}

fn describe(state: &LoginState, login_enabled: bool, now: DateTime<Utc>) -> String {
    let mut out = format!(
        "[email: {:?}] [password: {}] [remember: {}] [failures: {}]",
        state.email,
        "*".repeat(state.password.chars().count()),
        if state.remember_me { "on" } else { "off" },
        state.failure_count,
    );
    if state.is_loading {
        out.push_str(" [signing in...]");
    }
    if let Some(remaining) = state.lockout_remaining(now) {
        out.push_str(&format!(" [locked {}s]", remaining.as_secs()));
    }
    out.push_str(if login_enabled { " [submit: enabled]" } else { " [submit: disabled]" });
    if let Some(message) = &state.error_message {
        out.push_str(&format!("\n  ! {message}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_masks_password() {
        let state = LoginState::new()
            .with_email("a@b.com")
            .with_password("hunter2")
            .with_error(Some("Bad creds".to_string()));
        let out = describe(&state, true, DateTime::UNIX_EPOCH);
        assert!(!out.contains("hunter2"));
        assert!(out.contains("*******"));
        assert!(out.contains("[submit: enabled]"));
        assert!(out.ends_with("! Bad creds"));
    }

    #[test]
    fn test_describe_counts_down_from_given_time() {
        let until = DateTime::from_timestamp(100, 0).unwrap();
        let state = LoginState {
            locked_until: Some(until),
            ..LoginState::new()
        };
        let at = |secs| DateTime::from_timestamp(secs, 0).unwrap();
        assert!(describe(&state, false, at(40)).contains("[locked 60s]"));
        assert!(!describe(&state, false, at(100)).contains("[locked"));
    }
}
