//! Notification commands, including the minute-interval watch loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use chrono::Local;

use super::display::print_notification;
use super::ui::{clear_screen, status};
use super::{connect, NotificationCommands};
use crate::api::ApiClient;
use crate::models::StatusFilter;
use crate::poller::{Poller, PollerState, Tick, POLL_INTERVAL};
use crate::session::Requirement;

/// How often the watch loop wakes to notice Ctrl-C between ticks.
const SHUTDOWN_POLL: Duration = Duration::from_millis(250);

pub fn run_notifications(api_url: &str, command: Option<NotificationCommands>) -> Result<()> {
    let (client, _) = connect(api_url, Requirement::SignedIn)?;

    match command.unwrap_or(NotificationCommands::List {
        status: "unread".to_string(),
    }) {
        NotificationCommands::List { status } => list(&client, &status),
        NotificationCommands::Read { id } => {
            client.mark_as_read(id)?;
            status("Marked as read.");
            Ok(())
        }
        NotificationCommands::Dismiss { id } => {
            client.dismiss(id)?;
            status("Dismissed.");
            Ok(())
        }
        NotificationCommands::Check => check(&client),
        NotificationCommands::Watch => watch(&client),
    }
}

fn list(client: &ApiClient, filter: &str) -> Result<()> {
    let Some(filter) = StatusFilter::parse(filter) else {
        bail!("Unknown status '{}'. One of: unread, read, dismissed, all", filter);
    };

    let notifications = client.notifications(filter)?;
    if notifications.is_empty() {
        println!("No notifications.");
        return Ok(());
    }

    for notification in &notifications {
        print_notification(notification);
    }
    println!("\n{} notification(s)", notifications.len());
    Ok(())
}

fn check(client: &ApiClient) -> Result<()> {
    let result = client.check_follow_ups()?;
    status(&result.message);
    Ok(())
}

/// Foreground poll loop: one cycle immediately, then every minute until
/// Ctrl-C. Failed cycles keep the loop alive; the next tick retries.
fn watch(client: &ApiClient) -> Result<()> {
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            shutdown.store(true, Ordering::SeqCst);
        })?;
    }

    let mut poller = Poller::new();

    loop {
        let outcome = poller.tick(client);
        if shutdown.load(Ordering::SeqCst) {
            // The cycle landed after Ctrl-C; drop it unrendered.
            break;
        }
        render(&poller, outcome)?;

        let deadline = Instant::now() + POLL_INTERVAL;
        while Instant::now() < deadline {
            if shutdown.load(Ordering::SeqCst) {
                println!("\nStopped.");
                return Ok(());
            }
            std::thread::sleep(SHUTDOWN_POLL);
        }
    }

    println!("\nStopped.");
    Ok(())
}

fn render(poller: &Poller, outcome: Tick) -> Result<()> {
    clear_screen()?;
    println!("Notifications (watching, Ctrl-C to stop)\n");

    if poller.notifications().is_empty() {
        println!("  No unread notifications.");
    } else {
        for notification in poller.notifications() {
            print_notification(notification);
        }
    }

    let checked_at = Local::now().format("%H:%M:%S");
    match (outcome, poller.state()) {
        (Tick::Fresh { created }, _) if created > 0 => {
            println!(
                "\n{} unread ({} new) | checked {}",
                poller.unread_count(),
                created,
                checked_at
            );
        }
        (Tick::Fresh { .. }, _) => {
            println!("\n{} unread | checked {}", poller.unread_count(), checked_at);
        }
        (Tick::Failed, PollerState::Error) => {
            let reason = poller.last_error().unwrap_or("poll failed");
            println!("\ncheck failed at {}: {} (will retry)", checked_at, reason);
        }
        (Tick::Failed, _) => {
            println!("\ncheck failed at {} (will retry)", checked_at);
        }
    }
    Ok(())
}
