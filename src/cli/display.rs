//! Plain-text rendering for leads, activity feeds, and notifications.

use chrono::{DateTime, Datelike, Local, NaiveDateTime, TimeZone, Timelike, Utc};

use super::ui::truncate;
use crate::models::{Activity, Direction, EmailLog, Lead, Note, Notification};

/// Print a full lead with clean formatting (only non-empty fields).
pub fn print_lead(lead: &Lead) {
    println!("{}  [#{}]\n", lead.name, lead.id);
    println!("  {}", lead.email);

    match &lead.industry {
        Some(industry) if !industry.is_empty() => {
            println!("  {} ({})", lead.company_name, industry);
        }
        _ => println!("  {}", lead.company_name),
    }

    println!("  Status: {}", lead.status.label());

    if let Some(user_id) = lead.assigned_to {
        println!("  Assigned to: user #{}", user_id);
    }
    if let Some(last_contact) = lead.last_contact_date {
        println!("  Last contact: {}", format_timestamp(last_contact));
    }
    if let Some(follow_up) = lead.next_follow_up {
        println!("  Next follow-up: {}", format_timestamp(follow_up));
    }
    if let Some(ref link) = lead.calendly_link {
        if !link.is_empty() {
            println!("  Scheduling: {}", link);
        }
    }
}

/// Print the merged activity feed, or the explicit empty state.
pub fn print_activity(feed: &[Activity]) {
    println!("\nActivity ({})", feed.len());

    if feed.is_empty() {
        println!("  No activity yet.");
        return;
    }

    for activity in feed {
        println!(
            "  {}  {}",
            format_timestamp(activity.timestamp()),
            activity_line(activity)
        );
    }
}

/// One-line summary for a feed entry, dispatched over the closed variant
/// set.
pub fn activity_line(activity: &Activity) -> String {
    match activity {
        Activity::Note(note) => note_line(note),
        Activity::Email(email) => email_line(email),
    }
}

fn note_line(note: &Note) -> String {
    let first_line = note.content.lines().next().unwrap_or("");
    format!("note   {}", truncate(first_line, 60))
}

fn email_line(email: &EmailLog) -> String {
    let verb = match email.direction {
        Direction::Sent => "email  sent",
        Direction::Received => "email  received",
    };
    let subject = email.subject.as_deref().unwrap_or("(no subject)");
    match email.response_type {
        Some(response) => format!("{}: {} [{}]", verb, truncate(subject, 50), response.label()),
        None => format!("{}: {}", verb, truncate(subject, 50)),
    }
}

/// Print one notification row; unread rows get a marker.
pub fn print_notification(notification: &Notification) {
    let marker = if notification.is_unread() { "*" } else { " " };
    println!(
        "  {} [{}] {}  ({})",
        marker,
        notification.id,
        notification.title,
        format_timestamp(notification.created_at)
    );
    println!("       {}", truncate(&notification.message, 70));
}

/// Format a server timestamp (naive UTC) for display in local time.
pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    let local = Utc.from_utc_datetime(&timestamp).with_timezone(&Local);
    format_local(local)
}

fn format_local(date: DateTime<Local>) -> String {
    let now = Local::now();
    let today = now.date_naive();
    let day = date.date_naive();

    let (pm, hour) = date.hour12();
    let clock = format!("{}:{:02}{}", hour, date.minute(), if pm { "pm" } else { "am" });

    if day == today {
        format!("Today at {}", clock)
    } else if Some(day) == today.pred_opt() {
        format!("Yesterday at {}", clock)
    } else if date.year() == now.year() {
        format!("{} {} at {}", month_abbrev(date.month()), date.day(), clock)
    } else {
        format!(
            "{} {}, {} at {}",
            month_abbrev(date.month()),
            date.day(),
            date.year(),
            clock
        )
    }
}

fn month_abbrev(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "?",
    }
}
