//! Email log and compose commands for a lead.

use anyhow::{bail, Result};
use chrono::NaiveDateTime;

use super::display::format_timestamp;
use super::edit::parse_follow_up;
use super::ui::{confirm, multiline_input, prompt_required, status, truncate, FormResult};
use super::{connect, EmailCommands};
use crate::api::{ApiClient, NewEmail, OutgoingEmail};
use crate::models::{Direction, ResponseType};
use crate::session::Requirement;

pub fn run_email(api_url: &str, command: EmailCommands) -> Result<()> {
    let (client, _) = connect(api_url, Requirement::SignedIn)?;

    match command {
        EmailCommands::Log {
            lead,
            direction,
            subject,
            content,
            response,
            follow_up,
        } => log_email(&client, lead, &direction, subject, content, response, follow_up),
        EmailCommands::List { lead } => list_emails(&client, lead),
        EmailCommands::Send {
            lead,
            subject,
            content,
            follow_up,
        } => send_email(&client, lead, subject, content, follow_up),
    }
}

fn log_email(
    client: &ApiClient,
    lead_id: i64,
    direction: &str,
    subject: Option<String>,
    content: Option<String>,
    response: Option<String>,
    follow_up: Option<String>,
) -> Result<()> {
    let Some(direction) = Direction::parse(direction) else {
        bail!("Direction must be 'sent' or 'received'.");
    };
    let response_type = match response.as_deref() {
        Some(r) => match ResponseType::parse(r) {
            Some(parsed) => Some(parsed),
            None => bail!(
                "Unknown response type '{}'. One of: positive, negative, follow_up_requested, no_response",
                r
            ),
        },
        None => None,
    };
    let scheduled_follow_up = parse_optional_follow_up(follow_up)?;

    let Some(subject) = required_or_prompt(subject, "subject")? else {
        return Ok(());
    };
    let Some(content) = body_or_prompt(content)? else {
        return Ok(());
    };

    client.log_email(
        lead_id,
        &NewEmail {
            direction,
            subject,
            content,
            response_type,
            scheduled_follow_up,
        },
    )?;
    status("Logged.");
    Ok(())
}

fn list_emails(client: &ApiClient, lead_id: i64) -> Result<()> {
    let emails = client.emails(lead_id)?;
    if emails.is_empty() {
        println!("No emails yet.");
        return Ok(());
    }

    for email in &emails {
        let arrow = match email.direction {
            Direction::Sent => ">",
            Direction::Received => "<",
        };
        let subject = email.subject.as_deref().unwrap_or("(no subject)");
        match email.response_type {
            Some(response) => println!(
                "  {} {}  {} [{}]",
                arrow,
                format_timestamp(email.sent_at),
                truncate(subject, 50),
                response.label()
            ),
            None => println!(
                "  {} {}  {}",
                arrow,
                format_timestamp(email.sent_at),
                truncate(subject, 50)
            ),
        }
    }
    println!("\n{} email(s)", emails.len());
    Ok(())
}

fn send_email(
    client: &ApiClient,
    lead_id: i64,
    subject: Option<String>,
    content: Option<String>,
    follow_up: Option<String>,
) -> Result<()> {
    let scheduled_follow_up = parse_optional_follow_up(follow_up)?;

    // Show who the backend will address before composing.
    let lead = client.lead(lead_id)?;
    println!("To: {} ({})\n", lead.name, lead.email);

    let Some(subject) = required_or_prompt(subject, "subject")? else {
        return Ok(());
    };
    let Some(content) = body_or_prompt(content)? else {
        return Ok(());
    };

    println!("\nSubject: {}", subject);
    for line in content.lines().take(5) {
        println!("  {}", line);
    }
    if content.lines().count() > 5 {
        println!("  ...");
    }

    if !confirm("Send?")? {
        status("Cancelled.");
        return Ok(());
    }

    client.send_email(
        lead_id,
        &OutgoingEmail {
            subject,
            content,
            scheduled_follow_up,
        },
    )?;
    status("Sent.");
    Ok(())
}

fn parse_optional_follow_up(follow_up: Option<String>) -> Result<Option<NaiveDateTime>> {
    follow_up.as_deref().map(parse_follow_up).transpose()
}

fn required_or_prompt(value: Option<String>, field: &str) -> Result<Option<String>> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(Some(v)),
        _ => match prompt_required(field)? {
            FormResult::Value(v) => Ok(Some(v)),
            FormResult::Cancelled => Ok(None),
        },
    }
}

fn body_or_prompt(content: Option<String>) -> Result<Option<String>> {
    match content {
        Some(v) if !v.trim().is_empty() => Ok(Some(v)),
        _ => multiline_input("body:"),
    }
}
