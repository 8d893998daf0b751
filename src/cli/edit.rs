//! Edit a lead's fields, status, assignment, or follow-up date.

use anyhow::{bail, Result};
use chrono::{Duration, Local, NaiveDate, NaiveDateTime};

use super::display::print_lead;
use super::ui::{is_valid_email, prompt_field, status, FormResult};
use super::{connect, EditArgs};
use crate::api::LeadUpdate;
use crate::models::{Lead, LeadStatus};
use crate::session::Requirement;

pub fn run_edit(api_url: &str, args: EditArgs) -> Result<()> {
    let (client, _) = connect(api_url, Requirement::SignedIn)?;
    let lead_id = args.lead;

    let update = if has_field_flags(&args) {
        from_flags(args)?
    } else {
        let current = client.lead(lead_id)?;
        match interactive(&current)? {
            Some(update) => update,
            None => return Ok(()),
        }
    };

    if update.is_empty() {
        status("Nothing to update.");
        return Ok(());
    }
    if let Some(ref email) = update.email {
        if !is_valid_email(email) {
            bail!("Invalid email address: {}", email);
        }
    }

    let lead = client.update_lead(lead_id, &update)?;
    status("Updated.\n");
    print_lead(&lead);
    Ok(())
}

fn has_field_flags(args: &EditArgs) -> bool {
    args.name.is_some()
        || args.email.is_some()
        || args.company.is_some()
        || args.industry.is_some()
        || args.status.is_some()
        || args.assign.is_some()
        || args.follow_up.is_some()
}

fn from_flags(args: EditArgs) -> Result<LeadUpdate> {
    let status = args
        .status
        .as_deref()
        .map(parse_status)
        .transpose()?;
    let next_follow_up = args
        .follow_up
        .as_deref()
        .map(parse_follow_up)
        .transpose()?;

    Ok(LeadUpdate {
        name: args.name,
        email: args.email,
        company_name: args.company,
        industry: args.industry,
        status,
        assigned_to: args.assign,
        next_follow_up,
    })
}

/// Walk the editable fields, keeping whatever the user leaves untouched.
/// Returns None if a prompt is cancelled.
fn interactive(current: &Lead) -> Result<Option<LeadUpdate>> {
    let mut update = LeadUpdate::default();

    let fields: [(&str, &str, fn(&mut LeadUpdate, String)); 4] = [
        ("name", current.name.as_str(), |u, v| u.name = Some(v)),
        ("email", current.email.as_str(), |u, v| u.email = Some(v)),
        ("company", current.company_name.as_str(), |u, v| {
            u.company_name = Some(v)
        }),
        (
            "industry",
            current.industry.as_deref().unwrap_or(""),
            |u, v| u.industry = Some(v),
        ),
    ];

    for (label, value, apply) in fields {
        match prompt_field(label, Some(value))? {
            FormResult::Value(input) if input != value => apply(&mut update, input),
            FormResult::Value(_) => {}
            FormResult::Cancelled => return Ok(None),
        }
    }

    match prompt_field("status", Some(current.status.as_str()))? {
        FormResult::Value(input) if input != current.status.as_str() => {
            update.status = Some(parse_status(&input)?);
        }
        FormResult::Value(_) => {}
        FormResult::Cancelled => return Ok(None),
    }

    match prompt_field("follow-up (today, +3d, +1w, YYYY-MM-DD)", None)? {
        FormResult::Value(input) if !input.is_empty() => {
            update.next_follow_up = Some(parse_follow_up(&input)?);
        }
        FormResult::Value(_) => {}
        FormResult::Cancelled => return Ok(None),
    }

    Ok(Some(update))
}

fn parse_status(s: &str) -> Result<LeadStatus> {
    LeadStatus::parse(s).ok_or_else(|| {
        let names: Vec<&str> = LeadStatus::ALL.iter().map(LeadStatus::as_str).collect();
        anyhow::anyhow!("Unknown status '{}'. One of: {}", s, names.join(", "))
    })
}

/// Parse a follow-up date: "today", "tomorrow", "+Nd" (days), "+Nw"
/// (weeks), or YYYY-MM-DD. Follow-ups land at 9am.
pub(crate) fn parse_follow_up(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim().to_lowercase();
    let today = Local::now().date_naive();

    let date = match s.as_str() {
        "today" => today,
        "tomorrow" => today + Duration::days(1),
        _ if s.starts_with('+') => {
            let (n, days_per_unit) = parse_relative(&s[1..])?;
            today + Duration::days(n * days_per_unit)
        }
        _ => NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| {
            anyhow::anyhow!("Invalid date. Use: today, tomorrow, +3d, +1w, or YYYY-MM-DD")
        })?,
    };

    date.and_hms_opt(9, 0, 0)
        .ok_or_else(|| anyhow::anyhow!("Invalid datetime"))
}

/// Parse a relative suffix like "3d" or "2w". Returns (number,
/// days_per_unit).
fn parse_relative(s: &str) -> Result<(i64, i64)> {
    let (num_str, multiplier) = match s.chars().last() {
        Some('d') => (&s[..s.len() - 1], 1),
        Some('w') => (&s[..s.len() - 1], 7),
        _ => bail!("Use +Nd or +Nw (e.g., +3d, +1w)"),
    };
    let n: i64 = num_str
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid number: {}", num_str))?;
    if n < 0 {
        bail!("Number must be positive");
    }
    Ok((n, multiplier))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_follow_up_keywords() {
        let today = Local::now().date_naive();
        assert_eq!(parse_follow_up("today").unwrap().date(), today);
        assert_eq!(
            parse_follow_up("tomorrow").unwrap().date(),
            today + Duration::days(1)
        );
    }

    #[test]
    fn test_parse_follow_up_relative() {
        let today = Local::now().date_naive();
        assert_eq!(
            parse_follow_up("+3d").unwrap().date(),
            today + Duration::days(3)
        );
        assert_eq!(
            parse_follow_up("+2w").unwrap().date(),
            today + Duration::days(14)
        );
    }

    #[test]
    fn test_parse_follow_up_absolute() {
        let parsed = parse_follow_up("2024-06-01").unwrap();
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(parsed.time().to_string(), "09:00:00");
    }

    #[test]
    fn test_parse_follow_up_rejects_junk() {
        assert!(parse_follow_up("next week").is_err());
        assert!(parse_follow_up("+3x").is_err());
        assert!(parse_follow_up("06/01/2024").is_err());
    }

    #[test]
    fn test_parse_status_is_strict() {
        assert!(parse_status("interested").is_ok());
        assert!(parse_status("warm").is_err());
    }
}
