//! Lead list with server-side search and filters.

use anyhow::{bail, Result};
use chrono::NaiveDate;

use super::display::format_timestamp;
use super::ui::truncate;
use super::{connect, ListArgs};
use crate::api::LeadQuery;
use crate::models::{Lead, LeadStatus};
use crate::session::Requirement;

pub fn run_list(api_url: &str, args: ListArgs) -> Result<()> {
    let query = build_query(&args)?;
    let (client, _) = connect(api_url, Requirement::SignedIn)?;
    let leads = client.leads(&query)?;

    if leads.is_empty() {
        println!("No leads found.");
        return Ok(());
    }

    print_table(&leads);
    println!("\n{} lead(s)", leads.len());
    Ok(())
}

fn build_query(args: &ListArgs) -> Result<LeadQuery> {
    let status = match args.status.as_deref() {
        Some(s) => match LeadStatus::parse(s) {
            Some(status) => Some(status),
            None => bail!(
                "Unknown status '{}'. One of: {}",
                s,
                status_names().join(", ")
            ),
        },
        None => None,
    };

    // The backend applies the date range only when both ends are present.
    let start_date = args.from.as_deref().map(parse_day).transpose()?;
    let end_date = args.to.as_deref().map(parse_day).transpose()?;
    if start_date.is_some() != end_date.is_some() {
        bail!("Date filtering needs both --from and --to.");
    }

    Ok(LeadQuery {
        search: args.search.clone(),
        status,
        start_date,
        end_date,
        assigned_to: args.assigned_to,
    })
}

fn parse_day(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid date '{}'. Use YYYY-MM-DD.", s))
}

fn status_names() -> Vec<&'static str> {
    LeadStatus::ALL.iter().map(LeadStatus::as_str).collect()
}

fn print_table(leads: &[Lead]) {
    println!(
        "{:>5}  {:<24} {:<18} {:<14} {}",
        "ID", "NAME", "COMPANY", "STATUS", "NEXT FOLLOW-UP"
    );
    for lead in leads {
        let follow_up = lead
            .next_follow_up
            .map(format_timestamp)
            .unwrap_or_default();
        println!(
            "{:>5}  {:<24} {:<18} {:<14} {}",
            lead.id,
            truncate(&lead.name, 24),
            truncate(&lead.company_name, 18),
            lead.status.label(),
            follow_up
        );
    }
}
