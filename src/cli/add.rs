//! Create a lead and land on its detail view.

use anyhow::{bail, Result};

use super::display::{print_activity, print_lead};
use super::ui::{is_valid_email, prompt_required, FormResult};
use super::{connect, AddArgs};
use crate::api::NewLead;
use crate::session::Requirement;

pub fn run_add(api_url: &str, args: AddArgs) -> Result<()> {
    let Some(new_lead) = collect(args)? else {
        return Ok(());
    };

    if !is_valid_email(&new_lead.email) {
        bail!("Invalid email address: {}", new_lead.email);
    }

    let (client, _) = connect(api_url, Requirement::SignedIn)?;
    let lead = client.create_lead(&new_lead)?;

    println!("Created lead #{}.\n", lead.id);
    print_lead(&lead);
    match client.activity_feed(lead.id) {
        Ok(feed) => print_activity(&feed),
        Err(e) => super::ui::error(&format!("Activity unavailable: {}", e)),
    }
    Ok(())
}

/// Gather the new lead from flags, prompting for whatever is missing.
/// Returns None if the user cancels a prompt.
fn collect(args: AddArgs) -> Result<Option<NewLead>> {
    let name = match args.name {
        Some(name) => name,
        None => match prompt_required("name")? {
            FormResult::Value(v) => v,
            FormResult::Cancelled => return Ok(None),
        },
    };
    let email = match args.email {
        Some(email) => email,
        None => match prompt_required("email")? {
            FormResult::Value(v) => v,
            FormResult::Cancelled => return Ok(None),
        },
    };
    let company = match args.company {
        Some(company) => company,
        None => match prompt_required("company")? {
            FormResult::Value(v) => v,
            FormResult::Cancelled => return Ok(None),
        },
    };
    let industry = match args.industry {
        Some(industry) => Some(industry),
        None => match super::ui::prompt_optional("industry")? {
            FormResult::Value(v) if v.is_empty() => None,
            FormResult::Value(v) => Some(v),
            FormResult::Cancelled => return Ok(None),
        },
    };

    Ok(Some(NewLead {
        name,
        email,
        company_name: company,
        industry,
    }))
}
