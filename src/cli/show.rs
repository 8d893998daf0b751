//! Lead detail: the record itself plus the merged activity feed.

use anyhow::Result;

use super::display::{print_activity, print_lead};
use super::ui::error;
use super::connect;
use crate::session::Requirement;

pub fn run_show(api_url: &str, lead_id: i64) -> Result<()> {
    let (client, _) = connect(api_url, Requirement::SignedIn)?;
    let lead = client.lead(lead_id)?;

    print_lead(&lead);

    // The feed is all-or-nothing: if either half failed to load, report
    // one failure instead of a misleading partial timeline.
    match client.activity_feed(lead_id) {
        Ok(feed) => print_activity(&feed),
        Err(e) => error(&format!("Activity unavailable: {}", e)),
    }

    Ok(())
}
