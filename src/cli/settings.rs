//! System settings commands. The backend gates all of these to admins.

use std::collections::BTreeMap;

use anyhow::Result;

use super::ui::status;
use super::{connect, SettingsCommands};
use crate::session::Requirement;

pub fn run_settings(api_url: &str, command: SettingsCommands) -> Result<()> {
    let (client, _) = connect(api_url, Requirement::Admin)?;

    match command {
        SettingsCommands::Show => {
            let settings = client.settings()?;
            if settings.is_empty() {
                println!("No settings. Run: leadcmd settings init");
                return Ok(());
            }
            for setting in &settings {
                let value = setting.value.as_deref().unwrap_or("(not set)");
                println!("  {} = {}", setting.key, value);
                if let Some(ref description) = setting.description {
                    println!("      {}", description);
                }
            }
            Ok(())
        }
        SettingsCommands::Set { key, value } => {
            let mut values = BTreeMap::new();
            values.insert(key.clone(), value);
            client.update_settings(&values)?;
            status(&format!("{} updated.", key));
            Ok(())
        }
        SettingsCommands::Init => {
            let created = client.initialize_settings()?;
            if created.is_empty() {
                status("Defaults already present.");
            } else {
                for setting in &created {
                    println!("  created {}", setting.key);
                }
            }
            Ok(())
        }
    }
}
