//! Sign-in, sign-out, and identity commands.

use anyhow::Result;
use inquire::{Password, PasswordDisplayMode, Text};

use super::ui::{error, minimal_render_config, status};
use super::{connect, LoginArgs};
use crate::api::ApiClient;
use crate::session::{Requirement, Session};

pub fn run_login(api_url: &str, args: LoginArgs) -> Result<()> {
    let email = match args.email {
        Some(email) => email,
        None => {
            let input = Text::new("email: ")
                .with_render_config(minimal_render_config())
                .prompt_skippable()?;
            match input {
                Some(email) if !email.trim().is_empty() => email.trim().to_string(),
                _ => return Ok(()),
            }
        }
    };

    let password = Password::new("password: ")
        .with_render_config(minimal_render_config())
        .with_display_mode(PasswordDisplayMode::Hidden)
        .without_confirmation()
        .prompt_skippable()?;
    let Some(password) = password else {
        return Ok(());
    };

    let client = ApiClient::new(api_url, None)?;
    match client.login(&email, &password) {
        Ok(response) => {
            let session = Session::new(response.token, response.user);
            session.save()?;
            status(&format!(
                "Signed in as {} ({}).",
                session.user.full_name(),
                session.user.role.as_str()
            ));
        }
        Err(e) => error(&e.to_string()),
    }

    Ok(())
}

pub fn run_logout() -> Result<()> {
    Session::clear()?;
    status("Signed out.");
    Ok(())
}

/// Verify the stored token against the backend and print who it belongs
/// to.
pub fn run_whoami(api_url: &str) -> Result<()> {
    let (client, _) = connect(api_url, Requirement::SignedIn)?;
    let user = client.current_user()?;

    println!("{}  <{}>", user.full_name(), user.email);
    println!("  Role: {}", user.role.as_str());
    if let Some(ref link) = user.calendly_link {
        if !link.is_empty() {
            println!("  Scheduling: {}", link);
        }
    }
    Ok(())
}
