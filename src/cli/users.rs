//! Team management (admin) and profile self-service.

use anyhow::{bail, Result};
use inquire::{Password, PasswordDisplayMode};

use super::display::format_timestamp;
use super::ui::{is_valid_email, minimal_render_config, prompt_field, prompt_required, status, FormResult};
use super::{connect, ProfileArgs, UserCommands};
use crate::api::{ApiClient, RegisterRequest, UserUpdate};
use crate::models::{Role, User};
use crate::session::{Requirement, Session};

pub fn run_users(api_url: &str, command: UserCommands) -> Result<()> {
    let (client, _) = connect(api_url, Requirement::Admin)?;

    match command {
        UserCommands::List => list(&client),
        UserCommands::Register {
            email,
            first_name,
            last_name,
            role,
        } => register(&client, email, first_name, last_name, role),
        UserCommands::Activate { id, off } => {
            let update = UserUpdate {
                is_active: Some(!off),
                ..UserUpdate::default()
            };
            let user = client.update_user(id, &update)?;
            status(&format!(
                "{} is now {}.",
                user.full_name(),
                if user.is_active { "active" } else { "inactive" }
            ));
            Ok(())
        }
    }
}

fn list(client: &ApiClient) -> Result<()> {
    let users = client.users()?;

    println!("{:>4}  {:<22} {:<28} {:<12} {}", "ID", "NAME", "EMAIL", "ROLE", "LAST LOGIN");
    for user in &users {
        let last_login = user.last_login.map(format_timestamp).unwrap_or_default();
        let name = if user.is_active {
            user.full_name()
        } else {
            format!("{} (inactive)", user.full_name())
        };
        println!(
            "{:>4}  {:<22} {:<28} {:<12} {}",
            user.id,
            name,
            user.email,
            user.role.as_str(),
            last_login
        );
    }
    println!("\n{} user(s)", users.len());
    Ok(())
}

fn register(
    client: &ApiClient,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    role: Option<String>,
) -> Result<()> {
    let Some(email) = value_or_prompt(email, "email")? else {
        return Ok(());
    };
    if !is_valid_email(&email) {
        bail!("Invalid email address: {}", email);
    }
    let Some(first_name) = value_or_prompt(first_name, "first name")? else {
        return Ok(());
    };
    let Some(last_name) = value_or_prompt(last_name, "last name")? else {
        return Ok(());
    };

    let role = match role {
        Some(ref r) => match Role::parse(r) {
            Some(role) => role,
            None => bail!("Role must be 'admin' or 'team_member'."),
        },
        None => Role::TeamMember,
    };

    let Some(password) = prompt_password(true)? else {
        return Ok(());
    };

    let user = client.register(&RegisterRequest {
        email,
        password,
        first_name,
        last_name,
        role,
    })?;
    status(&format!(
        "Registered {} ({}).",
        user.full_name(),
        user.role.as_str()
    ));
    Ok(())
}

/// Update the signed-in user's own record.
pub fn run_profile(api_url: &str, args: ProfileArgs) -> Result<()> {
    let (client, session) = connect(api_url, Requirement::SignedIn)?;
    let current = client.current_user()?;

    let update = if args.first_name.is_some()
        || args.last_name.is_some()
        || args.calendly_link.is_some()
        || args.password
    {
        let password = if args.password {
            match prompt_password(true)? {
                Some(password) => Some(password),
                None => return Ok(()),
            }
        } else {
            None
        };
        UserUpdate {
            first_name: args.first_name,
            last_name: args.last_name,
            password,
            calendly_link: args.calendly_link,
            ..UserUpdate::default()
        }
    } else {
        match interactive(&current)? {
            Some(update) => update,
            None => return Ok(()),
        }
    };

    let user = client.update_user(current.id, &update)?;
    // Keep the stored session's user record in step with the server.
    Session::new(session.token, user.clone()).save()?;
    status(&format!("Updated profile for {}.", user.full_name()));
    Ok(())
}

fn interactive(current: &User) -> Result<Option<UserUpdate>> {
    let mut update = UserUpdate::default();

    match prompt_field("first name", Some(&current.first_name))? {
        FormResult::Value(v) if v != current.first_name => update.first_name = Some(v),
        FormResult::Value(_) => {}
        FormResult::Cancelled => return Ok(None),
    }
    match prompt_field("last name", Some(&current.last_name))? {
        FormResult::Value(v) if v != current.last_name => update.last_name = Some(v),
        FormResult::Value(_) => {}
        FormResult::Cancelled => return Ok(None),
    }
    match prompt_field("scheduling link", current.calendly_link.as_deref())? {
        FormResult::Value(v) if current.calendly_link.as_deref() != Some(v.as_str()) => {
            update.calendly_link = Some(v)
        }
        FormResult::Value(_) => {}
        FormResult::Cancelled => return Ok(None),
    }

    match prompt_password(false)? {
        Some(password) if !password.is_empty() => update.password = Some(password),
        Some(_) => {}
        None => return Ok(None),
    }

    Ok(Some(update))
}

fn value_or_prompt(value: Option<String>, field: &str) -> Result<Option<String>> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(Some(v)),
        _ => match prompt_required(field)? {
            FormResult::Value(v) => Ok(Some(v)),
            FormResult::Cancelled => Ok(None),
        },
    }
}

/// Prompt for a password with confirmation. When `required` is false an
/// empty entry means "keep the current one".
fn prompt_password(required: bool) -> Result<Option<String>> {
    let prompt = if required {
        "password: "
    } else {
        "new password (empty keeps current): "
    };
    let mut builder = Password::new(prompt)
        .with_render_config(minimal_render_config())
        .with_display_mode(PasswordDisplayMode::Hidden);
    if !required {
        builder = builder.without_confirmation();
    }

    match builder.prompt_skippable()? {
        Some(password) if required && password.is_empty() => {
            bail!("Password must not be empty.")
        }
        Some(password) => Ok(Some(password)),
        None => Ok(None),
    }
}
