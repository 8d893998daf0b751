use anyhow::Result;
use clap::{Args, Parser, Subcommand};

pub mod add;
pub mod display;
pub mod edit;
pub mod email;
pub mod list;
pub mod login;
pub mod note;
pub mod notifications;
pub mod settings;
pub mod show;
pub mod ui;
pub mod users;

pub use add::run_add;
pub use edit::run_edit;
pub use email::run_email;
pub use list::run_list;
pub use login::{run_login, run_logout, run_whoami};
pub use note::run_note;
pub use notifications::run_notifications;
pub use settings::run_settings;
pub use show::run_show;
pub use users::{run_profile, run_users};

use crate::api::ApiClient;
use crate::session::{self, Requirement, Session};

/// Build an authenticated client for a protected command, enforcing the
/// capability gate first.
pub(crate) fn connect(api_url: &str, requirement: Requirement) -> Result<(ApiClient, Session)> {
    let session = session::require(requirement)?;
    let client = ApiClient::new(api_url, Some(session.token.clone()))?;
    Ok((client, session))
}

#[derive(Parser)]
#[command(name = "leadcmd")]
#[command(about = "Sales CRM for the command line")]
#[command(version)]
pub struct Cli {
    /// Backend API base URL (defaults to $LEADCMD_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session
    Login(LoginArgs),
    /// Sign out and clear the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List leads with search and filters
    List(ListArgs),
    /// Show a lead's details and activity feed
    Show(ShowArgs),
    /// Add a new lead
    Add(AddArgs),
    /// Edit a lead's fields or status
    Edit(EditArgs),
    /// Add or list notes on a lead
    Note(NoteArgs),
    /// Log, list, or send emails for a lead
    Email(EmailArgs),
    /// View and manage follow-up notifications
    Notifications(NotificationsArgs),
    /// Manage team members (admin)
    Users(UsersArgs),
    /// Update your own profile
    Profile(ProfileArgs),
    /// Manage system settings (admin)
    Settings(SettingsArgs),
}

#[derive(Args)]
pub struct LoginArgs {
    /// Email to sign in with (prompted if omitted)
    #[arg(short, long)]
    pub email: Option<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Match against lead name, email, or company
    #[arg(short, long)]
    pub search: Option<String>,
    /// Filter by status (new, interested, not_interested, no_response,
    /// scheduled, converted, lost)
    #[arg(long)]
    pub status: Option<String>,
    /// Only leads created on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,
    /// Only leads created on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub to: Option<String>,
    /// Filter by assigned user id
    #[arg(long, value_name = "USER_ID")]
    pub assigned_to: Option<i64>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Lead id
    pub lead: i64,
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(short, long)]
    pub name: Option<String>,
    #[arg(short, long)]
    pub email: Option<String>,
    #[arg(short, long)]
    pub company: Option<String>,
    #[arg(short, long)]
    pub industry: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Lead id
    pub lead: i64,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub industry: Option<String>,
    /// New status (any status may replace any other)
    #[arg(long)]
    pub status: Option<String>,
    /// Reassign to a user id (admin)
    #[arg(long, value_name = "USER_ID")]
    pub assign: Option<i64>,
    /// Next follow-up: today, tomorrow, +Nd, +Nw, or YYYY-MM-DD
    #[arg(long, value_name = "DATE")]
    pub follow_up: Option<String>,
}

#[derive(Args)]
pub struct NoteArgs {
    /// Lead id
    pub lead: i64,
    /// Note text (prompted if omitted)
    pub text: Option<String>,
    /// List the lead's notes instead of adding one
    #[arg(short, long)]
    pub list: bool,
}

#[derive(Args)]
pub struct EmailArgs {
    #[command(subcommand)]
    pub command: EmailCommands,
}

#[derive(Subcommand)]
pub enum EmailCommands {
    /// Record an email that was sent or received outside the CRM
    Log {
        /// Lead id
        lead: i64,
        /// sent or received
        #[arg(short, long)]
        direction: String,
        #[arg(short, long)]
        subject: Option<String>,
        #[arg(short, long)]
        content: Option<String>,
        /// How the lead responded (positive, negative,
        /// follow_up_requested, no_response)
        #[arg(short, long)]
        response: Option<String>,
        /// Schedule a follow-up: today, tomorrow, +Nd, +Nw, or YYYY-MM-DD
        #[arg(short, long, value_name = "DATE")]
        follow_up: Option<String>,
    },
    /// List the lead's email log
    List {
        /// Lead id
        lead: i64,
    },
    /// Compose an email and send it through the backend
    Send {
        /// Lead id
        lead: i64,
        #[arg(short, long)]
        subject: Option<String>,
        #[arg(short, long)]
        content: Option<String>,
        /// Schedule a follow-up: today, tomorrow, +Nd, +Nw, or YYYY-MM-DD
        #[arg(short, long, value_name = "DATE")]
        follow_up: Option<String>,
    },
}

#[derive(Args)]
pub struct NotificationsArgs {
    #[command(subcommand)]
    pub command: Option<NotificationCommands>,
}

#[derive(Subcommand)]
pub enum NotificationCommands {
    /// List notifications (default: unread)
    List {
        /// unread, read, dismissed, or all
        #[arg(short, long, default_value = "unread")]
        status: String,
    },
    /// Mark a notification as read
    Read {
        /// Notification id
        id: i64,
    },
    /// Dismiss a notification
    Dismiss {
        /// Notification id
        id: i64,
    },
    /// Run one follow-up check now
    Check,
    /// Poll for follow-ups every minute until Ctrl-C
    Watch,
}

#[derive(Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UserCommands,
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// List all users
    List,
    /// Register a new team member
    Register {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        /// admin or team_member
        #[arg(long)]
        role: Option<String>,
    },
    /// Deactivate or reactivate a user
    Activate {
        /// User id
        id: i64,
        #[arg(long)]
        off: bool,
    },
}

#[derive(Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    /// Scheduling link shown to leads
    #[arg(long, value_name = "URL")]
    pub calendly_link: Option<String>,
    /// Prompt for a new password
    #[arg(long)]
    pub password: bool,
}

#[derive(Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommands,
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show all settings
    Show,
    /// Set one setting
    Set { key: String, value: String },
    /// Seed the default sender settings
    Init,
}
