use clap::Parser;
use leadcmd::api::DEFAULT_BASE_URL;
use leadcmd::cli::{
    run_add, run_edit, run_email, run_list, run_login, run_logout, run_note, run_notifications,
    run_profile, run_settings, run_show, run_users, run_whoami, Cli, Commands,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let api_url = cli
        .api_url
        .or_else(|| std::env::var("LEADCMD_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    match cli.command {
        Commands::Login(args) => run_login(&api_url, args)?,
        Commands::Logout => run_logout()?,
        Commands::Whoami => run_whoami(&api_url)?,
        Commands::List(args) => run_list(&api_url, args)?,
        Commands::Show(args) => run_show(&api_url, args.lead)?,
        Commands::Add(args) => run_add(&api_url, args)?,
        Commands::Edit(args) => run_edit(&api_url, args)?,
        Commands::Note(args) => run_note(&api_url, args)?,
        Commands::Email(args) => run_email(&api_url, args.command)?,
        Commands::Notifications(args) => run_notifications(&api_url, args.command)?,
        Commands::Users(args) => run_users(&api_url, args.command)?,
        Commands::Profile(args) => run_profile(&api_url, args)?,
        Commands::Settings(args) => run_settings(&api_url, args.command)?,
    }

    Ok(())
}
