use clap::{Parser, Subcommand};
use petdimen_admin::{
    AppConfig, Console, Env, HistoryNavigator, NavigatorState, admin, models::UserQuery,
    routes::admin::DASHBOARD_ROUTE,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line front end for the moderation console.
#[derive(Parser)]
#[command(name = "petdimen-admin", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and persist the session.
    Login { username: String, password: String },
    /// Clear the persisted session.
    Logout,
    /// Show the restored session.
    Status,
    /// Navigate to a console path through the route guard.
    Open { path: String },
    /// Fetch the dashboard counters.
    Dashboard,
    /// List user accounts.
    Users {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        size: Option<u32>,
        #[arg(long)]
        keyword: Option<String>,
    },
}

/// main
///
/// Loads configuration, installs logging, restores the session from durable storage
/// and runs one command.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "petdimen_admin=info".into());

    // Logs go to stderr so command output stays pipeable.
    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
    }

    tracing::debug!(api_base = %config.api_base, storage = %config.storage_path.display(), "configuration loaded");

    let cli = Cli::parse();
    let navigator: NavigatorState = Arc::new(HistoryNavigator::new("/"));
    let console = Console::open(config, navigator)?;

    match cli.command {
        Command::Login { username, password } => {
            // Start from the login page so resume lands on the dashboard.
            console.navigate(petdimen_admin::routes::public::LOGIN_PATH)?;
            let location = console.login(&username, &password).await?;
            let admin = console.session.is_admin();
            println!("signed in as {username} (admin: {admin})");
            println!("landed on {}", location.full_path);
        }
        Command::Logout => {
            console.logout()?;
            println!("signed out");
        }
        Command::Status => {
            let state = console.session.snapshot();
            match state.profile {
                Some(profile) => println!(
                    "signed in as {} ({}), user id {}, admin: {}",
                    profile.username, profile.nickname, profile.user_id, state.is_admin
                ),
                None if state.is_authenticated() => {
                    println!("credential present, profile unavailable, admin: {}", state.is_admin)
                }
                None => println!("not signed in"),
            }
        }
        Command::Open { path } => {
            let location = console.navigate(&path)?;
            println!("{} -> {}", path, location.full_path);
        }
        Command::Dashboard => {
            let location = console.navigate("/")?;
            if location.name != Some(DASHBOARD_ROUTE) {
                anyhow::bail!("dashboard requires an admin session (redirected to {})", location.full_path);
            }
            let dashboard = admin::get_dashboard(&console.client).await?;
            println!("{}", serde_json::to_string_pretty(&dashboard)?);
        }
        Command::Users { page, size, keyword } => {
            let query = UserQuery {
                page,
                size,
                keyword,
                status: None,
            };
            let users = admin::get_users(&console.client, &query).await?;
            println!("{}", serde_json::to_string_pretty(&users)?);
        }
    }

    Ok(())
}
