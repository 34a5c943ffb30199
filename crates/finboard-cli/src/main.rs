use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod bootstrap;
mod commands;
mod logging;
mod render;

#[derive(Parser)]
#[command(name = "finboard")]
#[command(about = "Finboard CLI - financial analysis dashboard client", long_about = None)]
struct Cli {
    /// Path to config.toml (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, overrides config and FINBOARD_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Keep session and records in memory only
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session token
    Login {
        #[arg(long)]
        identifier: String,
        #[arg(long, env = "FINBOARD_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Look up assets by symbol or name
    Search { query: String },
    /// Request a new analysis and cache it
    Analyze {
        symbol: String,
        from: String,
        to: String,
    },
    /// List cached analyses, newest first
    List,
    /// Show one cached analysis (default: newest)
    Show { id: Option<i64> },
    /// List analyses stored on the backend
    Remote,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.api_url.as_deref())?;
    let _log_guard = logging::init(&config)?;
    let app = bootstrap::bootstrap(&config, cli.ephemeral).await?;

    match cli.command {
        Commands::Login {
            identifier,
            password,
        } => commands::auth::login(&app, &identifier, &password).await?,
        Commands::Logout => commands::auth::logout(&app).await?,
        Commands::Whoami => commands::auth::whoami(&app).await,
        Commands::Search { query } => commands::search::run(&app, &query).await?,
        Commands::Analyze { symbol, from, to } => {
            commands::analysis::analyze(&app, &symbol, &from, &to).await?
        }
        Commands::List => commands::analysis::list(&app).await,
        Commands::Show { id } => commands::analysis::show(&app, id).await?,
        Commands::Remote => commands::analysis::remote(&app).await?,
    }

    Ok(())
}
