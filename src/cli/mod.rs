pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use sqlx::PgPool;

use crate::config::{self, AppConfig};
use crate::database::DatabaseManager;

#[derive(Parser)]
#[command(name = "assetdesk")]
#[command(about = "Asset Desk admin CLI - migrations, bootstrap and health checks")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Apply pending database migrations")]
    Migrate,

    #[command(about = "User account management")]
    User {
        #[command(subcommand)]
        cmd: commands::user::UserCommands,
    },

    #[command(about = "Check database connectivity")]
    Health,
}

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Pool for one CLI invocation, built from the same config as the server
pub(crate) fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    Ok(DatabaseManager::build_pool(&config.database)?)
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = config::config();

    match cli.command {
        Commands::Migrate => commands::migrate::handle(config, output_format).await,
        Commands::User { cmd } => commands::user::handle(cmd, config, output_format).await,
        Commands::Health => commands::health::handle(config, output_format).await,
    }
}
