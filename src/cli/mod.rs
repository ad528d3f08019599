pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "catalogctl")]
#[command(about = "catalogctl - Operator tasks for the movie catalog API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Print a bcrypt hash suitable for ADMIN_PASSWORD_HASH")]
    HashPassword {
        #[arg(help = "Plaintext password")]
        password: String,
        #[arg(long, default_value_t = crate::auth::password::DEFAULT_COST, help = "bcrypt cost factor")]
        cost: u32,
    },

    #[command(about = "Admin bearer token management")]
    Token {
        #[command(subcommand)]
        cmd: commands::token::TokenCommands,
    },

    #[command(about = "Catalog database management")]
    Db {
        #[command(subcommand)]
        cmd: commands::db::DbCommands,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
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

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::HashPassword { password, cost } => {
            commands::password::handle(&password, cost, output_format).await
        }
        Commands::Token { cmd } => commands::token::handle(cmd, output_format).await,
        Commands::Db { cmd } => commands::db::handle(cmd, output_format).await,
    }
}
