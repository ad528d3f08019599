use anyhow::Context;
use clap::Subcommand;
use serde_json::json;

use crate::auth::token::ttl_from_minutes;
use crate::auth::{TokenService, ADMIN_SUBJECT};
use crate::cli::utils::output_value;
use crate::cli::OutputFormat;
use crate::config::AppConfig;

#[derive(Subcommand)]
pub enum TokenCommands {
    #[command(about = "Issue an admin bearer token signed with JWT_SECRET")]
    Issue {
        #[arg(long, help = "Lifetime in minutes (defaults to JWT_EXPIRY_MINUTES)")]
        minutes: Option<i64>,
    },
}

pub async fn handle(cmd: TokenCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        TokenCommands::Issue { minutes } => {
            let config = AppConfig::from_env();
            let tokens = TokenService::from_config(&config.security)?;
            let ttl = match minutes {
                Some(minutes) => ttl_from_minutes(minutes)
                    .with_context(|| format!("--minutes {} is not a usable token lifetime", minutes))?,
                None => tokens.ttl(),
            };

            let token = tokens
                .issue_with_ttl(ADMIN_SUBJECT, ttl)
                .context("Failed to sign admin token")?;

            output_value(
                &output_format,
                &token,
                json!({
                    "access_token": token,
                    "token_type": "bearer",
                    "expires_in": ttl.num_seconds(),
                }),
            )
        }
    }
}
