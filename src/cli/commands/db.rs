use clap::Subcommand;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::{schema, DatabaseManager};

#[derive(Subcommand)]
pub enum DbCommands {
    #[command(about = "Create the movies table and its index if missing")]
    Init,
}

pub async fn handle(cmd: DbCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        DbCommands::Init => {
            let config = AppConfig::from_env();
            let manager = DatabaseManager::connect_lazy(&config.database)?;
            let result = schema::ensure_schema(manager.pool()).await;
            manager.close().await;
            result?;

            output_success(&output_format, "Catalog schema initialized")
        }
    }
}
