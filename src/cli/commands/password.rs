use anyhow::Context;
use serde_json::json;

use crate::auth::password::hash_password;
use crate::cli::utils::output_value;
use crate::cli::OutputFormat;

pub async fn handle(password: &str, cost: u32, output_format: OutputFormat) -> anyhow::Result<()> {
    let password = password.to_owned();
    let hash = tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await?
        .with_context(|| format!("Failed to hash password at cost {}", cost))?;

    output_value(&output_format, &hash, json!({ "hash": hash, "cost": cost }))
}
