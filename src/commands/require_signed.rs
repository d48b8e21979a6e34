use crate::commands::build_client;
use crate::commands::result::{CommandResult, RequireSignedResult};
use anyhow::{Context, Result};

/// 署名付きURL必須化コマンドを実行する
pub async fn execute(resource_url: &str) -> Result<CommandResult> {
    let client = build_client()?;

    client
        .require_signed_urls(resource_url)
        .await
        .context("Failed to require signed URLs")?;

    Ok(CommandResult::RequireSigned(RequireSignedResult {
        resource_url: resource_url.to_string(),
    }))
}
