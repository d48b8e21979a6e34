use crate::commands::build_client;
use crate::commands::result::{CodeResult, CommandResult};
use anyhow::{Context, Result};

/// 埋め込みコード取得コマンドを実行する
pub async fn execute(resource_url: &str) -> Result<CommandResult> {
    let client = build_client()?;

    let html = client
        .code(resource_url)
        .await
        .context("Failed to fetch embed code")?;

    Ok(CommandResult::Code(CodeResult {
        resource_url: resource_url.to_string(),
        html,
    }))
}
