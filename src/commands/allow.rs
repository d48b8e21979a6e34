use crate::commands::build_client;
use crate::commands::result::{AllowResult, CommandResult};
use anyhow::{Context, Result};

/// 再生オリジン制限コマンドを実行する
///
/// # 引数
/// * `resource_url` - 対象のリソースURL
/// * `origins` - 許可するホスト名（1件として送信される）
pub async fn execute(resource_url: &str, origins: &str) -> Result<CommandResult> {
    let client = build_client()?;

    client
        .allow(resource_url, origins)
        .await
        .context("Failed to update allowed origins")?;

    Ok(CommandResult::Allow(AllowResult {
        resource_url: resource_url.to_string(),
        origins: origins.to_string(),
    }))
}
