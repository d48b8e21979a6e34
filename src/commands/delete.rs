use crate::commands::build_client;
use crate::commands::result::{CommandResult, DeleteResult};
use crate::presentation::input;
use anyhow::{Context, Result};

/// 削除コマンドを実行する
///
/// # 引数
/// * `resource_url` - 削除対象のリソースURL
/// * `force` - trueなら確認プロンプトを出さない
pub async fn execute(resource_url: &str, force: bool) -> Result<CommandResult> {
    let client = build_client()?;

    if !force && !input::confirm(&format!("Delete video {}?", resource_url))? {
        return Ok(CommandResult::Delete(DeleteResult {
            resource_url: resource_url.to_string(),
            deleted: false,
        }));
    }

    client
        .delete(resource_url)
        .await
        .with_context(|| format!("Failed to delete video {}", resource_url))?;

    Ok(CommandResult::Delete(DeleteResult {
        resource_url: resource_url.to_string(),
        deleted: true,
    }))
}
