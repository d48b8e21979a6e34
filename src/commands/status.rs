use crate::commands::load_client;
use crate::commands::result::{CommandResult, VideoStatusResult};
use anyhow::{Context, Result};

/// 動画の状態を取得するコマンドを実行する
///
/// # 引数
/// * `resource_url` - アップロード時に返されたリソースURL
pub async fn execute(resource_url: &str) -> Result<CommandResult> {
    let (user_config, client) = load_client()?;

    let data = client
        .status(resource_url)
        .await
        .context("Failed to fetch video status")?;

    Ok(CommandResult::Status(VideoStatusResult {
        resource_url: resource_url.to_string(),
        data,
        timezone_offset_seconds: user_config.timezone_offset_seconds,
    }))
}
