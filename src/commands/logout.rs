/// ログアウトコマンド
///
/// 保存されている認証情報を削除します。
/// 環境変数の認証情報には影響しません。
use crate::commands::result::{CommandResult, LogoutResult};
use crate::config::UserConfig;
use anyhow::{Context, Result};

pub async fn execute() -> Result<CommandResult> {
    let mut config = UserConfig::load().context("Failed to load configuration file")?;

    if !config.has_auth() {
        return Ok(CommandResult::Logout(LogoutResult {
            was_logged_in: false,
        }));
    }

    config.clear_auth();
    config.save().context("Failed to save configuration file")?;

    Ok(CommandResult::Logout(LogoutResult { was_logged_in: true }))
}
