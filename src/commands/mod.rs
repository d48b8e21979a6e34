pub mod allow;
pub mod code;
pub mod delete;
pub mod help;
pub mod login;
pub mod logout;
pub mod require_signed;
pub mod result;
pub mod status;
pub mod upload;
pub mod whoami;

pub use result::CommandResult;

use crate::api::StreamClient;
use crate::config::UserConfig;
use anyhow::{Context, Result};

/// 設定から認証情報を解決してクライアントを作成する
///
/// 環境変数（CF_STREAM_*）があればそちらを優先する。
pub(crate) fn build_client() -> Result<StreamClient> {
    load_client().map(|(_, client)| client)
}

/// クライアントと、読み込んだユーザー設定を合わせて返す
pub(crate) fn load_client() -> Result<(UserConfig, StreamClient)> {
    let user_config = UserConfig::load()
        .context("Failed to load user configuration. Please check your config.toml file.")?;

    let auth = user_config
        .resolve_auth()
        .context("Authentication credentials not found. Please run 'cfstream login' first.")?;

    let client =
        StreamClient::from_config(&auth).context("Failed to create Cloudflare Stream client")?;
    Ok((user_config, client))
}
