/// whoami コマンド
///
/// どの認証情報が使われるか（環境変数か設定ファイルか）と、
/// そのメールアドレス・マスク済みキー・スコープを表示します。
use crate::api::auth::Credentials;
use crate::commands::login::describe_scope;
use crate::commands::result::{CommandResult, CredentialSource, WhoamiResult};
use crate::config::{AuthConfig, UserConfig};
use anyhow::{Context, Result};

pub async fn execute() -> Result<CommandResult> {
    let config = UserConfig::load().context("Failed to load configuration file")?;

    let resolved = match AuthConfig::from_env() {
        Some(auth) => Some((auth, CredentialSource::Environment)),
        None => config
            .auth
            .clone()
            .map(|auth| (auth, CredentialSource::ConfigFile)),
    };

    let Some((auth, source)) = resolved else {
        return Ok(CommandResult::Whoami(WhoamiResult {
            is_configured: false,
            source: None,
            email: None,
            key: None,
            scope: None,
        }));
    };

    let credentials =
        Credentials::from_config(&auth).context("Stored credentials are incomplete")?;

    Ok(CommandResult::Whoami(WhoamiResult {
        is_configured: true,
        source: Some(source),
        email: Some(credentials.email().to_string()),
        key: Some(credentials.masked_key()),
        scope: Some(describe_scope(credentials.scope())),
    }))
}
