/// ログインコマンド
///
/// Cloudflare の API キー・メールアドレス・アカウント/ゾーンIDを検証し、
/// config.toml に保存します。
use crate::api::auth::{Credentials, Scope};
use crate::commands::result::{CommandResult, LoginResult};
use crate::config::{AuthConfig, UserConfig};
use anyhow::{Context, Result};

/// ログイン時に入力された認証情報
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    pub key: String,
    pub email: String,
    pub account: String,
    pub zone: String,
}

/// ログインコマンドを実行
///
/// 認証情報の形式だけを検証し、リモートへの問い合わせは行わない。
pub async fn execute(input: LoginCredentials) -> Result<CommandResult> {
    let credentials = Credentials::new(
        input.key.as_str(),
        input.email.as_str(),
        input.account.as_str(),
        input.zone.as_str(),
    )
    .context("The provided credentials are incomplete")?;

    let scope = describe_scope(credentials.scope());

    let mut config = UserConfig::load().context("Failed to load configuration file")?;
    let was_logged_in = config.has_auth();

    config.set_auth(AuthConfig {
        key: input.key.trim().to_string(),
        email: input.email.trim().to_string(),
        account: input.account.trim().to_string(),
        zone: input.zone.trim().to_string(),
    });

    config.save().context("Failed to save configuration file")?;

    Ok(CommandResult::Login(LoginResult {
        was_logged_in,
        scope,
    }))
}

/// スコープを表示用文字列に変換
pub fn describe_scope(scope: Scope<'_>) -> String {
    match scope {
        Scope::Account(id) => format!("account {}", id),
        Scope::Zone(id) => format!("zone {}", id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_scope() {
        assert_eq!(describe_scope(Scope::Account("acct1")), "account acct1");
        assert_eq!(describe_scope(Scope::Zone("zone1")), "zone zone1");
    }

    #[tokio::test]
    async fn test_login_rejects_incomplete_credentials() {
        // 検証は設定ファイルに触れる前に行われる
        let result = execute(LoginCredentials {
            key: "k".to_string(),
            email: "e@x.com".to_string(),
            account: String::new(),
            zone: String::new(),
        })
        .await;

        let err = result.expect_err("missing scope must be rejected");
        assert!(err.chain().any(|cause| cause
            .downcast_ref::<crate::api::StreamError>()
            .is_some_and(|e| matches!(e, crate::api::StreamError::InvalidCredentials { .. }))));
    }
}
