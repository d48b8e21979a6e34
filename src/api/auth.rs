/// 認証情報
///
/// Cloudflare API の X-Auth-Key / X-Auth-Email 認証を管理します。
/// 構築時に一度だけ検証され、以後は変更されません。
use crate::api::error::{StreamError, StreamResult};
use crate::config::AuthConfig;
use reqwest::RequestBuilder;

pub const AUTH_KEY_HEADER: &str = "X-Auth-Key";
pub const AUTH_EMAIL_HEADER: &str = "X-Auth-Email";

/// エンドポイントのスコープ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope<'a> {
    Account(&'a str),
    Zone(&'a str),
}

impl Scope<'_> {
    /// スコープ付きのメディアエンドポイントURLを構築
    pub fn media_url(&self, base_url: &str) -> String {
        let base_url = base_url.trim_end_matches('/');
        match self {
            Scope::Account(id) => format!("{}/accounts/{}/media", base_url, id),
            Scope::Zone(id) => format!("{}/zones/{}/media", base_url, id),
        }
    }
}

/// 検証済みの認証情報
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    key: String,
    email: String,
    account: String,
    zone: String,
}

impl Credentials {
    /// 認証情報を検証して作成
    ///
    /// # Errors
    /// key か email が空、または account と zone の両方が空の場合に
    /// `StreamError::InvalidCredentials` を返します。
    pub fn new(
        key: impl Into<String>,
        email: impl Into<String>,
        account: impl Into<String>,
        zone: impl Into<String>,
    ) -> StreamResult<Self> {
        let credentials = Self {
            key: key.into().trim().to_string(),
            email: email.into().trim().to_string(),
            account: account.into().trim().to_string(),
            zone: zone.into().trim().to_string(),
        };

        if credentials.key.is_empty() {
            return Err(StreamError::invalid_credentials("API key must not be empty"));
        }
        if credentials.email.is_empty() {
            return Err(StreamError::invalid_credentials("email must not be empty"));
        }
        if credentials.account.is_empty() && credentials.zone.is_empty() {
            return Err(StreamError::invalid_credentials(
                "an account ID or a zone ID is required",
            ));
        }

        Ok(credentials)
    }

    /// 設定ファイル/環境変数の認証情報から作成
    pub fn from_config(auth: &AuthConfig) -> StreamResult<Self> {
        Self::new(
            auth.key.as_str(),
            auth.email.as_str(),
            auth.account.as_str(),
            auth.zone.as_str(),
        )
    }

    /// アップロード先のスコープ
    ///
    /// account が設定されていれば常に account を使い、zone は account が空の場合のみ使う。
    pub fn scope(&self) -> Scope<'_> {
        if self.account.is_empty() {
            Scope::Zone(&self.zone)
        } else {
            Scope::Account(&self.account)
        }
    }

    /// リクエストに認証ヘッダーを付与
    pub fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(AUTH_KEY_HEADER, &self.key)
            .header(AUTH_EMAIL_HEADER, &self.email)
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// APIキーをマスキングして表示
    pub fn masked_key(&self) -> String {
        let chars: Vec<char> = self.key.chars().collect();
        if chars.len() <= 8 {
            "*".repeat(chars.len())
        } else {
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{}***{}", head, tail)
        }
    }
}

// APIキーをログに出さない
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.masked_key())
            .field("email", &self.email)
            .field("account", &self.account)
            .field("zone", &self.zone)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://api.cloudflare.com/client/v4";

    #[test]
    fn test_rejects_empty_key() {
        let result = Credentials::new("", "e@x.com", "acct1", "");
        assert!(matches!(result, Err(StreamError::InvalidCredentials { .. })));
    }

    #[test]
    fn test_rejects_empty_email() {
        let result = Credentials::new("k", "   ", "acct1", "zone1");
        assert!(matches!(result, Err(StreamError::InvalidCredentials { .. })));
    }

    #[test]
    fn test_rejects_missing_account_and_zone() {
        let result = Credentials::new("k", "e@x.com", "", "");
        assert!(matches!(result, Err(StreamError::InvalidCredentials { .. })));
    }

    #[test]
    fn test_accepts_valid_combinations() {
        assert!(Credentials::new("k", "e@x.com", "acct1", "").is_ok());
        assert!(Credentials::new("k", "e@x.com", "", "zone1").is_ok());
        assert!(Credentials::new("k", "e@x.com", "acct1", "zone1").is_ok());
    }

    #[test]
    fn test_account_scope_takes_precedence() {
        let both = Credentials::new("k", "e@x.com", "acct1", "zone1").unwrap();
        assert_eq!(both.scope(), Scope::Account("acct1"));
        assert_eq!(
            both.scope().media_url(BASE),
            "https://api.cloudflare.com/client/v4/accounts/acct1/media"
        );

        let zone_only = Credentials::new("k", "e@x.com", "", "zone1").unwrap();
        assert_eq!(
            zone_only.scope().media_url(&format!("{}/", BASE)),
            "https://api.cloudflare.com/client/v4/zones/zone1/media"
        );
    }

    #[test]
    fn test_key_masking() {
        let credentials = Credentials::new("abcdef123456789", "e@x.com", "acct1", "").unwrap();
        let masked = credentials.masked_key();
        assert_eq!(masked, "abcd***6789");
        assert!(!format!("{:?}", credentials).contains("ef12345"));

        let short = Credentials::new("short", "e@x.com", "acct1", "").unwrap();
        assert_eq!(short.masked_key(), "*****");
    }

    #[test]
    fn test_from_config() {
        let auth = AuthConfig {
            key: "k".to_string(),
            email: "e@x.com".to_string(),
            account: String::new(),
            zone: "zone1".to_string(),
        };
        let credentials = Credentials::from_config(&auth).unwrap();
        assert_eq!(credentials.scope(), Scope::Zone("zone1"));
        assert_eq!(credentials.email(), "e@x.com");
    }
}
