/// ユーザー設定モジュール
///
/// 実行時にユーザーディレクトリから読み込まれる動的設定を管理します。
/// Windows: C:\Users\<User>\AppData\Roaming\cfstream\config.toml
/// macOS:   /Users/<User>/Library/Application Support/cfstream/config.toml
/// Linux:   /home/<user>/.config/cfstream/config.toml
///
/// 初回起動時にデフォルト値から自動的にconfig.tomlを作成します。
/// 認証情報は環境変数（CF_STREAM_*）でも指定でき、その場合はファイルより優先されます。
use crate::config::error::ConfigError;
use crate::config::permissions::write_private_file;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// デフォルトのタイムゾーンオフセット（UTC）
const DEFAULT_TIMEZONE_OFFSET: i32 = 0;

/// タイムゾーンオフセットの最大値（+18時間 = 64800秒）
const MAX_TIMEZONE_OFFSET: i32 = 64800;

/// タイムゾーンオフセットの最小値（-18時間 = -64800秒）
const MIN_TIMEZONE_OFFSET: i32 = -64800;

pub const ENV_KEY: &str = "CF_STREAM_KEY";
pub const ENV_EMAIL: &str = "CF_STREAM_EMAIL";
pub const ENV_ACCOUNT: &str = "CF_STREAM_ACCOUNT";
pub const ENV_ZONE: &str = "CF_STREAM_ZONE";

/// Cloudflare 認証設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Global API Key
    pub key: String,

    /// Cloudflare アカウントのメールアドレス
    pub email: String,

    /// アカウントID（account と zone のどちらかは必須）
    #[serde(default)]
    pub account: String,

    /// ゾーンID
    #[serde(default)]
    pub zone: String,
}

impl AuthConfig {
    /// 環境変数風のルックアップ関数から認証情報を組み立てる
    ///
    /// key と email の両方が得られない場合は `None`。
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = lookup(ENV_KEY).filter(|v| !v.trim().is_empty())?;
        let email = lookup(ENV_EMAIL).filter(|v| !v.trim().is_empty())?;

        Some(Self {
            key,
            email,
            account: lookup(ENV_ACCOUNT).unwrap_or_default(),
            zone: lookup(ENV_ZONE).unwrap_or_default(),
        })
    }

    /// プロセスの環境変数から認証情報を取得
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }
}

/// ユーザー設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    /// Cloudflare 認証情報
    pub auth: Option<AuthConfig>,

    /// タイムゾーンオフセット(秒単位)
    /// 例: UTC=0, JST(UTC+9)=32400, PST(UTC-8)=-28800
    #[serde(default = "default_timezone_offset")]
    pub timezone_offset_seconds: i32,
}

fn default_timezone_offset() -> i32 {
    DEFAULT_TIMEZONE_OFFSET
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            auth: None,
            timezone_offset_seconds: DEFAULT_TIMEZONE_OFFSET,
        }
    }
}

impl UserConfig {
    /// ユーザー設定ファイルのパスを取得
    ///
    /// # Errors
    /// 設定ディレクトリが取得できない場合に ConfigError::DirectoryNotFound を返します。
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .ok_or_else(|| ConfigError::directory_not_found("Failed to get user config directory"))
            .map(|config_dir| config_dir.join("cfstream").join("config.toml"))
    }

    /// ユーザー設定を読み込む
    ///
    /// 設定ファイルが存在しない場合は、デフォルトテンプレートから自動的に作成します。
    /// 読み込み後、自動的に検証を実行します（Fail Fast）。
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスからユーザー設定を読み込む
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to read config file: {}", config_path.display()),
                e,
            )
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ConfigError::parse_error(
                format!("Failed to parse config file ({})", config_path.display()),
                e,
            )
        })?;

        config.validate()?;

        Ok(config)
    }

    /// デフォルト設定ファイルを作成
    fn create_default_config(config_path: &Path) -> Result<(), ConfigError> {
        Self::ensure_parent_dir(config_path)?;

        fs::write(config_path, Self::default_toml_content()).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to create default config file: {}", config_path.display()),
                e,
            )
        })?;

        Ok(())
    }

    fn ensure_parent_dir(config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::file_system(
                    format!("Failed to create config directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }

    /// デフォルトTOML設定を生成
    fn default_toml_content() -> String {
        format!(
            r#"# Cloudflare Stream CLI - User Configuration
# Authentication credentials are set with 'cfstream login'
# or through the CF_STREAM_KEY / CF_STREAM_EMAIL / CF_STREAM_ACCOUNT / CF_STREAM_ZONE variables.

# Timezone offset in seconds
# Examples: UTC=0, JST(UTC+9)=32400, PST(UTC-8)=-28800
timezone_offset_seconds = {}
"#,
            DEFAULT_TIMEZONE_OFFSET
        )
    }

    /// ユーザー設定を保存する
    ///
    /// APIキーを含むため、所有者のみ読み書きできるファイルとして書き込みます。
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// 指定パスにユーザー設定を保存する
    pub fn save_to(&self, config_path: &Path) -> Result<(), ConfigError> {
        Self::ensure_parent_dir(config_path)?;

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::serialize_error("Failed to serialize config", e))?;

        write_private_file(config_path, &content)
    }

    /// ユーザー設定を検証
    ///
    /// # 検証内容
    /// - auth.key, auth.email: 空文字列でないこと
    /// - auth.account, auth.zone: 少なくとも一方が空でないこと
    /// - timezone_offset_seconds: ±18時間以内
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(auth) = &self.auth {
            Self::validate_auth(auth)?;
        }

        Self::validate_timezone_offset(self.timezone_offset_seconds)?;

        Ok(())
    }

    fn validate_auth(auth: &AuthConfig) -> Result<(), ConfigError> {
        Self::validate_auth_field(&auth.key, "key")?;
        Self::validate_auth_field(&auth.email, "email")?;

        if auth.account.trim().is_empty() && auth.zone.trim().is_empty() {
            return Err(ConfigError::validation_error(
                "Authentication requires an account or a zone ID. Please run 'cfstream login' again.",
            ));
        }
        Ok(())
    }

    fn validate_auth_field(value: &str, field_name: &str) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            return Err(ConfigError::validation_error(format!(
                "Authentication {} cannot be empty. Please run 'cfstream login' again.",
                field_name
            )));
        }
        Ok(())
    }

    fn validate_timezone_offset(offset: i32) -> Result<(), ConfigError> {
        if !(MIN_TIMEZONE_OFFSET..=MAX_TIMEZONE_OFFSET).contains(&offset) {
            return Err(ConfigError::validation_error(format!(
                "Invalid timezone offset '{}' seconds. Must be between {} and {} (±18 hours)",
                offset, MIN_TIMEZONE_OFFSET, MAX_TIMEZONE_OFFSET
            )));
        }
        Ok(())
    }

    /// 認証情報を設定
    pub fn set_auth(&mut self, auth: AuthConfig) {
        self.auth = Some(auth);
    }

    /// ファイルに保存された認証情報を取得
    ///
    /// # Errors
    /// 認証情報が設定されていない場合に ConfigError::CredentialsNotFound を返します。
    pub fn get_auth(&self) -> Result<&AuthConfig, ConfigError> {
        self.auth.as_ref().ok_or_else(|| {
            ConfigError::credentials_not_found(
                "Authentication credentials not found. Please run 'cfstream login' first.",
            )
        })
    }

    /// 実際に使う認証情報を解決する
    ///
    /// 環境変数 > 設定ファイル の順で優先します。
    pub fn resolve_auth(&self) -> Result<AuthConfig, ConfigError> {
        self.resolve_auth_with(AuthConfig::from_env())
    }

    fn resolve_auth_with(&self, from_env: Option<AuthConfig>) -> Result<AuthConfig, ConfigError> {
        match from_env {
            Some(auth) => {
                Self::validate_auth(&auth)?;
                Ok(auth)
            }
            None => self.get_auth().cloned(),
        }
    }

    /// 認証情報が存在するかチェック
    pub fn has_auth(&self) -> bool {
        self.auth.is_some()
    }

    /// 認証情報を削除
    pub fn clear_auth(&mut self) {
        self.auth = None;
    }
}
