/// 設定管理モジュール
///
/// このモジュールは2層の設定構造を提供します:
/// 1. AppConfig - ビルド時に定数として定義される静的設定（APP_CONFIG）
/// 2. UserConfig - 実行時に読み込まれる動的設定（認証情報など）
///
/// # 使用例
///
/// ```no_run
/// use cfstream::config::{APP_CONFIG, UserConfig};
///
/// let endpoint = APP_CONFIG.api.endpoint;
///
/// // load時に自動検証、認証情報は環境変数を優先
/// let user_config = UserConfig::load()?;
/// let auth = user_config.resolve_auth()?;
/// # Ok::<(), cfstream::config::error::ConfigError>(())
/// ```
pub mod app;
pub mod error;
pub mod permissions;
pub mod user;

pub use app::{APP_CONFIG, BYTES_PER_MB};
pub use user::{AuthConfig, UserConfig};
