/// アプリケーション設定モジュール
///
/// ビルド時に決まる静的設定を定数として保持します。
/// これらの設定は実行時には変更できません。

/// 1MBあたりのバイト数
pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// アプリケーション全体の設定
#[derive(Debug, Clone, Copy)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub upload: UploadConfig,
    pub logging: LoggingConfig,
}

/// API関連の設定
#[derive(Debug, Clone, Copy)]
pub struct ApiConfig {
    /// Cloudflare API v4 のベースURL
    pub endpoint: &'static str,

    /// APIリクエストのタイムアウト(秒)
    ///
    /// 大きな動画のPATCHにも耐えられる値にしておく
    pub timeout_seconds: u64,

    /// TUS プロトコルのバージョン（Tus-Resumable ヘッダー）
    pub tus_version: &'static str,
}

/// アップロード関連の設定
#[derive(Debug, Clone, Copy)]
pub struct UploadConfig {
    /// アップロード可能な最大ファイルサイズ (バイト)
    pub max_file_size: u64,

    /// 対応する動画フォーマット
    pub supported_formats: &'static [&'static str],
}

/// ロギング関連の設定
#[derive(Debug, Clone, Copy)]
pub struct LoggingConfig {
    /// RUST_LOG が未設定の場合に使うフィルタ
    pub default_filter: &'static str,
}

/// グローバル設定
pub const APP_CONFIG: AppConfig = AppConfig {
    api: ApiConfig {
        endpoint: "https://api.cloudflare.com/client/v4",
        timeout_seconds: 600,
        tus_version: "1.0.0",
    },
    upload: UploadConfig {
        // Stream の basic upload 上限は 30GB
        max_file_size: 30 * 1024 * BYTES_PER_MB,
        supported_formats: &["mp4", "mkv", "mov", "avi", "flv", "mpeg", "mpg", "webm", "mxf", "ts", "3gp"],
    },
    logging: LoggingConfig {
        default_filter: "cfstream=warn",
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_values() {
        assert_eq!(APP_CONFIG.api.endpoint, "https://api.cloudflare.com/client/v4");
        assert_eq!(APP_CONFIG.api.tus_version, "1.0.0");
        assert!(APP_CONFIG.upload.supported_formats.contains(&"mp4"));
        assert!(APP_CONFIG.upload.max_file_size > BYTES_PER_MB);
    }
}
