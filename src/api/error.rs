/// Stream API クライアントのエラー定義
///
/// 各操作は `Result<T, StreamError>` を返す。
/// 通信レベルの失敗（接続拒否、タイムアウトなど）は細分化せず
/// `Transport` として元の reqwest::Error を保持する。
use crate::error_severity::ErrorSeverity;
use thiserror::Error;

/// APIクライアントの結果型
pub type StreamResult<T> = Result<T, StreamError>;

#[derive(Error, Debug)]
pub enum StreamError {
    /// 認証情報が不足している（構築時のみ発生）
    #[error("invalid credentials: {message}")]
    InvalidCredentials { message: String },

    /// ファイルが開けない、ファイル名やサイズが空
    #[error("invalid file: {message}")]
    InvalidFile { message: String },

    /// オリジン指定が不正
    #[error("invalid origins '{origins}': a hostname must not contain '/'")]
    InvalidOrigins { origins: String },

    /// 期待したステータスコード以外が返された
    #[error("{operation} failed: expected HTTP {expected}, got {status}")]
    OperationFailed {
        operation: String,
        expected: u16,
        status: u16,
        body: String,
    },

    /// 通信エラー
    #[error("transport error during {operation}")]
    Transport {
        operation: String,
        #[source]
        source: reqwest::Error,
    },
}

impl StreamError {
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::InvalidCredentials {
            message: message.into(),
        }
    }

    pub fn invalid_file(message: impl Into<String>) -> Self {
        Self::InvalidFile {
            message: message.into(),
        }
    }

    pub fn invalid_origins(origins: impl Into<String>) -> Self {
        Self::InvalidOrigins {
            origins: origins.into(),
        }
    }

    pub fn transport(operation: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            operation: operation.into(),
            source,
        }
    }

    /// `OperationFailed` の場合、実際に返されたステータスコード
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::OperationFailed { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// エラーの深刻度を返す
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidCredentials { .. } => ErrorSeverity::ConfigError,
            Self::InvalidFile { .. } => ErrorSeverity::UserError,
            Self::InvalidOrigins { .. } => ErrorSeverity::UserError,
            Self::OperationFailed { .. } => ErrorSeverity::RemoteError,
            Self::Transport { .. } => ErrorSeverity::SystemError,
        }
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::InvalidCredentials { .. } => Some(
                "Run 'cfstream login' and provide an API key, an email and an account or zone ID.",
            ),
            Self::InvalidFile { .. } => {
                Some("Please check the file path and ensure the file exists and is not empty.")
            }
            Self::InvalidOrigins { .. } => {
                Some("Pass a bare hostname such as 'example.com', without scheme or path.")
            }
            Self::OperationFailed { status: 401 | 403, .. } => {
                Some("Cloudflare rejected the credentials. Check your API key and email.")
            }
            Self::OperationFailed { status: 404, .. } => {
                Some("The video was not found. Check the resource URL.")
            }
            Self::OperationFailed { .. } => None,
            Self::Transport { source, .. } if source.is_timeout() => {
                Some("The request timed out. Check your network connection and try again.")
            }
            Self::Transport { .. } => Some("Check your network connection and try again."),
        }
    }
}
