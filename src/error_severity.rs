//! エラー深刻度と終了コードの対応
//!
//! 各層（api, config, domain）のエラーはすべてこの分類に落とし込まれ、
//! main.rs で終了コードの決定に使われる。
//! このモジュールは他のモジュールに依存しない。

use std::fmt;

/// エラーの深刻度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// ユーザーの入力エラー
    ///
    /// ファイルが開けない、オリジン指定が不正など、ユーザーが直せるもの。
    ///
    /// **Exit Code: 1**
    UserError,

    /// 設定エラー
    ///
    /// 認証情報が不足している、設定ファイルが壊れているなど。
    ///
    /// **Exit Code: 2**
    ConfigError,

    /// システムエラー
    ///
    /// 接続失敗、タイムアウト、ファイルシステム障害など。
    ///
    /// **Exit Code: 3**
    SystemError,

    /// リモートAPIが操作を拒否した
    ///
    /// 期待したステータスコード以外が返ってきた場合。
    ///
    /// **Exit Code: 4**
    RemoteError,
}

impl ErrorSeverity {
    /// 対応する Unix 終了コードを返す
    pub fn exit_code(self) -> i32 {
        match self {
            Self::UserError => 1,
            Self::ConfigError => 2,
            Self::SystemError => 3,
            Self::RemoteError => 4,
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserError => write!(f, "user error"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::SystemError => write!(f, "system error"),
            Self::RemoteError => write!(f, "remote API error"),
        }
    }
}
