/// コマンド実行結果を表す型
///
/// 各コマンドはこの型を返し、プレゼンテーション層で
/// 人間向けと機械向けの出力フォーマットを決定する。
use serde::Serialize;

/// コマンド実行結果の統一型
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandResult {
    Login(LoginResult),
    Logout(LogoutResult),
    Whoami(WhoamiResult),
    Upload(UploadResult),
    Status(VideoStatusResult),
    Delete(DeleteResult),
    Code(CodeResult),
    Allow(AllowResult),
    RequireSigned(RequireSignedResult),
    Help,
}

/// ログインコマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    /// 既にログイン済みだったか（上書き更新の場合true）
    pub was_logged_in: bool,
    /// "account <id>" または "zone <id>"
    pub scope: String,
}

/// ログアウトコマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct LogoutResult {
    pub was_logged_in: bool,
}

/// 認証情報の出どころ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialSource {
    Environment,
    ConfigFile,
}

/// whoami コマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct WhoamiResult {
    pub is_configured: bool,
    pub source: Option<CredentialSource>,
    pub email: Option<String>,
    /// マスキングされたAPIキー
    pub key: Option<String>,
    pub scope: Option<String>,
}

/// アップロードコマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct UploadResult {
    /// 作成されたリソースのURL
    pub location: String,
    /// 動画のuid
    pub uid: String,
    pub file_path: String,
    pub file_size: u64,
}

/// 動画の状態（APIレスポンスをそのまま保持）
#[derive(Debug, Clone, Serialize)]
pub struct VideoStatusResult {
    pub resource_url: String,
    pub data: serde_json::Value,
    /// 日時表示用のタイムゾーンオフセット（秒）
    #[serde(skip)]
    pub timezone_offset_seconds: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteResult {
    pub resource_url: String,
    /// 確認プロンプトで中止された場合false
    pub deleted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CodeResult {
    pub resource_url: String,
    pub html: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AllowResult {
    pub resource_url: String,
    pub origins: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequireSignedResult {
    pub resource_url: String,
}

impl CommandResult {
    /// 成功メッセージを取得（人間向け出力用）
    pub fn success_message(&self) -> String {
        match self {
            CommandResult::Login(r) => {
                if r.was_logged_in {
                    "Login credentials updated!".to_string()
                } else {
                    "Login successful!".to_string()
                }
            }
            CommandResult::Logout(r) => {
                if r.was_logged_in {
                    "Logged out successfully.".to_string()
                } else {
                    "Already logged out.".to_string()
                }
            }
            CommandResult::Whoami(r) => {
                if r.is_configured {
                    "Credentials configured".to_string()
                } else {
                    "Not logged in".to_string()
                }
            }
            CommandResult::Upload(_) => "Upload completed successfully!".to_string(),
            CommandResult::Status(_) => "Video status".to_string(),
            CommandResult::Delete(r) => {
                if r.deleted {
                    "Video deleted successfully!".to_string()
                } else {
                    "Deletion cancelled.".to_string()
                }
            }
            CommandResult::Code(_) => "Embed code".to_string(),
            CommandResult::Allow(_) => "Allowed origins updated.".to_string(),
            CommandResult::RequireSigned(_) => "Signed URLs are now required.".to_string(),
            CommandResult::Help => "".to_string(),
        }
    }
}
