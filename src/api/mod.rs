/// Cloudflare Stream API クライアントモジュール
///
/// - auth: 認証情報とエンドポイントのスコープ
/// - client: 各操作（upload, status, delete, code, allow, require_signed_urls）
/// - types: TUS ヘッダー、リソースURL、アップロード対象ファイル
/// - error: 操作ごとのエラー型
pub mod auth;
pub mod client;
pub mod error;
pub mod types;

pub use auth::Credentials;
pub use client::StreamClient;
pub use error::{StreamError, StreamResult};
pub use types::{ResourceLocation, UploadHandle};
