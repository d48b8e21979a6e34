use crate::commands::build_client;
use crate::commands::result::{CommandResult, UploadResult};
use crate::domain::progress::{UploadPhase, UploadProgress};
use crate::domain::validator;
use anyhow::{Context, Result};
use tracing::warn;

/// アップロードコマンドを実行する
///
/// # 引数
/// * `file_path` - アップロード対象の動画ファイルのパス
/// * `on_progress` - 各段階で呼ばれる進捗コールバック
///
/// # エラー
/// アプリケーション層として anyhow::Result を返し、
/// 設定・APIクライアントのエラーを集約する。
pub async fn execute<F>(file_path: &str, mut on_progress: F) -> Result<CommandResult>
where
    F: FnMut(UploadProgress),
{
    if !validator::has_supported_extension(file_path) {
        warn!(file_path, "file extension is not a known video format, uploading anyway");
    }

    let client = build_client()?;

    // サイズはアップロード時に開いたファイルのものを使う
    let mut file_size = 0;
    let location = client
        .upload_with_progress(file_path, |progress| {
            if let UploadPhase::FileOpened { size_bytes, .. } = &progress.phase {
                file_size = *size_bytes;
            }
            on_progress(progress);
        })
        .await
        .with_context(|| format!("Failed to upload '{}'", file_path))?;

    Ok(CommandResult::Upload(UploadResult {
        uid: location.uid().to_string(),
        location: location.into_string(),
        file_path: file_path.to_string(),
        file_size,
    }))
}
