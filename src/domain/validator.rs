/// ドメインサービス: 入力バリデーション
///
/// ネットワークに出る前に、ファイル名・サイズ・オリジン指定を検証する。
/// 上限サイズと対応形式は APP_CONFIG から取得します。
use crate::api::error::{StreamError, StreamResult};
use crate::config::APP_CONFIG;
use std::path::Path;

/// リソース作成前のチェック
///
/// ファイル名が空、またはサイズが 0 の場合は `InvalidFile`。
pub fn validate_resource_request(file_name: &str, file_size: u64) -> StreamResult<()> {
    if file_name.trim().is_empty() {
        return Err(StreamError::invalid_file("file name must not be empty"));
    }
    if file_size == 0 {
        return Err(StreamError::invalid_file(format!(
            "file size of '{}' must be greater than zero",
            file_name
        )));
    }
    if file_size > APP_CONFIG.upload.max_file_size {
        return Err(StreamError::invalid_file(format!(
            "file too large: {} bytes (maximum allowed: {} bytes)",
            file_size, APP_CONFIG.upload.max_file_size
        )));
    }
    Ok(())
}

/// オリジン指定のチェック
///
/// ホスト名1つとして扱うため、パス区切り `/` を含むものは拒否する。
/// カンマ区切りの分割は行わない。
pub fn validate_origin(origins: &str) -> StreamResult<()> {
    if origins.contains('/') {
        return Err(StreamError::invalid_origins(origins));
    }
    Ok(())
}

/// 拡張子が対応形式かどうか
///
/// 送信自体は止めない（判定は Cloudflare 側が行う）。CLI の警告用。
pub fn has_supported_extension(file_path: &str) -> bool {
    Path::new(file_path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .is_some_and(|ext| {
            APP_CONFIG
                .upload
                .supported_formats
                .iter()
                .any(|format| *format == ext)
        })
}
