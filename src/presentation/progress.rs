/// プレゼンテーション層: アップロード進捗表示
///
/// ドメイン層の`UploadProgress`をUI表示に適した形式に変換し、
/// 人間向け（stderr）または機械向け（JSON Lines, stdout）に出力します。
use crate::config::BYTES_PER_MB;
use crate::domain::progress::{UploadPhase, UploadProgress};

/// 進捗表示のカテゴリ
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressCategory {
    /// ファイル準備
    Preparation,
    /// TUSリソース作成
    Session,
    /// バイト送信
    Upload,
    Completed,
}

/// プレゼンテーション層用の進捗情報
#[derive(Debug, Clone)]
pub struct DisplayProgress {
    pub message: String,
    pub category: ProgressCategory,
}

impl DisplayProgress {
    pub fn new(message: String, category: ProgressCategory) -> Self {
        Self { message, category }
    }
}

impl From<&UploadProgress> for DisplayProgress {
    fn from(progress: &UploadProgress) -> Self {
        match &progress.phase {
            UploadPhase::FileOpened {
                file_name,
                size_bytes,
            } => DisplayProgress::new(
                format!("File ready: {} ({})", file_name, format_size(*size_bytes)),
                ProgressCategory::Preparation,
            ),
            UploadPhase::CreatingResource { file_name } => DisplayProgress::new(
                format!("Creating upload resource for: {}", file_name),
                ProgressCategory::Session,
            ),
            UploadPhase::ResourceCreated { location } => DisplayProgress::new(
                format!("Upload resource created: {}", location),
                ProgressCategory::Session,
            ),
            UploadPhase::SendingBytes { size_bytes, .. } => DisplayProgress::new(
                format!("Sending {}...", format_size(*size_bytes)),
                ProgressCategory::Upload,
            ),
            UploadPhase::Completed { location } => DisplayProgress::new(
                format!("Upload finished: {}", location),
                ProgressCategory::Completed,
            ),
        }
    }
}

fn format_size(size_bytes: u64) -> String {
    format!("{:.2} MB", size_bytes as f64 / BYTES_PER_MB as f64)
}

/// 進捗を出力する
///
/// * `machine_output = false`: 人間向けメッセージ（stderr）
/// * `machine_output = true`: 1イベント1行のJSON（stdout）
pub fn report(progress: &UploadProgress, machine_output: bool) {
    if machine_output {
        match serde_json::to_string(&progress.phase) {
            Ok(line) => println!("{}", line),
            Err(e) => tracing::warn!(error = %e, "failed to serialize progress event"),
        }
    } else {
        let display = DisplayProgress::from(progress);
        eprintln!("  {}", display.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_opened_message() {
        let progress = UploadProgress::new(UploadPhase::FileOpened {
            file_name: "video.mp4".to_string(),
            size_bytes: 10_485_760,
        });

        let display = DisplayProgress::from(&progress);
        assert_eq!(display.message, "File ready: video.mp4 (10.00 MB)");
        assert_eq!(display.category, ProgressCategory::Preparation);
    }

    #[test]
    fn test_resource_created_message() {
        let progress = UploadProgress::new(UploadPhase::ResourceCreated {
            location: "https://upload.example/videoA".to_string(),
        });

        let display = DisplayProgress::from(&progress);
        assert!(display.message.contains("https://upload.example/videoA"));
        assert_eq!(display.category, ProgressCategory::Session);
    }

    #[test]
    fn test_completed_message() {
        let progress = UploadProgress::new(UploadPhase::Completed {
            location: "https://upload.example/videoA".to_string(),
        });

        let display = DisplayProgress::from(&progress);
        assert_eq!(display.category, ProgressCategory::Completed);
    }
}
