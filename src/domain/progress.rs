/// ドメイン層: アップロード進捗イベント定義
///
/// TUS アップロードの2段階（リソース作成 → バイト送信）を
/// イベントとして表現します。プレゼンテーション層はこれらを受け取って
/// 人間向け/機械向けの進捗表示に変換します。
use serde::Serialize;
use std::time::SystemTime;

/// アップロード処理の各段階を表すイベント
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum UploadPhase {
    /// ファイルを開いた
    FileOpened { file_name: String, size_bytes: u64 },

    /// リソース作成（POST）中
    CreatingResource { file_name: String },

    /// リソース作成完了
    ResourceCreated { location: String },

    /// バイト送信（PATCH）中
    SendingBytes { location: String, size_bytes: u64 },

    /// アップロード完了
    Completed { location: String },
}

/// アップロード進捗情報
#[derive(Debug, Clone, Serialize)]
pub struct UploadProgress {
    pub phase: UploadPhase,
    #[serde(skip)]
    pub timestamp: SystemTime,
}

impl UploadProgress {
    pub fn new(phase: UploadPhase) -> Self {
        Self {
            phase,
            timestamp: SystemTime::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_serializes_with_tag() {
        let progress = UploadProgress::new(UploadPhase::ResourceCreated {
            location: "https://upload.example/videoA".to_string(),
        });

        let json = serde_json::to_value(&progress).unwrap();
        assert_eq!(json["phase"]["phase"], "resource_created");
        assert_eq!(json["phase"]["location"], "https://upload.example/videoA");
        assert!(json.get("timestamp").is_none());
    }
}
