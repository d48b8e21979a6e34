/// ドメインサービス: 表示用フォーマット
///
/// Cloudflare が返す RFC 3339 のタイムスタンプを、ユーザー設定の
/// タイムゾーンオフセットに合わせて人間向けの文字列に変換する。
use chrono::{DateTime, FixedOffset};

/// RFC 3339 タイムスタンプをオフセット付きでフォーマット
///
/// # 戻り値
/// - `"2024-12-01 23:30:45 +09:00"` のような文字列
/// - パースできない、またはオフセットが不正な場合は元の文字列
pub fn format_timestamp(timestamp: &str, offset_seconds: i32) -> String {
    let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) else {
        return timestamp.to_string();
    };
    let Some(offset) = FixedOffset::east_opt(offset_seconds) else {
        return timestamp.to_string();
    };

    parsed
        .with_timezone(&offset)
        .format("%Y-%m-%d %H:%M:%S %:z")
        .to_string()
}

/// 秒数を `m:ss` 形式に変換
///
/// Cloudflare は処理前の動画に -1 を返すので、負の値は `None`。
pub fn format_duration(seconds: f64) -> Option<String> {
    if seconds < 0.0 || !seconds.is_finite() {
        return None;
    }
    let minutes = (seconds / 60.0) as u64;
    let rest = (seconds % 60.0) as u64;
    Some(format!("{}:{:02}", minutes, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp_utc() {
        let result = format_timestamp("2025-11-29T16:49:10.123456Z", 0);
        assert_eq!(result, "2025-11-29 16:49:10 +00:00");
    }

    #[test]
    fn test_format_timestamp_jst() {
        // UTC 16:49:10 → JST 01:49:10 (翌日)
        let result = format_timestamp("2025-11-29T16:49:10Z", 9 * 3600);
        assert_eq!(result, "2025-11-30 01:49:10 +09:00");
    }

    #[test]
    fn test_format_timestamp_invalid() {
        assert_eq!(format_timestamp("invalid", 0), "invalid");
        assert_eq!(
            format_timestamp("2025-11-29T16:49:10Z", 999_999),
            "2025-11-29T16:49:10Z"
        );
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(125.4).as_deref(), Some("2:05"));
        assert_eq!(format_duration(0.0).as_deref(), Some("0:00"));
        assert_eq!(format_duration(-1.0), None);
    }
}
