/// プレゼンテーション層: コマンド結果の出力
///
/// コマンド実行結果をユーザー向け（人間可読, stderr）または
/// 機械向け（JSON, stdout）形式で出力します。
use crate::commands::result::{CommandResult, CredentialSource, VideoStatusResult};
use crate::domain::formatter::{format_duration, format_timestamp};
use anyhow::Result;
use serde_json::Value;

/// ヘルプテキスト（単一の情報源）
pub const HELP_TEXT: &str = "cfstream
Manage Cloudflare Stream videos from the command line

Usage:
  cfstream [--machine] <command> [args...]

Global Flags:
  --machine        - Output machine-readable JSON to stdout (for scripting)
                     Works for both success and error cases

Available commands:
  login [--stdin]  - Save Cloudflare credentials
                     Without --stdin: Interactive input (default)
                     With --stdin: Read credentials from standard input
                                   line 1 = API key, line 2 = email,
                                   line 3 = account ID, line 4 = zone ID
  logout           - Remove saved credentials
  whoami           - Show which credentials will be used
  upload <file> [--progress]
                   - Upload a video with the TUS protocol
                     --progress: Report each upload phase
  status <url>     - Show the status of an uploaded video
  delete <url> [--force]
                   - Delete a video (--force skips the confirmation prompt)
  code <url>       - Print the HTML embed code of a video
  allow <url> <origin>
                   - Restrict playback to a single origin hostname
  require-signed <url>
                   - Require signed URLs for playback
  help             - Display this help message

Environment:
  CF_STREAM_KEY, CF_STREAM_EMAIL, CF_STREAM_ACCOUNT, CF_STREAM_ZONE
                   - Override the saved credentials
  RUST_LOG         - Log filter (e.g. RUST_LOG=cfstream=debug)";

/// コマンド使用方法を表示する
pub fn print_usage() {
    eprintln!("{}", HELP_TEXT);
}

/// コマンド結果を適切な形式で出力する
pub fn output_result(result: &CommandResult, machine_output: bool) -> Result<()> {
    if machine_output {
        println!("{}", serde_json::to_string(&machine_readable(result))?);
    } else {
        output_human_readable(result);
    }
    Ok(())
}

/// エラーを適切な形式で出力する
///
/// 機械向けモードでは exit_code と hint を含むJSONオブジェクトを stdout に出す。
pub fn output_error(error: &anyhow::Error, exit_code: i32, hint: Option<&str>, machine_output: bool) {
    if machine_output {
        let causes: Vec<String> = error.chain().skip(1).map(|c| c.to_string()).collect();
        let json = serde_json::json!({
            "success": false,
            "error": error.to_string(),
            "causes": causes,
            "exit_code": exit_code,
            "hint": hint,
        });
        println!("{}", json);
        return;
    }

    eprintln!("Error: {}", error);

    let chain: Vec<_> = error.chain().skip(1).collect();
    if !chain.is_empty() {
        eprintln!("\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            eprintln!("  {}: {}", i + 1, cause);
        }
    }

    if let Some(hint) = hint {
        eprintln!("\nHint: {}", hint);
    }
}

/// 人間向けの詳細メッセージを出力（stderr）
///
/// 埋め込みコードだけはパイプで使えるように stdout に出す。
fn output_human_readable(result: &CommandResult) {
    match result {
        CommandResult::Login(r) => {
            eprintln!();
            eprintln!("✓ {}", result.success_message());
            eprintln!("Uploads will go to {}.", r.scope);
        }
        CommandResult::Logout(_) => {
            eprintln!("{}", result.success_message());
        }
        CommandResult::Whoami(r) => {
            if !r.is_configured {
                eprintln!("Not logged in");
                eprintln!("No credentials found in the config file or environment.");
                eprintln!("Please run 'cfstream login' to authenticate.");
                return;
            }
            let source = match r.source {
                Some(CredentialSource::Environment) => "environment variables",
                _ => "config file",
            };
            eprintln!("Credentials from {}", source);
            if let Some(email) = &r.email {
                eprintln!("Email:   {}", email);
            }
            if let Some(key) = &r.key {
                eprintln!("API Key: {}", key);
            }
            if let Some(scope) = &r.scope {
                eprintln!("Scope:   {}", scope);
            }
        }
        CommandResult::Upload(r) => {
            eprintln!("\n{}", result.success_message());
            eprintln!("---");
            eprintln!("Video UID: {}", r.uid);
            eprintln!("Location:  {}", r.location);
            eprintln!("File:      {} ({} bytes)", r.file_path, r.file_size);
            eprintln!("---");
            eprintln!("Use 'cfstream status {}' to follow processing.", r.location);
        }
        CommandResult::Status(r) => output_video_status(r),
        CommandResult::Delete(r) => {
            if r.deleted {
                eprintln!("✓ {}", result.success_message());
                eprintln!("Resource: {}", r.resource_url);
            } else {
                eprintln!("{}", result.success_message());
            }
        }
        CommandResult::Code(r) => {
            println!("{}", r.html);
        }
        CommandResult::Allow(r) => {
            eprintln!("✓ {}", result.success_message());
            eprintln!("Playback of {} is limited to: {}", r.resource_url, r.origins);
        }
        CommandResult::RequireSigned(r) => {
            eprintln!("✓ {}", result.success_message());
            eprintln!("Resource: {}", r.resource_url);
        }
        CommandResult::Help => print_usage(),
    }
}

/// 動画状態の主要フィールドを表示
fn output_video_status(r: &VideoStatusResult) {
    eprintln!();
    eprintln!("Video Status:");
    eprintln!("=============");
    for line in video_status_lines(r) {
        eprintln!("{}", line);
    }
    eprintln!();
}

/// 動画状態の表示行を組み立てる
///
/// Cloudflare のレスポンスは `{ "result": { ... } }` 形式だが、
/// `result` が無い場合はボディ全体を見る。
fn video_status_lines(r: &VideoStatusResult) -> Vec<String> {
    let video = r.data.get("result").unwrap_or(&r.data);
    let mut lines = vec![format!("Resource:       {}", r.resource_url)];

    if let Some(uid) = video.get("uid").and_then(Value::as_str) {
        lines.push(format!("UID:            {}", uid));
    }
    if let Some(state) = video.pointer("/status/state").and_then(Value::as_str) {
        lines.push(format!("State:          {}", state));
    }
    if let Some(pct) = video.pointer("/status/pctComplete").and_then(Value::as_str) {
        lines.push(format!("Progress:       {}%", pct));
    }
    if let Some(ready) = video.get("readyToStream").and_then(Value::as_bool) {
        lines.push(format!("Ready:          {}", if ready { "yes" } else { "no" }));
    }
    if let Some(duration) = video.get("duration").and_then(Value::as_f64).and_then(format_duration) {
        lines.push(format!("Duration:       {}", duration));
    }
    if let Some(created) = video.get("created").and_then(Value::as_str) {
        lines.push(format!(
            "Created At:     {}",
            format_timestamp(created, r.timezone_offset_seconds)
        ));
    }
    if let Some(signed) = video.get("requireSignedURLs").and_then(Value::as_bool) {
        lines.push(format!(
            "Signed URLs:    {}",
            if signed { "required" } else { "not required" }
        ));
    }
    if let Some(origins) = video.get("allowedOrigins").and_then(Value::as_array) {
        let origins: Vec<&str> = origins.iter().filter_map(Value::as_str).collect();
        if origins.is_empty() {
            lines.push("Origins:        (any)".to_string());
        } else {
            lines.push(format!("Origins:        {}", origins.join(", ")));
        }
    }
    if let Some(preview) = video.get("preview").and_then(Value::as_str) {
        lines.push(format!("Preview:        {}", preview));
    }
    lines
}

/// 機械可読JSONを構築
fn machine_readable(result: &CommandResult) -> Value {
    let mut json = serde_json::to_value(result).unwrap_or_else(|_| serde_json::json!({}));
    if let Some(object) = json.as_object_mut() {
        object.insert("success".to_string(), Value::Bool(true));
    }
    json
}
