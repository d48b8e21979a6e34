/// プレゼンテーション層: ユーザー入力処理
///
/// stdin からの対話入力・パイプ入力を取得し、
/// アプリケーション層で使える形式に変換します。
use crate::commands::login::LoginCredentials;
use anyhow::{Context, Result, bail};
use std::io::{self, BufRead, Write};

/// 対話的に認証情報を取得
pub fn read_credentials_interactive() -> Result<LoginCredentials> {
    eprintln!("Logging in to Cloudflare Stream...");
    eprintln!();
    eprintln!("Please enter your Cloudflare Global API Key and account email.");
    eprintln!("You can find the key at: https://dash.cloudflare.com/profile/api-tokens");
    eprintln!();

    let stdin = io::stdin();
    let mut lines = stdin.lock();

    let key = prompt(&mut lines, "API Key: ")?;
    if key.is_empty() {
        bail!("API Key cannot be empty. Please provide a valid key.");
    }

    let email = prompt(&mut lines, "Email: ")?;
    if email.is_empty() {
        bail!("Email cannot be empty. Please provide the email of your Cloudflare account.");
    }

    let account = prompt(&mut lines, "Account ID (leave empty to use a zone): ")?;
    let zone = if account.is_empty() {
        prompt(&mut lines, "Zone ID: ")?
    } else {
        String::new()
    };

    Ok(LoginCredentials {
        key,
        email,
        account,
        zone,
    })
}

/// stdin からパイプで認証情報を取得
///
/// 形式:
///   1行目: API Key
///   2行目: Email
///   3行目: Account ID（空行可）
///   4行目: Zone ID（省略可）
pub fn read_credentials_from_stdin() -> Result<LoginCredentials> {
    parse_credentials(io::stdin().lock())
}

/// 行区切りの認証情報をパースする
pub fn parse_credentials<R: BufRead>(mut reader: R) -> Result<LoginCredentials> {
    let key = read_trimmed_line(&mut reader).context("Failed to read API Key from stdin")?;
    if key.is_empty() {
        bail!("API Key cannot be empty. Please ensure the first line of stdin contains a valid key.");
    }

    let email = read_trimmed_line(&mut reader).context("Failed to read Email from stdin")?;
    if email.is_empty() {
        bail!("Email cannot be empty. Please ensure the second line of stdin contains the account email.");
    }

    let account = read_trimmed_line(&mut reader).context("Failed to read Account ID from stdin")?;
    let zone = read_trimmed_line(&mut reader).context("Failed to read Zone ID from stdin")?;

    Ok(LoginCredentials {
        key,
        email,
        account,
        zone,
    })
}

/// y/N の確認プロンプト
pub fn confirm(question: &str) -> Result<bool> {
    let stdin = io::stdin();
    let answer = prompt(&mut stdin.lock(), &format!("{} [y/N]: ", question))?;
    Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}

fn prompt<R: BufRead>(reader: &mut R, label: &str) -> Result<String> {
    eprint!("{}", label);
    io::stderr().flush()?;
    read_trimmed_line(reader).with_context(|| format!("Failed to read input for '{}'", label.trim()))
}

fn read_trimmed_line<R: BufRead>(reader: &mut R) -> io::Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
