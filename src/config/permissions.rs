/// 設定ファイルのパーミッション管理
///
/// APIキーを含む config.toml を所有者のみがアクセスできるようにします。
///
/// Unix系 (Linux, macOS): 0600 (rw-------)
/// その他: 既定のACLに任せる
use crate::config::error::ConfigError;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// 所有者のみ読み書きできる状態でファイルを書き込む
///
/// 新規作成時は作成の時点で 0600 にする。既存ファイルは書き込み後に 0600 へ絞る。
pub fn write_private_file(file_path: &Path, content: &str) -> Result<(), ConfigError> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let write_error = |e| {
        ConfigError::file_system(
            format!("Failed to write config file: {}", file_path.display()),
            e,
        )
    };

    let mut file = options.open(file_path).map_err(write_error)?;
    file.write_all(content.as_bytes()).map_err(write_error)?;
    drop(file);

    set_token_file_permissions(file_path)
}

/// 認証情報ファイル用パーミッションを設定
///
/// # Errors
/// ファイルが存在しない場合、またはパーミッション設定に失敗した場合に ConfigError を返します。
pub fn set_token_file_permissions(file_path: &Path) -> Result<(), ConfigError> {
    if !file_path.exists() {
        return Err(ConfigError::file_system(
            format!("Config file not found: {}", file_path.display()),
            std::io::Error::new(std::io::ErrorKind::NotFound, "File does not exist"),
        ));
    }

    #[cfg(unix)]
    {
        set_unix_permissions(file_path)
    }

    #[cfg(not(unix))]
    {
        // Windows ではユーザープロファイル配下の既定ACLが所有者限定
        Ok(())
    }
}

#[cfg(unix)]
fn set_unix_permissions(file_path: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;

    let permissions = std::fs::Permissions::from_mode(0o600);
    std::fs::set_permissions(file_path, permissions).map_err(|e| {
        ConfigError::file_system(
            format!(
                "Failed to set permissions (0600) for config file: {}",
                file_path.display()
            ),
            e,
        )
    })
}
