/// API通信用の型定義
///
/// TUS ヘッダー、作成されたリソースのURL、アップロード対象ファイル、
/// 設定変更リクエストのボディを定義します。
use crate::api::error::{StreamError, StreamResult};
use base64::{Engine as _, engine::general_purpose};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tokio::fs::File;

pub const TUS_RESUMABLE_HEADER: &str = "Tus-Resumable";
pub const UPLOAD_LENGTH_HEADER: &str = "Upload-Length";
pub const UPLOAD_METADATA_HEADER: &str = "Upload-Metadata";
pub const UPLOAD_OFFSET_HEADER: &str = "Upload-Offset";

/// PATCH ボディの Content-Type
pub const OFFSET_OCTET_STREAM: &str = "application/offset+octet-stream";

/// Upload-Metadata ヘッダーの値を生成
///
/// TUS の仕様どおり `<key> <base64(value)>` 形式。
pub fn upload_metadata(file_name: &str) -> String {
    format!(
        "filename {}",
        general_purpose::STANDARD.encode(file_name.as_bytes())
    )
}

/// リソースURLの末尾セグメント（動画のuid）を取り出す
///
/// クエリ/フラグメントと末尾の `/` は無視する。
pub fn resource_uid(resource_url: &str) -> &str {
    let without_query = resource_url
        .split(['?', '#'])
        .next()
        .unwrap_or(resource_url)
        .trim_end_matches('/');

    without_query
        .rsplit('/')
        .next()
        .unwrap_or(without_query)
}

/// 作成された動画リソースのURL（Location ヘッダー）
///
/// 不透明なハンドルとして扱い、uid の抽出以外の解釈はしない。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ResourceLocation(String);

impl ResourceLocation {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 動画のuid
    pub fn uid(&self) -> &str {
        resource_uid(&self.0)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResourceLocation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// 1回のアップロードの間だけ有効な、開かれたファイルとそのサイズ
#[derive(Debug)]
pub struct UploadHandle {
    file: File,
    size: u64,
    file_name: String,
}

impl UploadHandle {
    /// ファイルを開いてサイズとファイル名を取得する
    ///
    /// # Errors
    /// 開けない、ディレクトリである、ファイル名が取れない場合に `StreamError::InvalidFile`
    pub async fn open(path: impl AsRef<Path>) -> StreamResult<Self> {
        let path = path.as_ref();

        let file = File::open(path).await.map_err(|e| {
            StreamError::invalid_file(format!("cannot open {}: {}", path.display(), e))
        })?;

        let metadata = file.metadata().await.map_err(|e| {
            StreamError::invalid_file(format!("cannot stat {}: {}", path.display(), e))
        })?;

        if metadata.is_dir() {
            return Err(StreamError::invalid_file(format!(
                "'{}' is a directory, not a file",
                path.display()
            )));
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                StreamError::invalid_file(format!("'{}' has no file name", path.display()))
            })?;

        Ok(Self {
            file,
            size: metadata.len(),
            file_name,
        })
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub(crate) fn into_file(self) -> File {
        self.file
    }
}

/// 再生を許可するオリジンの設定
#[derive(Debug, Serialize)]
pub struct AllowedOriginsRequest<'a> {
    pub uid: &'a str,
    #[serde(rename = "allowedOrigins")]
    pub allowed_origins: Vec<&'a str>,
}

/// 署名付きURLの必須化
#[derive(Debug, Serialize)]
pub struct RequireSignedUrlsRequest<'a> {
    pub uid: &'a str,
    #[serde(rename = "requireSignedURLs")]
    pub require_signed_urls: bool,
}
