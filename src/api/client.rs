/// Cloudflare Stream クライアント
///
/// 検証済みの認証情報と再利用可能な HTTP クライアントを保持し、
/// アップロード・状態取得・削除・埋め込みコード取得・オリジン制限・
/// 署名付きURL必須化の各操作を提供します。
///
/// 各操作は独立しており、1回（upload のみ2回）のリクエストを順に送って
/// 期待したステータスコードかどうかだけを判定します。リトライは行いません。
use crate::api::auth::Credentials;
use crate::api::error::{StreamError, StreamResult};
use crate::api::types::{
    AllowedOriginsRequest, OFFSET_OCTET_STREAM, RequireSignedUrlsRequest, ResourceLocation,
    TUS_RESUMABLE_HEADER, UPLOAD_LENGTH_HEADER, UPLOAD_METADATA_HEADER, UPLOAD_OFFSET_HEADER,
    UploadHandle, resource_uid, upload_metadata,
};
use crate::config::{APP_CONFIG, AuthConfig};
use crate::domain::progress::{UploadPhase, UploadProgress};
use crate::domain::validator;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use reqwest::{Body, Client, RequestBuilder, Response, StatusCode};
use std::path::Path;
use std::time::Duration;
use tokio_util::io::ReaderStream;
use tracing::{debug, info, warn};

/// Cloudflare Stream API クライアント
#[derive(Debug, Clone)]
pub struct StreamClient {
    http: Client,
    credentials: Credentials,
    base_url: String,
}

impl StreamClient {
    /// プロダクションのエンドポイントを使うクライアントを作成
    pub fn new(credentials: Credentials) -> StreamResult<Self> {
        Self::with_base_url(credentials, APP_CONFIG.api.endpoint)
    }

    /// 任意のAPIルートを使うクライアントを作成
    ///
    /// # Arguments
    /// * `base_url` - 例: "https://api.cloudflare.com/client/v4"
    pub fn with_base_url(credentials: Credentials, base_url: impl Into<String>) -> StreamResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(APP_CONFIG.api.timeout_seconds))
            .build()
            .map_err(|e| StreamError::transport("build HTTP client", e))?;

        Ok(Self {
            http,
            credentials,
            base_url: base_url.into(),
        })
    }

    /// 設定（ファイル/環境変数）から読み込んだ認証情報でクライアントを作成
    pub fn from_config(auth: &AuthConfig) -> StreamResult<Self> {
        Self::new(Credentials::from_config(auth)?)
    }

    /// 動画リソースの状態を取得
    ///
    /// レスポンスボディを汎用JSONとして返す。成功以外のステータスは
    /// `Transport` エラーとして扱う。
    pub async fn status(&self, resource_url: &str) -> StreamResult<serde_json::Value> {
        let operation = format!("GET {}", resource_url);
        let request = self.credentials.authorize(self.http.get(resource_url));

        let response = self
            .send(request, &operation)
            .await?
            .error_for_status()
            .map_err(|e| StreamError::transport(&operation, e))?;

        response
            .json()
            .await
            .map_err(|e| StreamError::transport(&operation, e))
    }

    /// ファイルをアップロードし、作成されたリソースのURLを返す
    ///
    /// リソース作成後にバイト送信が失敗した場合、作成済みのリソースは残る。
    pub async fn upload(&self, file_path: impl AsRef<Path>) -> StreamResult<ResourceLocation> {
        self.upload_with_progress(file_path, |_| {}).await
    }

    /// 進捗コールバック付きのアップロード
    pub async fn upload_with_progress<F>(
        &self,
        file_path: impl AsRef<Path>,
        mut on_progress: F,
    ) -> StreamResult<ResourceLocation>
    where
        F: FnMut(UploadProgress),
    {
        let handle = UploadHandle::open(file_path).await?;
        let file_name = handle.file_name().to_string();
        let size = handle.size();

        on_progress(UploadProgress::new(UploadPhase::FileOpened {
            file_name: file_name.clone(),
            size_bytes: size,
        }));

        on_progress(UploadProgress::new(UploadPhase::CreatingResource {
            file_name: file_name.clone(),
        }));
        let location = self.create_resource(&file_name, size).await?;
        on_progress(UploadProgress::new(UploadPhase::ResourceCreated {
            location: location.to_string(),
        }));

        on_progress(UploadProgress::new(UploadPhase::SendingBytes {
            location: location.to_string(),
            size_bytes: size,
        }));
        self.send_bytes(&location, handle).await?;
        on_progress(UploadProgress::new(UploadPhase::Completed {
            location: location.to_string(),
        }));

        info!(%location, file = %file_name, size, "upload completed");
        Ok(location)
    }

    /// TUS のアップロードリソースを作成（POST）
    ///
    /// 201 Created と Location ヘッダーを要求する。
    pub async fn create_resource(
        &self,
        file_name: &str,
        file_size: u64,
    ) -> StreamResult<ResourceLocation> {
        validator::validate_resource_request(file_name, file_size)?;

        let url = self.credentials.scope().media_url(&self.base_url);
        let operation = format!("POST {}", url);

        let request = self
            .credentials
            .authorize(self.http.post(&url))
            .header(TUS_RESUMABLE_HEADER, APP_CONFIG.api.tus_version)
            .header(UPLOAD_LENGTH_HEADER, file_size)
            .header(UPLOAD_METADATA_HEADER, upload_metadata(file_name))
            .header(CONTENT_LENGTH, 0);

        let response = self.send(request, &operation).await?;
        let response = Self::expect_status(response, StatusCode::CREATED, &operation).await?;

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| StreamError::OperationFailed {
                operation: operation.clone(),
                expected: StatusCode::CREATED.as_u16(),
                status: StatusCode::CREATED.as_u16(),
                body: "response carried no Location header".to_string(),
            })?;

        // 相対パスで返された場合も絶対URLにしておく
        let location = response
            .url()
            .join(location)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| location.to_string());

        debug!(%location, "upload resource created");
        Ok(ResourceLocation::new(location))
    }

    /// ファイルの中身を一括送信（PATCH, Upload-Offset: 0）
    ///
    /// 途中再開はせず、常に先頭から全体を送る。204 No Content を要求する。
    pub async fn send_bytes(
        &self,
        location: &ResourceLocation,
        handle: UploadHandle,
    ) -> StreamResult<()> {
        let size = handle.size();
        if size == 0 {
            return Err(StreamError::invalid_file(format!(
                "'{}' is empty, nothing to send",
                handle.file_name()
            )));
        }

        let operation = format!("PATCH {}", location);
        let body = Body::wrap_stream(ReaderStream::new(handle.into_file()));

        let request = self
            .credentials
            .authorize(self.http.patch(location.as_str()))
            .header(TUS_RESUMABLE_HEADER, APP_CONFIG.api.tus_version)
            .header(UPLOAD_OFFSET_HEADER, 0)
            .header(CONTENT_TYPE, OFFSET_OCTET_STREAM)
            .header(CONTENT_LENGTH, size)
            .body(body);

        let response = self.send(request, &operation).await?;
        Self::expect_status(response, StatusCode::NO_CONTENT, &operation).await?;
        Ok(())
    }

    /// 動画を削除（204 No Content を要求）
    pub async fn delete(&self, resource_url: &str) -> StreamResult<()> {
        let operation = format!("DELETE {}", resource_url);
        let request = self
            .credentials
            .authorize(self.http.delete(resource_url))
            .header(CONTENT_LENGTH, 0);

        let response = self.send(request, &operation).await?;
        Self::expect_status(response, StatusCode::NO_CONTENT, &operation).await?;

        info!(resource = resource_url, "video deleted");
        Ok(())
    }

    /// 埋め込み用HTMLを取得
    pub async fn code(&self, resource_url: &str) -> StreamResult<String> {
        let url = format!("{}/embed", resource_url.trim_end_matches('/'));
        let operation = format!("GET {}", url);
        let request = self.credentials.authorize(self.http.get(&url));

        let response = self.send(request, &operation).await?;
        let response = Self::expect_status(response, StatusCode::OK, &operation).await?;

        response
            .text()
            .await
            .map_err(|e| StreamError::transport(&operation, e))
    }

    /// 再生を許可するオリジンを設定
    ///
    /// `origins` はホスト名1つとして扱い、カンマで分割しない。
    pub async fn allow(&self, resource_url: &str, origins: &str) -> StreamResult<()> {
        validator::validate_origin(origins)?;

        let body = AllowedOriginsRequest {
            uid: resource_uid(resource_url),
            allowed_origins: vec![origins],
        };
        self.post_settings(resource_url, &body).await?;

        info!(resource = resource_url, origins, "allowed origins updated");
        Ok(())
    }

    /// 再生に署名付きURLを必須にする
    pub async fn require_signed_urls(&self, resource_url: &str) -> StreamResult<()> {
        let body = RequireSignedUrlsRequest {
            uid: resource_uid(resource_url),
            require_signed_urls: true,
        };
        self.post_settings(resource_url, &body).await?;

        info!(resource = resource_url, "signed URLs required");
        Ok(())
    }

    /// 設定変更のJSONをPOSTし、200 OK を要求する
    async fn post_settings<T: serde::Serialize>(
        &self,
        resource_url: &str,
        body: &T,
    ) -> StreamResult<()> {
        let operation = format!("POST {}", resource_url);
        let request = self
            .credentials
            .authorize(self.http.post(resource_url))
            .json(body);

        let response = self.send(request, &operation).await?;
        Self::expect_status(response, StatusCode::OK, &operation).await?;
        Ok(())
    }

    /// リクエストを送信し、通信エラーを変換する
    async fn send(&self, request: RequestBuilder, operation: &str) -> StreamResult<Response> {
        debug!(operation, "sending request");
        request
            .send()
            .await
            .map_err(|e| StreamError::transport(operation, e))
    }

    /// ステータスコードが期待どおりか確認する
    async fn expect_status(
        response: Response,
        expected: StatusCode,
        operation: &str,
    ) -> StreamResult<Response> {
        let status = response.status();
        if status == expected {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error response".to_string());

        warn!(operation, %status, expected = %expected, "unexpected response status");
        Err(StreamError::OperationFailed {
            operation: operation.to_string(),
            expected: expected.as_u16(),
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials() -> Credentials {
        Credentials::new("k", "e@x.com", "acct1", "").unwrap()
    }

    fn client_for(server: &MockServer) -> StreamClient {
        StreamClient::with_base_url(credentials(), server.uri()).unwrap()
    }

    fn write_video(dir: &TempDir, content: &[u8]) -> std::path::PathBuf {
        let file_path = dir.path().join("video.mp4");
        std::fs::write(&file_path, content).unwrap();
        file_path
    }

    #[test]
    fn test_client_creation() {
        assert!(StreamClient::new(credentials()).is_ok());
    }

    #[test]
    fn test_from_config_rejects_invalid_credentials() {
        let auth = AuthConfig {
            key: "k".to_string(),
            email: "e@x.com".to_string(),
            account: String::new(),
            zone: String::new(),
        };
        assert!(matches!(
            StreamClient::from_config(&auth),
            Err(StreamError::InvalidCredentials { .. })
        ));
    }

    #[tokio::test]
    async fn test_upload_end_to_end() {
        let server = MockServer::start().await;
        let location = format!("{}/videoA", server.uri());

        Mock::given(method("POST"))
            .and(path("/accounts/acct1/media"))
            .and(header("X-Auth-Key", "k"))
            .and(header("X-Auth-Email", "e@x.com"))
            .and(header("Tus-Resumable", "1.0.0"))
            .and(header("Upload-Length", "10"))
            .and(header("Upload-Metadata", "filename dmlkZW8ubXA0"))
            .and(header("Content-Length", "0"))
            .respond_with(ResponseTemplate::new(201).insert_header("Location", location.as_str()))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("PATCH"))
            .and(path("/videoA"))
            .and(header("Upload-Offset", "0"))
            .and(header("Tus-Resumable", "1.0.0"))
            .and(header("Content-Type", "application/offset+octet-stream"))
            .and(header("Content-Length", "10"))
            .and(header("X-Auth-Key", "k"))
            .and(header("X-Auth-Email", "e@x.com"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let file_path = write_video(&dir, b"0123456789");

        let mut phases = Vec::new();
        let result = client_for(&server)
            .upload_with_progress(&file_path, |p| phases.push(p.phase))
            .await
            .unwrap();

        assert_eq!(result.as_str(), location);
        assert_eq!(result.uid(), "videoA");
        assert!(matches!(phases.last(), Some(UploadPhase::Completed { .. })));
        assert!(matches!(
            phases.first(),
            Some(UploadPhase::FileOpened { size_bytes: 10, .. })
        ));

        let requests = server.received_requests().await.unwrap();
        let patch = requests
            .iter()
            .find(|r| r.method.as_str() == "PATCH")
            .expect("PATCH request was sent");
        assert_eq!(patch.body, b"0123456789");
    }

    #[tokio::test]
    async fn test_zone_scoped_create_resource() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/zones/zone1/media"))
            .respond_with(
                ResponseTemplate::new(201).insert_header("Location", "https://upload.example/videoZ"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let credentials = Credentials::new("k", "e@x.com", "", "zone1").unwrap();
        let client = StreamClient::with_base_url(credentials, server.uri()).unwrap();

        let location = client.create_resource("video.mp4", 42).await.unwrap();
        assert_eq!(location.as_str(), "https://upload.example/videoZ");
    }

    #[tokio::test]
    async fn test_create_resource_validates_before_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(matches!(
            client.create_resource("", 100).await,
            Err(StreamError::InvalidFile { .. })
        ));
        assert!(matches!(
            client.create_resource("video.mp4", 0).await,
            Err(StreamError::InvalidFile { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_resource_requires_created() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).insert_header("Location", "https://upload.example/videoA"),
            )
            .mount(&server)
            .await;

        let result = client_for(&server).create_resource("video.mp4", 10).await;
        match result {
            Err(StreamError::OperationFailed {
                expected, status, ..
            }) => {
                assert_eq!(expected, 201);
                assert_eq!(status, 200);
            }
            other => panic!("Expected OperationFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_resource_without_location() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let result = client_for(&server).create_resource("video.mp4", 10).await;
        assert!(matches!(result, Err(StreamError::OperationFailed { .. })));
    }

    #[tokio::test]
    async fn test_send_bytes_requires_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let handle = UploadHandle::open(write_video(&dir, b"abc")).await.unwrap();
        let location = ResourceLocation::new(format!("{}/videoA", server.uri()));

        let result = client_for(&server).send_bytes(&location, handle).await;
        assert!(matches!(
            result,
            Err(StreamError::OperationFailed { status: 200, .. })
        ));
    }

    #[tokio::test]
    async fn test_upload_aborts_when_send_fails() {
        let server = MockServer::start().await;
        let location = format!("{}/videoA", server.uri());
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).insert_header("Location", location.as_str()))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let result = client_for(&server).upload(write_video(&dir, b"abc")).await;
        assert!(matches!(
            result,
            Err(StreamError::OperationFailed { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_upload_empty_file_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let result = client_for(&server).upload(write_video(&dir, b"")).await;
        assert!(matches!(result, Err(StreamError::InvalidFile { .. })));
    }

    #[tokio::test]
    async fn test_upload_missing_file() {
        let server = MockServer::start().await;
        let result = client_for(&server).upload("/nonexistent/video.mp4").await;
        assert!(matches!(result, Err(StreamError::InvalidFile { .. })));
    }

    #[tokio::test]
    async fn test_status_returns_json() {
        let server = MockServer::start().await;
        let body = json!({ "success": true, "result": { "uid": "videoA", "readyToStream": true } });
        Mock::given(method("GET"))
            .and(path("/videoA"))
            .and(header("X-Auth-Email", "e@x.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&server)
            .await;

        let status = client_for(&server)
            .status(&format!("{}/videoA", server.uri()))
            .await
            .unwrap();
        assert_eq!(status, body);
    }

    #[tokio::test]
    async fn test_status_surfaces_http_error_as_transport() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .status(&format!("{}/missing", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, StreamError::Transport { .. }));
        assert_eq!(err.status_code(), Some(404));
    }

    #[tokio::test]
    async fn test_delete_requires_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/videoA"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .delete(&format!("{}/videoA", server.uri()))
            .await;
        assert!(matches!(
            result,
            Err(StreamError::OperationFailed {
                expected: 204,
                status: 200,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_delete_success() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/videoA"))
            .and(header("X-Auth-Key", "k"))
            .and(header("X-Auth-Email", "e@x.com"))
            .and(header("Content-Length", "0"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .delete(&format!("{}/videoA", server.uri()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_code_returns_embed_html() {
        let server = MockServer::start().await;
        let html = r#"<stream src="videoA"></stream>"#;
        Mock::given(method("GET"))
            .and(path("/videoA/embed"))
            .and(header("X-Auth-Key", "k"))
            .and(header("X-Auth-Email", "e@x.com"))
            .respond_with(ResponseTemplate::new(200).set_body_string(html))
            .mount(&server)
            .await;

        let code = client_for(&server)
            .code(&format!("{}/videoA", server.uri()))
            .await
            .unwrap();
        assert_eq!(code, html);
    }

    #[tokio::test]
    async fn test_code_requires_ok() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(202))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .code(&format!("{}/videoA", server.uri()))
            .await;
        assert!(matches!(
            result,
            Err(StreamError::OperationFailed { status: 202, .. })
        ));
    }

    #[tokio::test]
    async fn test_allow_sends_single_origin_entry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/videoA"))
            .and(header("X-Auth-Key", "k"))
            .and(header("X-Auth-Email", "e@x.com"))
            .and(body_json(json!({ "uid": "videoA", "allowedOrigins": ["a.com,b.com"] })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .allow(&format!("{}/videoA", server.uri()), "a.com,b.com")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_allow_rejects_path_separator_without_request() {
        let server = MockServer::start().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .allow(&format!("{}/videoA", server.uri()), "https://a.com")
            .await;
        assert!(matches!(result, Err(StreamError::InvalidOrigins { .. })));
    }

    #[tokio::test]
    async fn test_require_signed_urls() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/videoA"))
            .and(header("X-Auth-Key", "k"))
            .and(header("X-Auth-Email", "e@x.com"))
            .and(body_json(json!({ "uid": "videoA", "requireSignedURLs": true })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .require_signed_urls(&format!("{}/videoA", server.uri()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_require_signed_urls_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .require_signed_urls(&format!("{}/videoA", server.uri()))
            .await
            .unwrap_err();
        match err {
            StreamError::OperationFailed { status, body, .. } => {
                assert_eq!(status, 403);
                assert_eq!(body, "forbidden");
            }
            other => panic!("Expected OperationFailed, got {:?}", other),
        }
    }
}
