//! Cloudflare Stream の薄いクライアント
//!
//! TUS プロトコルでのアップロード、状態取得、削除、埋め込みコード取得、
//! 再生オリジンの制限、署名付きURLの必須化を提供する。
//!
//! ```no_run
//! use cfstream::{Credentials, StreamClient};
//!
//! # async fn run() -> Result<(), cfstream::StreamError> {
//! let credentials = Credentials::new("api-key", "me@example.com", "account-id", "")?;
//! let client = StreamClient::new(credentials)?;
//!
//! let location = client.upload("/tmp/video.mp4").await?;
//! client.allow(location.as_str(), "example.com").await?;
//! # Ok(())
//! # }
//! ```
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error_severity;
pub mod presentation;

pub use api::{Credentials, ResourceLocation, StreamClient, StreamError, StreamResult, UploadHandle};
