//! Remote collaborator contracts.
//!
//! The editor never talks HTTP directly; it is handed implementations of
//! these traits by the application root. Futures are boxed and non-Send so
//! the same contracts work on the browser event loop and on native hosts.

use crate::snapshot::Snapshot;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future for async collaborator operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Errors surfaced by remote collaborators.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("unexpected response: {0}")]
    Response(String),
}

/// Result type for collaborator operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Payload for a remote project update.
///
/// `content` is the structured snapshot document, never its string encoding.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateProject {
    pub id: String,
    pub content: Snapshot,
}

/// Remote persistence collaborator used by autosave.
pub trait ProjectApi {
    /// Persist the given snapshot as the current content of a project.
    fn update(&self, request: UpdateProject) -> BoxFuture<'_, ApiResult<()>>;
}

/// A file picked by the user, as raw bytes.
#[derive(Debug, Clone)]
pub struct FileData {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Payload for an image upload.
#[derive(Debug, Clone)]
pub struct UploadImage {
    pub file: FileData,
}

/// Response from an image upload: where the image now lives.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedImage {
    pub url: String,
}

/// Image hosting collaborator used by the image tool.
pub trait ImageApi {
    fn upload(&self, request: UploadImage) -> BoxFuture<'_, ApiResult<UploadedImage>>;
}

/// Payload for exporting a project to the user's cloud drive.
#[derive(Debug, Clone, Serialize)]
pub struct UploadDriveProject {
    pub access_token: String,
    /// JSON string of `{ metadata: { title, createdAt }, snapshot }`.
    pub project: String,
}

/// Response from a cloud-drive export.
#[derive(Debug, Clone, Deserialize)]
pub struct DriveFile {
    pub file_name: String,
}

/// Cloud-drive export collaborator.
pub trait DriveApi {
    fn upload_project(&self, request: UploadDriveProject) -> BoxFuture<'_, ApiResult<DriveFile>>;
}
