//! Remote document/file store client.
//!
//! The store is an external hosted service exposing document CRUD over
//! named collections and file CRUD over a bucket. The [`RemoteStore`]
//! trait captures exactly the surface the seeding core needs; the HTTP
//! implementation lives in [`remote`].

mod remote;

pub use remote::HttpStore;

use serde_json::Value;
use std::path::PathBuf;

/// A document as returned by the store. Only the generated identifier is
/// needed by callers; the remaining fields are echoes of what was sent.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
}

#[derive(Debug, Clone)]
pub struct DocumentList {
    pub total: usize,
    pub documents: Vec<Document>,
}

/// A file stored in the bucket.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub id: String,
}

#[derive(Debug, Clone)]
pub struct FileList {
    pub total: usize,
    pub files: Vec<StoredFile>,
}

/// A local file to be uploaded to the bucket. The size must be measured
/// before upload; the store requires it declared up front.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub path: PathBuf,
    pub name: String,
    pub content_type: String,
    pub size: u64,
}

/// Client surface over the remote store.
///
/// Implemented over HTTP by [`HttpStore`] and by an in-memory double in
/// tests. All methods map one call to one remote request; there are no
/// retries or timeouts at this layer.
#[allow(async_fn_in_trait)]
pub trait RemoteStore {
    async fn list_documents(&self, collection: &str) -> Result<DocumentList, StoreError>;

    /// Creates a document with a caller-supplied identifier and returns the
    /// stored document.
    async fn create_document(
        &self,
        collection: &str,
        id: &str,
        fields: Value,
    ) -> Result<Document, StoreError>;

    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    async fn list_files(&self) -> Result<FileList, StoreError>;

    async fn delete_file(&self, id: &str) -> Result<(), StoreError>;

    async fn create_file(&self, id: &str, upload: &FileUpload) -> Result<StoredFile, StoreError>;

    /// Durable, publicly viewable URL for an uploaded file.
    fn file_view_url(&self, id: &str) -> String;
}

/// Errors from the remote store client.
#[derive(Debug)]
pub enum StoreError {
    /// Transport-level failure (connection, TLS, request build).
    Http(reqwest::Error),
    /// The store answered with a non-success status.
    Api { status: u16, message: String },
    /// The store answered 2xx but the body did not match the contract.
    InvalidResponse(String),
    /// Local I/O failure while reading a file staged for upload.
    Io(PathBuf, std::io::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Http(e) => write!(f, "HTTP error: {}", e),
            StoreError::Api { status, message } => {
                write!(f, "Store error ({}): {}", status, message)
            }
            StoreError::InvalidResponse(e) => write!(f, "Invalid store response: {}", e),
            StoreError::Io(path, e) => {
                write!(f, "I/O error for {}: {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Http(e) => Some(e),
            StoreError::Io(_, e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        StoreError::Http(e)
    }
}
