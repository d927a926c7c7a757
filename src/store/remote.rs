//! HTTP implementation of [`RemoteStore`] against the hosted store's REST
//! API. Documents travel as JSON; file uploads use multipart with the
//! byte size declared up front.

use reqwest::multipart;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{Document, DocumentList, FileList, FileUpload, RemoteStore, StoreError, StoredFile};
use crate::config::Config;

/// HTTP client for the remote store.
///
/// Construct once at process start from the loaded [`Config`] and pass by
/// reference to everything that talks to the store; dropping it tears down
/// the connection pool.
pub struct HttpStore {
    http: reqwest::Client,
    endpoint: String,
    project_id: String,
    api_key: String,
    database_id: String,
    bucket_id: String,
}

#[derive(Deserialize)]
struct WireDocument {
    #[serde(rename = "$id")]
    id: String,
}

#[derive(Deserialize)]
struct WireDocumentList {
    total: usize,
    documents: Vec<WireDocument>,
}

#[derive(Deserialize)]
struct WireFile {
    #[serde(rename = "$id")]
    id: String,
}

#[derive(Deserialize)]
struct WireFileList {
    total: usize,
    files: Vec<WireFile>,
}

#[derive(Deserialize)]
struct WireError {
    message: String,
}

impl HttpStore {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            api_key: config.api_key.clone(),
            database_id: config.database_id.clone(),
            bucket_id: config.bucket_id.clone(),
        }
    }

    fn documents_url(&self, collection: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint, self.database_id, collection
        )
    }

    fn files_url(&self) -> String {
        format!("{}/storage/buckets/{}/files", self.endpoint, self.bucket_id)
    }

    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("X-Appwrite-Project", &self.project_id)
            .header("X-Appwrite-Key", &self.api_key)
    }

    /// Turns a non-success response into a `StoreError::Api`, keeping the
    /// server's message when the body carries one.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = match response.json::<WireError>().await {
            Ok(e) => e.message,
            Err(_) => status.to_string(),
        };
        Err(StoreError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl RemoteStore for HttpStore {
    async fn list_documents(&self, collection: &str) -> Result<DocumentList, StoreError> {
        let response = self
            .request(reqwest::Method::GET, self.documents_url(collection))
            .send()
            .await?;
        let list: WireDocumentList = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;
        Ok(DocumentList {
            total: list.total,
            documents: list
                .documents
                .into_iter()
                .map(|d| Document { id: d.id })
                .collect(),
        })
    }

    async fn create_document(
        &self,
        collection: &str,
        id: &str,
        fields: Value,
    ) -> Result<Document, StoreError> {
        let response = self
            .request(reqwest::Method::POST, self.documents_url(collection))
            .json(&json!({ "documentId": id, "data": fields }))
            .send()
            .await?;
        let doc: WireDocument = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;
        Ok(Document { id: doc.id })
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let url = format!("{}/{}", self.documents_url(collection), id);
        let response = self.request(reqwest::Method::DELETE, url).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn list_files(&self) -> Result<FileList, StoreError> {
        let response = self
            .request(reqwest::Method::GET, self.files_url())
            .send()
            .await?;
        let list: WireFileList = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;
        Ok(FileList {
            total: list.total,
            files: list
                .files
                .into_iter()
                .map(|f| StoredFile { id: f.id })
                .collect(),
        })
    }

    async fn delete_file(&self, id: &str) -> Result<(), StoreError> {
        let url = format!("{}/{}", self.files_url(), id);
        let response = self.request(reqwest::Method::DELETE, url).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn create_file(&self, id: &str, upload: &FileUpload) -> Result<StoredFile, StoreError> {
        let bytes = tokio::fs::read(&upload.path)
            .await
            .map_err(|e| StoreError::Io(upload.path.clone(), e))?;
        let part = multipart::Part::stream_with_length(reqwest::Body::from(bytes), upload.size)
            .file_name(upload.name.clone())
            .mime_str(&upload.content_type)?;
        let form = multipart::Form::new()
            .text("fileId", id.to_string())
            .part("file", part);

        let response = self
            .request(reqwest::Method::POST, self.files_url())
            .multipart(form)
            .send()
            .await?;
        let file: WireFile = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;
        Ok(StoredFile { id: file.id })
    }

    fn file_view_url(&self, id: &str) -> String {
        format!(
            "{}/storage/buckets/{}/files/{}/view?project={}",
            self.endpoint, self.bucket_id, id, self.project_id
        )
    }
}
