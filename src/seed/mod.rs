//! The seeding core: wipes the remote store and recreates the reference
//! dataset, re-hosting menu item images in the file bucket.

mod image;
mod reconciler;

pub use image::ImageMaterializer;
pub use reconciler::{Reconciler, SeedReport};

use crate::store::StoreError;
use std::path::PathBuf;

/// Errors that abort a seeding run.
///
/// Everything here is fatal: there is no checkpointing or resumption, and
/// a failed run can leave the store partially wiped and partially
/// repopulated. The only recovered condition, an unknown customization
/// name on a menu item, is logged and skipped without surfacing here.
#[derive(Debug)]
pub enum SeedError {
    /// An image download did not complete with a success status.
    Download { url: String, reason: String },
    /// A downloaded image is missing or empty on disk.
    MissingFile(PathBuf),
    /// A menu item references a category name not present in the dataset.
    UnknownCategory { item: String, category: String },
    /// Any remote store call failed.
    Store(StoreError),
}

impl std::fmt::Display for SeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedError::Download { url, reason } => {
                write!(f, "Image download failed for '{}': {}", url, reason)
            }
            SeedError::MissingFile(path) => {
                write!(f, "Downloaded file not found: {}", path.display())
            }
            SeedError::UnknownCategory { item, category } => {
                write!(
                    f,
                    "Menu item '{}' references unknown category '{}'",
                    item, category
                )
            }
            SeedError::Store(e) => write!(f, "Store error: {}", e),
        }
    }
}

impl std::error::Error for SeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SeedError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for SeedError {
    fn from(e: StoreError) -> Self {
        SeedError::Store(e)
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    //! Shared fixtures: a local HTTP server for image downloads and an
    //! in-memory store double recording calls.

    use crate::store::{
        Document, DocumentList, FileList, FileUpload, RemoteStore, StoreError, StoredFile,
    };
    use axum::http::{header, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use serde_json::Value;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves `/images/{name}` with PNG-ish bytes and `/broken/{name}`
    /// with a 500. Returns the base URL.
    pub async fn spawn_image_server() -> String {
        let app = Router::new()
            .route(
                "/images/{name}",
                get(|| async {
                    (
                        [(header::CONTENT_TYPE, "image/png")],
                        vec![0x89u8, 0x50, 0x4e, 0x47, 0, 0, 0, 0],
                    )
                }),
            )
            .route(
                "/broken/{name}",
                get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// In-memory store double. Documents and files live in maps; every
    /// delete is counted so tests can assert the wipe phase's behavior.
    #[derive(Default)]
    pub struct MockStore {
        pub documents: Mutex<HashMap<String, Vec<(String, Value)>>>,
        pub files: Mutex<Vec<String>>,
        pub delete_calls: Mutex<usize>,
    }

    impl MockStore {
        pub fn document_count(&self, collection: &str) -> usize {
            self.documents
                .lock()
                .unwrap()
                .get(collection)
                .map(|docs| docs.len())
                .unwrap_or(0)
        }

        pub fn documents_in(&self, collection: &str) -> Vec<(String, Value)> {
            self.documents
                .lock()
                .unwrap()
                .get(collection)
                .cloned()
                .unwrap_or_default()
        }

        pub fn delete_calls(&self) -> usize {
            *self.delete_calls.lock().unwrap()
        }

        pub fn file_count(&self) -> usize {
            self.files.lock().unwrap().len()
        }
    }

    impl RemoteStore for MockStore {
        async fn list_documents(&self, collection: &str) -> Result<DocumentList, StoreError> {
            let documents: Vec<Document> = self
                .documents
                .lock()
                .unwrap()
                .get(collection)
                .map(|docs| {
                    docs.iter()
                        .map(|(id, _)| Document { id: id.clone() })
                        .collect()
                })
                .unwrap_or_default();
            Ok(DocumentList {
                total: documents.len(),
                documents,
            })
        }

        async fn create_document(
            &self,
            collection: &str,
            id: &str,
            fields: Value,
        ) -> Result<Document, StoreError> {
            self.documents
                .lock()
                .unwrap()
                .entry(collection.to_string())
                .or_default()
                .push((id.to_string(), fields));
            Ok(Document { id: id.to_string() })
        }

        async fn delete_document(&self, collection: &str, id: &str) -> Result<(), StoreError> {
            *self.delete_calls.lock().unwrap() += 1;
            let mut documents = self.documents.lock().unwrap();
            if let Some(docs) = documents.get_mut(collection) {
                docs.retain(|(doc_id, _)| doc_id != id);
            }
            Ok(())
        }

        async fn list_files(&self) -> Result<FileList, StoreError> {
            let files: Vec<StoredFile> = self
                .files
                .lock()
                .unwrap()
                .iter()
                .map(|id| StoredFile { id: id.clone() })
                .collect();
            Ok(FileList {
                total: files.len(),
                files,
            })
        }

        async fn delete_file(&self, id: &str) -> Result<(), StoreError> {
            *self.delete_calls.lock().unwrap() += 1;
            self.files.lock().unwrap().retain(|file_id| file_id != id);
            Ok(())
        }

        async fn create_file(
            &self,
            id: &str,
            _upload: &FileUpload,
        ) -> Result<StoredFile, StoreError> {
            self.files.lock().unwrap().push(id.to_string());
            Ok(StoredFile { id: id.to_string() })
        }

        fn file_view_url(&self, id: &str) -> String {
            format!("mock://files/{}/view", id)
        }
    }
}
