//! Full wipe-and-recreate reconciliation of the remote store against the
//! reference dataset.
//!
//! Phases run strictly in order: wipe, categories, customizations, menu.
//! Later phases consume the name-to-identifier maps built by earlier
//! ones. Deletions within the wipe phase fan out concurrently; everything
//! else is sequential. There is no rollback: a failure mid-run leaves the
//! store partially wiped or partially repopulated.

use futures::future::try_join_all;
use serde_json::json;
use std::collections::HashMap;
use uuid::Uuid;

use super::{ImageMaterializer, SeedError};
use crate::config::Config;
use crate::models::Dataset;
use crate::store::RemoteStore;

/// Outcome of a successful seeding run, reported across the CLI boundary
/// instead of loose log output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub documents_deleted: usize,
    pub files_deleted: usize,
    pub categories: usize,
    pub customizations: usize,
    pub menu_items: usize,
    pub images_uploaded: usize,
    pub links: usize,
    pub links_skipped: usize,
}

/// Names of the four seeded collections, taken from configuration.
#[derive(Debug, Clone)]
struct Collections {
    categories: String,
    customizations: String,
    menu: String,
    menu_customizations: String,
}

/// Drives a full seeding run against a remote store.
///
/// Assumes it is the sole writer for the duration of the run; concurrent
/// runs against the same store are unsupported.
pub struct Reconciler<'a, S> {
    store: &'a S,
    images: ImageMaterializer<'a, S>,
    dataset: &'a Dataset,
    collections: Collections,
}

impl<'a, S: RemoteStore> Reconciler<'a, S> {
    pub fn new(store: &'a S, dataset: &'a Dataset, config: &Config) -> Self {
        Self {
            store,
            images: ImageMaterializer::new(store, config.cache_dir.clone()),
            dataset,
            collections: Collections {
                categories: config.categories_collection.clone(),
                customizations: config.customizations_collection.clone(),
                menu: config.menu_collection.clone(),
                menu_customizations: config.menu_customizations_collection.clone(),
            },
        }
    }

    /// Runs the full wipe-and-recreate cycle.
    ///
    /// Category references are validated before anything is touched, so a
    /// dataset with a dangling category name fails the run without
    /// destroying existing store state.
    pub async fn run(&self) -> Result<SeedReport, SeedError> {
        self.check_category_refs()?;

        let mut report = SeedReport::default();

        tracing::info!("wipe phase");
        self.wipe(&mut report).await?;

        tracing::info!("category phase");
        let category_ids = self.create_categories(&mut report).await?;

        tracing::info!("customization phase");
        let customization_ids = self.create_customizations(&mut report).await?;

        tracing::info!("menu phase");
        self.create_menu(&category_ids, &customization_ids, &mut report)
            .await?;

        tracing::info!(
            categories = report.categories,
            customizations = report.customizations,
            menu_items = report.menu_items,
            links = report.links,
            "seeding complete"
        );
        Ok(report)
    }

    fn check_category_refs(&self) -> Result<(), SeedError> {
        if let Some((item, category)) = self.dataset.unresolved_category_refs().into_iter().next()
        {
            return Err(SeedError::UnknownCategory {
                item: item.name.clone(),
                category: category.to_string(),
            });
        }
        Ok(())
    }

    /// Clears the four collections and the file bucket. Sibling deletions
    /// are issued concurrently and all awaited before returning.
    async fn wipe(&self, report: &mut SeedReport) -> Result<(), SeedError> {
        for collection in [
            &self.collections.categories,
            &self.collections.customizations,
            &self.collections.menu,
            &self.collections.menu_customizations,
        ] {
            report.documents_deleted += self.clear_collection(collection).await?;
        }
        report.files_deleted = self.clear_bucket().await?;
        Ok(())
    }

    async fn clear_collection(&self, collection: &str) -> Result<usize, SeedError> {
        let list = self.store.list_documents(collection).await?;
        if list.total == 0 {
            tracing::info!(collection, "collection already empty");
            return Ok(0);
        }

        try_join_all(
            list.documents
                .iter()
                .map(|doc| self.store.delete_document(collection, &doc.id)),
        )
        .await?;
        tracing::info!(collection, deleted = list.documents.len(), "collection cleared");
        Ok(list.documents.len())
    }

    async fn clear_bucket(&self) -> Result<usize, SeedError> {
        let list = self.store.list_files().await?;
        if list.total == 0 {
            tracing::info!("bucket already empty");
            return Ok(0);
        }

        try_join_all(list.files.iter().map(|file| self.store.delete_file(&file.id))).await?;
        tracing::info!(deleted = list.files.len(), "bucket cleared");
        Ok(list.files.len())
    }

    async fn create_categories(
        &self,
        report: &mut SeedReport,
    ) -> Result<HashMap<String, String>, SeedError> {
        let mut ids = HashMap::new();
        for category in &self.dataset.categories {
            let doc = self
                .store
                .create_document(
                    &self.collections.categories,
                    &new_id(),
                    json!({
                        "name": category.name,
                        "description": category.description,
                    }),
                )
                .await?;
            tracing::info!(name = %category.name, id = %doc.id, "created category");
            ids.insert(category.name.clone(), doc.id);
            report.categories += 1;
        }
        Ok(ids)
    }

    async fn create_customizations(
        &self,
        report: &mut SeedReport,
    ) -> Result<HashMap<String, String>, SeedError> {
        let mut ids = HashMap::new();
        for customization in &self.dataset.customizations {
            let doc = self
                .store
                .create_document(
                    &self.collections.customizations,
                    &new_id(),
                    json!({
                        "name": customization.name,
                        "price": customization.price,
                        "type": customization.kind.as_str(),
                    }),
                )
                .await?;
            tracing::info!(name = %customization.name, id = %doc.id, "created customization");
            ids.insert(customization.name.clone(), doc.id);
            report.customizations += 1;
        }
        Ok(ids)
    }

    /// Creates menu items one at a time: image first, then the document,
    /// then one link document per resolvable customization name. Unknown
    /// customization names are skipped with a warning; everything else is
    /// fatal.
    async fn create_menu(
        &self,
        category_ids: &HashMap<String, String>,
        customization_ids: &HashMap<String, String>,
        report: &mut SeedReport,
    ) -> Result<(), SeedError> {
        for item in &self.dataset.menu {
            tracing::info!(name = %item.name, "processing menu item");

            let hosted_url = self.images.materialize(&item.image_url).await?;
            report.images_uploaded += 1;

            let category_id = category_ids.get(&item.category_name).ok_or_else(|| {
                SeedError::UnknownCategory {
                    item: item.name.clone(),
                    category: item.category_name.clone(),
                }
            })?;

            let doc = self
                .store
                .create_document(
                    &self.collections.menu,
                    &new_id(),
                    json!({
                        "name": item.name,
                        "description": item.description,
                        "image_url": hosted_url,
                        "price": item.price,
                        "rating": item.rating,
                        "calories": item.calories,
                        "protein": item.protein,
                        "categories": category_id,
                    }),
                )
                .await?;
            tracing::info!(name = %item.name, id = %doc.id, "created menu item");
            report.menu_items += 1;

            for customization_name in &item.customizations {
                match customization_ids.get(customization_name) {
                    Some(customization_id) => {
                        self.store
                            .create_document(
                                &self.collections.menu_customizations,
                                &new_id(),
                                json!({
                                    "menu": doc.id,
                                    "customizations": customization_id,
                                }),
                            )
                            .await?;
                        report.links += 1;
                    }
                    None => {
                        tracing::warn!(
                            item = %item.name,
                            customization = %customization_name,
                            "unknown customization, skipping link"
                        );
                        report.links_skipped += 1;
                    }
                }
            }
        }
        Ok(())
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}
