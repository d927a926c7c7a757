//! The `status` command: read-only counts of what the store currently
//! holds, useful before deciding to reseed.

use clap::Args;

use crate::config::Config;
use crate::store::RemoteStore;

/// Show live document and file counts for the seeded collections
#[derive(Debug, Args)]
pub struct StatusCommand {}

impl StatusCommand {
    pub async fn run<S: RemoteStore>(
        &self,
        store: &S,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        println!("Store Status");
        println!("============");
        println!();
        println!("Endpoint: {}", config.endpoint);
        println!("Database: {}", config.database_id);
        println!();

        for collection in [
            &config.categories_collection,
            &config.customizations_collection,
            &config.menu_collection,
            &config.menu_customizations_collection,
        ] {
            let list = store.list_documents(collection).await?;
            println!("  {}: {} document(s)", collection, list.total);
        }

        let files = store.list_files().await?;
        println!("  {} (bucket): {} file(s)", config.bucket_id, files.total);

        Ok(())
    }
}
