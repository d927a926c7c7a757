//! The `seed` command: wipe the remote store and recreate the reference
//! dataset.

use clap::Args;

use crate::config::Config;
use crate::models::Dataset;
use crate::seed::Reconciler;
use crate::store::RemoteStore;

/// Wipe the remote store and reseed it from the embedded dataset
#[derive(Debug, Args)]
pub struct SeedCommand {}

impl SeedCommand {
    pub async fn run<S: RemoteStore>(
        &self,
        store: &S,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let dataset = Dataset::reference();
        println!(
            "Seeding {} (database '{}', bucket '{}')...",
            config.endpoint, config.database_id, config.bucket_id
        );
        println!();

        let reconciler = Reconciler::new(store, &dataset, config);
        let report = match reconciler.run().await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!("seeding failed: {}", e);
                println!("Seeding failed.");
                return Err(e.into());
            }
        };

        println!(
            "  ✓ wiped {} document{} and {} file{}",
            report.documents_deleted,
            plural(report.documents_deleted),
            report.files_deleted,
            plural(report.files_deleted)
        );
        println!("  ✓ {} categories", report.categories);
        println!("  ✓ {} customizations", report.customizations);
        println!(
            "  ✓ {} menu items ({} images uploaded)",
            report.menu_items, report.images_uploaded
        );
        println!(
            "  ✓ {} customization links ({} skipped)",
            report.links, report.links_skipped
        );
        println!();
        println!("Seeding complete.");

        Ok(())
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
