use clap::{Args, Subcommand, ValueEnum};

use crate::config::Config;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values (API key redacted)
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                let redacted = config.redacted();
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&redacted)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        println!("Config file: {}", Config::default_config_path().display());
                        println!();

                        println!("endpoint: {}", redacted.endpoint);
                        println!("project_id: {}", redacted.project_id);
                        println!(
                            "api_key: {}",
                            if redacted.api_key.is_empty() {
                                "(not set)"
                            } else {
                                redacted.api_key.as_str()
                            }
                        );
                        println!("database_id: {}", redacted.database_id);
                        println!("bucket_id: {}", redacted.bucket_id);
                        println!("collections:");
                        println!("  categories: {}", redacted.categories_collection);
                        println!("  customizations: {}", redacted.customizations_collection);
                        println!("  menu: {}", redacted.menu_collection);
                        println!(
                            "  menu_customizations: {}",
                            redacted.menu_customizations_collection
                        );
                        println!("cache_dir: {}", redacted.cache_dir.display());
                    }
                }
                Ok(())
            }
        }
    }
}
