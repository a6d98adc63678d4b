pub mod toml_config;

pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "boxmatch")]
#[command(about = "Match warehouse products to the smallest package that fits them")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Catalog URL or local file path (overrides the config file)
    #[arg(long)]
    pub source: Option<String>,

    /// HTTP timeout for downloading the catalog
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Interactive session (default)
    Shell,
    /// Show the catalog, the packages and the audit report
    View,
    /// Run the data quality audit
    Audit {
        #[arg(long)]
        json: bool,
    },
    /// List the built-in packages
    Packages,
    /// Recommend the smallest package for a product quantity
    Recommend(RecommendArgs),
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct RecommendArgs {
    #[arg(long)]
    pub code: String,

    #[arg(long, default_value = "1")]
    pub quantity: i64,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the config file (or defaults) and applies command-line overrides on top.
    pub fn resolve(&self) -> crate::utils::error::Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(source) = &self.source {
            config.source.endpoint = source.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.source.timeout_seconds = timeout;
        }
        if self.log_json {
            config.logging.json = true;
        }

        Ok(config)
    }
}
