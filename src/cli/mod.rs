//! Command-line definition
//!
//! Every option is backed by an environment variable, so a bare `swagsync`
//! invocation runs the whole sync. Flags only override the environment.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::{Config, DEFAULT_API_BASE_URL, DEFAULT_OUTPUT_FILE, DEFAULT_TIMEOUT_SECS};
use crate::convert::FolderStrategy;

pub mod sync;

/// Sync a Postman collection with a service's OpenAPI document
#[derive(Parser, Debug)]
#[command(name = "swagsync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// URL of the OpenAPI/Swagger document
    #[arg(long, env = "SWAGGER_URL", hide_env = true)]
    pub swagger_url: Option<String>,

    /// Postman API key
    #[arg(long, env = "POSTMAN_API_KEY", hide_env = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// UID of the collection to overwrite
    #[arg(long, env = "POSTMAN_COLLECTION_UID", hide_env = true)]
    pub collection_uid: Option<String>,

    /// Postman API base URL
    #[arg(
        long,
        env = "POSTMAN_API_BASE_URL",
        hide_env = true,
        default_value = DEFAULT_API_BASE_URL
    )]
    pub api_base_url: String,

    /// Where to write the converted collection
    #[arg(
        short,
        long,
        env = "SWAGSYNC_OUTPUT",
        hide_env = true,
        default_value = DEFAULT_OUTPUT_FILE
    )]
    pub output: PathBuf,

    /// Request timeout in seconds
    #[arg(long, env = "SWAGSYNC_TIMEOUT", hide_env = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// How requests are grouped into folders
    #[arg(
        long,
        env = "SWAGSYNC_FOLDER_STRATEGY",
        hide_env = true,
        value_enum,
        default_value_t = FolderStrategy::Paths
    )]
    pub folder_strategy: FolderStrategy,

    /// Enable debug logging
    #[arg(long, env = "SWAGSYNC_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Hide progress output
    #[arg(short, long, env = "SWAGSYNC_QUIET", hide_env = true)]
    pub quiet: bool,
}

impl Cli {
    /// Turn parsed options into the run configuration
    pub fn to_config(&self) -> Config {
        let mut config = Config::new(self.swagger_url.clone().unwrap_or_default());
        config.api_key = self.api_key.clone();
        config.collection_uid = self.collection_uid.clone();
        config.api_base_url = self.api_base_url.clone();
        config.output_path = self.output.clone();
        config.timeout = Duration::from_secs(self.timeout);
        config.folder_strategy = self.folder_strategy;
        config
    }
}
