//! Default command: run one sync

use log::debug;

use crate::client::{PostmanClient, SpecClient};
use crate::config::Config;
use crate::convert::OpenApiConverter;
use crate::error::{Error, Result};
use crate::output::{ConsoleReporter, SilentReporter};
use crate::pipeline::{Pipeline, PipelineObserver, RunReport};

/// Build the HTTP clients and run the pipeline
pub async fn run(config: &Config, quiet: bool) -> Result<RunReport> {
    config.validate()?;
    debug!("Running with {:?}", redacted(config));

    let source = SpecClient::new(config.timeout).map_err(Error::Fetch)?;
    let api = PostmanClient::with_base_url(config.api_base_url.as_str(), config.timeout)
        .map_err(Error::RemoteUpdate)?;
    let converter = OpenApiConverter::new(config.folder_strategy);

    let console;
    let silent = SilentReporter;
    let observer: &dyn PipelineObserver = if quiet {
        &silent
    } else {
        console = ConsoleReporter::new();
        &console
    };

    Pipeline::new(config, &source, &converter, &api)
        .run(observer)
        .await
}

/// Configuration with the API key masked, for debug logs
fn redacted(config: &Config) -> Config {
    let mut shown = config.clone();
    shown.api_key = shown.api_key.map(|key| mask(&key));
    shown
}

fn mask(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}
