//! swagsync - keep a Postman collection in sync with a service's OpenAPI document

use clap::Parser;

mod cli;
mod client;
mod config;
mod convert;
mod error;
mod output;
mod pipeline;

use cli::Cli;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = cli::sync::run(&cli.to_config(), cli.quiet).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// `warn` by default, `debug` with `--debug`; `RUST_LOG` wins over both
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
