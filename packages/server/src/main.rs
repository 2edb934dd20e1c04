#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

use std::time::Duration;

use clap::Parser;
use pinned_server::{ServerConfig, run_server};

#[derive(Parser)]
#[command(name = "pinned-server")]
#[command(about = "Serve pinned repositories for GitHub users and organizations", long_about = None)]
struct Cli {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    port: u16,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    github_api_url: String,

    /// Per-request deadline for upstream calls; 0 disables it.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    request_timeout_secs: u64,

    /// Replace upstream error text in 500 responses with a fixed message.
    #[arg(long, env = "OPAQUE_ERRORS")]
    opaque_errors: bool,
}

impl From<Cli> for ServerConfig {
    fn from(cli: Cli) -> Self {
        let request_timeout =
            (cli.request_timeout_secs > 0).then(|| Duration::from_secs(cli.request_timeout_secs));

        Self::new(cli.host, cli.port)
            .with_github_token(cli.github_token)
            .with_github_api_url(cli.github_api_url)
            .with_request_timeout(request_timeout)
            .with_opaque_errors(cli.opaque_errors)
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from(Cli::parse());

    log::info!(
        "Starting pinned server on {}:{} (upstream {})",
        config.host,
        config.port,
        config.github_api_url
    );

    run_server(config).await
}
