#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

pub mod disconnect;
pub mod emitter;
pub mod routes;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, HttpServer, middleware, web};
use pinned_github::GitHubProvider;
use pinned_provider::PinnedProvider;
use state::AppState;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub github_token: Option<String>,
    pub github_api_url: String,
    /// Deadline applied to each request's upstream calls.
    pub request_timeout: Option<Duration>,
    /// Hide upstream error text from callers.
    pub opaque_errors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            github_token: None,
            github_api_url: "https://api.github.com".to_string(),
            request_timeout: Some(Duration::from_secs(30)),
            opaque_errors: false,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn new(host: String, port: u16) -> Self {
        Self {
            host,
            port,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_host(mut self, host: String) -> Self {
        self.host = host;
        self
    }

    #[must_use]
    pub fn with_github_token(mut self, token: Option<String>) -> Self {
        self.github_token = token;
        self
    }

    #[must_use]
    pub fn with_github_api_url(mut self, url: String) -> Self {
        self.github_api_url = url;
        self
    }

    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_opaque_errors(mut self, opaque_errors: bool) -> Self {
        self.opaque_errors = opaque_errors;
        self
    }

    /// Build the GitHub provider described by this configuration.
    #[must_use]
    pub fn github_provider(&self) -> GitHubProvider {
        let provider = GitHubProvider::new().with_base_url(self.github_api_url.clone());

        match &self.github_token {
            Some(token) => provider.with_token(token.clone()),
            None => {
                log::warn!("No GitHub token configured, upstream calls will be unauthenticated");
                provider
            }
        }
    }
}

/// # Errors
///
/// Returns an error if the server fails to bind or run
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let provider: Arc<dyn PinnedProvider> = Arc::new(config.github_provider());
    let RunServerResponse { join_handle, .. } = run_server_with_handle(&config, provider)?;

    join_handle.await?
}

pub struct RunServerResponse {
    pub handle: actix_web::dev::ServerHandle,
    pub addrs: Vec<std::net::SocketAddr>,
    pub join_handle: JoinHandle<Result<(), std::io::Error>>,
}

/// # Errors
///
/// Returns an error if the server fails to bind
pub fn run_server_with_handle(
    config: &ServerConfig,
    provider: Arc<dyn PinnedProvider>,
) -> std::io::Result<RunServerResponse> {
    let state = web::Data::new(AppState::new(provider, config));

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .configure(routes::configure)
    })
    .on_connect(disconnect::on_connect)
    .bind((config.host.as_str(), config.port))?;

    let addrs = server.addrs();
    for addr in &addrs {
        log::info!("Listening on {addr}");
    }

    let server = server.run();
    let handle = server.handle();

    let join_handle = tokio::spawn(server);

    Ok(RunServerResponse {
        handle,
        addrs,
        join_handle,
    })
}
