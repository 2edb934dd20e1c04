use std::sync::Arc;

use pinned_provider::PinnedProvider;
use pinned_server::{ServerConfig, run_server_with_handle};

pub struct TestServer {
    port: u16,
    http_url: String,
    handle: actix_web::dev::ServerHandle,
}

impl TestServer {
    /// # Errors
    ///
    /// Returns an error if the server fails to start or no ports are available
    pub async fn start(provider: Arc<dyn PinnedProvider>) -> anyhow::Result<Self> {
        Self::start_with_config(ServerConfig::new("127.0.0.1".to_string(), 0), provider).await
    }

    /// # Errors
    ///
    /// Returns an error if the server fails to start or no ports are available
    pub async fn start_with_config(
        config: ServerConfig,
        provider: Arc<dyn PinnedProvider>,
    ) -> anyhow::Result<Self> {
        let config = config.with_host("127.0.0.1".to_string()).with_port(0);

        let response = run_server_with_handle(&config, provider)?;
        let port = response
            .addrs
            .first()
            .expect("Expected at least one address")
            .port();
        let http_url = format!("http://127.0.0.1:{port}");

        wait_for_server_ready(&http_url).await?;

        Ok(Self {
            port,
            http_url,
            handle: response.handle,
        })
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.http_url)
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let handle = self.handle.clone();
        tokio::spawn(async move {
            handle.stop(true).await;
        });
    }
}

async fn wait_for_server_ready(url: &str) -> anyhow::Result<()> {
    let client = reqwest::Client::new();
    let health_url = format!("{url}/health");

    for _ in 0..30 {
        if let Ok(response) = client.get(&health_url).send().await
            && response.status().is_success()
        {
            return Ok(());
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
    }

    anyhow::bail!("Server failed to start within timeout")
}

pub fn header<'a>(response: &'a reqwest::Response, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}
