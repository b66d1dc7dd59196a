use reqwest::Client;
use anyhow::{Result, Context};
use tokio::time::Duration;
use crate::config::BackendConfig;
use crate::pipelines::ollama;

/// A model served by an Ollama-compatible generate API
#[derive(Clone)]
pub struct OllamaBackend {
    client: Client,
    base_url: String,
    model_name: String,
    timeout: Duration,
}

impl OllamaBackend {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .tcp_keepalive(Duration::from_secs(30))
            .pool_max_idle_per_host(10)
            .build()
            .context("Failed to create generate API HTTP client")?;
        Ok(OllamaBackend {
            client,
            base_url: config.base_url.clone(),
            model_name: config.model.clone(),
            timeout,
        })
    }

    pub fn name(&self) -> &str {
        &self.model_name
    }

    pub async fn call_text(&self, prompt: &str) -> Result<String> {
        let text = ollama::call_generate(
            &self.client,
            &self.base_url,
            &self.model_name,
            prompt,
            self.timeout,
        )
        .await?;

        tracing::debug!(
            model = %self.model_name,
            response_preview = %text.chars().take(200).collect::<String>(),
            "Model raw response"
        );
        Ok(text.trim().to_string())
    }
}
