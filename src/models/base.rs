use crate::config::{BackendConfig, BackendKind};
use crate::models::ollama::OllamaBackend;

/// Generative text backend used for AI recommendations
#[derive(Clone)]
pub enum GenerativeBackend {
    Ollama(OllamaBackend),
    Disabled,
}

impl GenerativeBackend {
    pub fn from_config(config: &BackendConfig) -> anyhow::Result<Self> {
        match config.kind {
            BackendKind::Ollama => Ok(GenerativeBackend::Ollama(OllamaBackend::new(config)?)),
            BackendKind::Disabled => Ok(GenerativeBackend::Disabled),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            GenerativeBackend::Ollama(m) => m.name(),
            GenerativeBackend::Disabled => "disabled",
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, GenerativeBackend::Disabled)
    }

    pub async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        match self {
            GenerativeBackend::Ollama(m) => m.call_text(prompt).await,
            GenerativeBackend::Disabled => anyhow::bail!("generative backend is disabled"),
        }
    }
}
