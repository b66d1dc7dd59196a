use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use lazy_static::lazy_static;
use crate::error::CoachError;

pub const CONFIG_ENV_VAR: &str = "CFCOACH_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Ollama,
    /// Never call a generative backend; always use the template plan
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub kind: BackendKind,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    /// Consecutive failures before the circuit breaker opens
    pub failure_threshold: u64,
    /// Seconds the breaker stays open before allowing another call
    pub circuit_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            kind: BackendKind::Ollama,
            base_url: "http://localhost:11434".to_string(),
            model: "qwen2.5:7b-instruct".to_string(),
            timeout_secs: 60,
            max_retries: 2,
            failure_threshold: 3,
            circuit_timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeforcesConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Cap on fetched submissions; 0 fetches the full history
    pub max_submissions: u32,
}

impl Default for CodeforcesConfig {
    fn default() -> Self {
        CodeforcesConfig {
            base_url: "https://codeforces.com/api".to_string(),
            timeout_secs: 15,
            max_submissions: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachConfig {
    pub backend: BackendConfig,
    pub codeforces: CodeforcesConfig,
    pub cache_capacity: usize,
}

impl Default for CoachConfig {
    fn default() -> Self {
        CoachConfig {
            backend: BackendConfig::default(),
            codeforces: CodeforcesConfig::default(),
            cache_capacity: 200,
        }
    }
}

impl CoachConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, CoachError> {
        Ok(toml::from_str::<CoachConfig>(content)?)
    }

    /// Load from an explicit file; errors if the file is missing or malformed
    pub fn load_from(path: &Path) -> Result<Self, CoachError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CoachError::from(e).with_context(format!("path: {:?}", path)))?;
        Self::from_toml_str(&content)
            .map_err(|e| e.with_context(format!("path: {:?}", path)))
    }
}

/// Platform-specific application data directory
pub fn data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let mut dir = PathBuf::from(home);
            dir.push("Library/Application Support/cfcoach");
            return dir;
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            let mut dir = PathBuf::from(appdata);
            dir.push("cfcoach");
            return dir;
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let mut dir = PathBuf::from(home);
            dir.push(".local/share/cfcoach");
            return dir;
        }
    }

    PathBuf::from(".")
}

fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
        return PathBuf::from(path);
    }
    data_dir().join("coach.toml")
}

fn load_config_internal() -> CoachConfig {
    let path = config_path();

    match std::fs::read_to_string(&path) {
        Ok(content) => match CoachConfig::from_toml_str(&content) {
            Ok(config) => {
                tracing::info!(path = ?path, "Loaded coach config");
                config
            }
            Err(e) => {
                tracing::warn!(path = ?path, error = %e, "Failed to parse coach config, using defaults");
                CoachConfig::default()
            }
        },
        Err(_) => {
            tracing::debug!(path = ?path, "No coach config found, using defaults");
            CoachConfig::default()
        }
    }
}

lazy_static! {
    static ref COACH_CONFIG: CoachConfig = load_config_internal();
}

/// Process-wide configuration (loaded once on first use)
pub fn get_coach_config() -> &'static CoachConfig {
    &COACH_CONFIG
}
