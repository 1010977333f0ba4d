use crate::summarizer::paths::VidsumPaths;
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_base_url: String,
    pub model: String,
    /// `0` leaves the HTTP client's own default in place.
    #[serde(default)]
    pub request_timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout_secs: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VidsumConfig {
    pub gemini: GeminiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PartialGeminiConfig {
    api_base_url: Option<String>,
    model: Option<String>,
    request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PartialVidsumConfig {
    gemini: Option<PartialGeminiConfig>,
}

fn env_or_u64(var: &str, fallback: u64) -> u64 {
    match env::var(var) {
        Ok(v) => v.trim().parse::<u64>().ok().unwrap_or(fallback),
        Err(_) => fallback,
    }
}

fn env_or_string(var: &str, fallback: &str) -> String {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => fallback.to_string(),
    }
}

fn validate(cfg: &VidsumConfig) -> Result<()> {
    let base = cfg.gemini.api_base_url.trim();
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(anyhow!(
            "invalid gemini api base url `{base}`: must start with http:// or https://"
        ));
    }
    let model = cfg.gemini.model.trim();
    if model.is_empty() {
        return Err(anyhow!("invalid gemini model: cannot be empty"));
    }
    if model.contains('/') || model.contains('?') || model.contains(':') {
        return Err(anyhow!(
            "invalid gemini model `{model}`: use the bare model name, e.g. {DEFAULT_MODEL}"
        ));
    }
    Ok(())
}

fn merge_file_config(base: &mut VidsumConfig, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    let raw = fs::read_to_string(path)?;
    let parsed: PartialVidsumConfig = toml::from_str(&raw)
        .map_err(|err| anyhow!("failed to parse vidsum config {}: {err}", path.display()))?;
    if let Some(gemini) = parsed.gemini {
        if let Some(api_base_url) = gemini.api_base_url {
            base.gemini.api_base_url = api_base_url;
        }
        if let Some(model) = gemini.model {
            base.gemini.model = model;
        }
        if let Some(timeout) = gemini.request_timeout_secs {
            base.gemini.request_timeout_secs = timeout;
        }
    }
    Ok(())
}

pub fn load_config(paths: &VidsumPaths) -> Result<VidsumConfig> {
    let mut cfg = VidsumConfig::default();
    merge_file_config(&mut cfg, &paths.config_file)?;

    cfg.gemini.api_base_url = env_or_string("VIDSUM_API_BASE_URL", &cfg.gemini.api_base_url);
    cfg.gemini.model = env_or_string("VIDSUM_MODEL", &cfg.gemini.model);
    cfg.gemini.request_timeout_secs = env_or_u64(
        "VIDSUM_REQUEST_TIMEOUT_SECS",
        cfg.gemini.request_timeout_secs,
    );
    cfg.gemini.api_base_url = cfg.gemini.api_base_url.trim_end_matches('/').to_string();

    validate(&cfg)?;
    Ok(cfg)
}
