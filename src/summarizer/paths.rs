use anyhow::Result;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct VidsumPaths {
    pub home: PathBuf,
    pub settings_file: PathBuf,
    pub history_file: PathBuf,
    pub logs_dir: PathBuf,
    pub config_file: PathBuf,
}

fn required_home_dir() -> Result<PathBuf> {
    if let Some(home) = dirs::home_dir() {
        return Ok(home);
    }
    Err(anyhow::anyhow!("HOME directory could not be resolved"))
}

pub(crate) fn env_or_default_path(var: &str, fallback: PathBuf) -> PathBuf {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => PathBuf::from(v.trim()),
        _ => fallback,
    }
}

pub fn resolve_paths() -> Result<VidsumPaths> {
    let home = match env::var("VIDSUM_HOME") {
        Ok(v) if !v.trim().is_empty() => PathBuf::from(v.trim()),
        _ => required_home_dir()?.join(".vidsum"),
    };

    let settings_file = env_or_default_path("VIDSUM_SETTINGS_FILE", home.join("settings.json"));
    let history_file = env_or_default_path("VIDSUM_HISTORY_FILE", home.join("history.json"));
    let logs_dir = env_or_default_path("VIDSUM_LOGS_DIR", home.join("logs"));
    let config_file = env_or_default_path("VIDSUM_CONFIG_PATH", home.join("config.toml"));

    Ok(VidsumPaths {
        home,
        settings_file,
        history_file,
        logs_dir,
        config_file,
    })
}
