use crate::summarizer::paths::VidsumPaths;
use crate::summarizer::util::now_epoch_millis;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub at_epoch_ms: u64,
    pub phase: String,
    pub status: String,
    pub video_id: Option<String>,
    pub message: String,
}

pub fn audit_log_path(paths: &VidsumPaths) -> PathBuf {
    paths.logs_dir.join("audit.log")
}

pub fn append_event(
    paths: &VidsumPaths,
    phase: &str,
    status: &str,
    video_id: Option<&str>,
    message: &str,
) -> Result<()> {
    fs::create_dir_all(&paths.logs_dir)
        .with_context(|| format!("failed to create {}", paths.logs_dir.display()))?;
    let event = AuditEvent {
        at_epoch_ms: now_epoch_millis()?,
        phase: phase.to_string(),
        status: status.to_string(),
        video_id: video_id.map(str::to_string),
        message: message.to_string(),
    };

    let line = format!("{}\n", serde_json::to_string(&event)?);
    let path = audit_log_path(paths);
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    file.write_all(line.as_bytes())?;
    Ok(())
}

/// Audit failures never fail the command that produced the event.
pub fn record(paths: &VidsumPaths, phase: &str, status: &str, video_id: Option<&str>, message: &str) {
    if let Err(err) = append_event(paths, phase, status, video_id, message) {
        tracing::warn!(phase, error = %format!("{err:#}"), "audit append failed");
    }
}
