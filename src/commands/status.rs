use anyhow::Result;
use std::env;

use crate::commands::{AppContext, CommandReport};
use crate::summarizer::history::{HistoryStore, MAX_HISTORY_SIZE};
use crate::summarizer::settings;

mod generated {
    include!(concat!(env!("OUT_DIR"), "/vidsum_env_allowlist.rs"));
}

const BUILD_ID: &str = env!("VIDSUM_BUILD_ID");

/// Names of `VIDSUM_*` variables that are currently set, excluding compile-time keys.
fn active_env_overrides() -> Vec<&'static str> {
    generated::GENERATED_ENV_ALLOWLIST
        .iter()
        .copied()
        .filter(|key| *key != "VIDSUM_BUILD_ID")
        .filter(|key| env::var_os(key).is_some())
        .collect()
}

pub fn run() -> Result<CommandReport> {
    let ctx = AppContext::open()?;
    let mut report = CommandReport::new("status");

    report.detail(format!("build_id={BUILD_ID}"));
    report.detail(format!("home={}", ctx.paths.home.display()));
    report.detail(format!("settings_file={}", ctx.paths.settings_file.display()));
    report.detail(format!("history_file={}", ctx.paths.history_file.display()));
    report.detail(format!("logs_dir={}", ctx.paths.logs_dir.display()));
    report.detail(format!("model={}", ctx.config.gemini.model));

    let overrides = active_env_overrides();
    if overrides.is_empty() {
        report.detail("env_overrides=none");
    } else {
        report.detail(format!("env_overrides={}", overrides.join(",")));
    }

    match settings::load(&ctx.store) {
        Ok(current) if current.api_key.is_some() => {
            report.detail("API key configured. Ready to summarize!");
            report.detail(format!("language={}", current.language));
        }
        Ok(_) => report.issue(
            "No API key configured. Please add your Gemini API key with `vidsum config set-key`.",
        ),
        Err(err) => report.issue(format!("settings unreadable: {err:#}")),
    }

    match HistoryStore::new(&ctx.store).get_all() {
        Ok(entries) => report.detail(format!("history={}/{MAX_HISTORY_SIZE}", entries.len())),
        Err(err) => report.issue(format!("history unreadable: {err:#}")),
    }

    Ok(report)
}
