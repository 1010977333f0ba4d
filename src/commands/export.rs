use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::commands::{AppContext, CommandReport};
use crate::summarizer::audit;
use crate::summarizer::export::{ExportFormat, export_file_name, render};
use crate::summarizer::history::HistoryStore;
use crate::summarizer::video::parse_video_id;

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub video: String,
    pub format: ExportFormat,
    pub out: Option<PathBuf>,
    pub stdout: bool,
}

pub fn run(opts: &ExportOptions) -> Result<CommandReport> {
    let ctx = AppContext::open()?;
    let mut report = CommandReport::new("export");

    let video_id = parse_video_id(&opts.video)?;
    let Some(record) = HistoryStore::new(&ctx.store).lookup(&video_id)? else {
        report.issue(format!(
            "no cached summary for {video_id}; run `vidsum summarize {video_id}` first"
        ));
        return Ok(report);
    };

    let content = render(opts.format, &record.title, &record.summary);
    if opts.stdout {
        report.body(content);
        return Ok(report);
    }

    let path = opts
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(export_file_name(&record.title, opts.format)));
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&path, content).with_context(|| format!("failed to write {}", path.display()))?;

    report.detail(format!("export_path={}", path.display()));
    report.detail(format!("format={}", opts.format.extension()));
    audit::record(
        &ctx.paths,
        "export",
        "written",
        Some(&video_id),
        &path.display().to_string(),
    );
    Ok(report)
}
