use anyhow::Result;

use crate::commands::{AppContext, CommandReport};
use crate::summarizer::audit;
use crate::summarizer::export::to_markdown;
use crate::summarizer::history::HistoryStore;
use crate::summarizer::message::{Request, Response, dispatch};
use crate::summarizer::summary::DEFAULT_TITLE;
use crate::summarizer::video::parse_video_id;

#[derive(Debug, Clone)]
pub struct SummarizeOptions {
    pub video: String,
    pub title: Option<String>,
}

pub fn run(opts: &SummarizeOptions) -> Result<CommandReport> {
    let ctx = AppContext::open()?;
    let mut report = CommandReport::new("summarize");

    let video_id = match parse_video_id(&opts.video) {
        Ok(id) => id,
        Err(err) => {
            report.issue(format!("{err:#}"));
            return Ok(report);
        }
    };
    report.detail(format!("video_id={video_id}"));

    let summarizer = ctx.summarizer()?;
    let response = dispatch(
        &ctx.store,
        &summarizer,
        Request::GetSummary {
            video_id: video_id.clone(),
            title: opts.title.clone(),
        },
    );

    match response {
        Response::Summary {
            summary, cached, ..
        } => {
            report.detail(format!("cached={cached}"));
            report.detail(format!("key_points={}", summary.key_points.len()));
            report.detail(format!("chapters={}", summary.chapters.len()));

            // The stored title wins over the flag so cached reruns keep their name.
            let title = HistoryStore::new(&ctx.store)
                .lookup(&video_id)?
                .map(|r| r.title)
                .or_else(|| opts.title.clone())
                .unwrap_or_else(|| DEFAULT_TITLE.to_string());
            report.body(to_markdown(&title, &summary));

            let status = if cached { "cache_hit" } else { "fetched" };
            audit::record(&ctx.paths, "summarize", status, Some(&video_id), &title);
        }
        Response::Error { error, code } => {
            audit::record(&ctx.paths, "summarize", "failed", Some(&video_id), &code);
            report.issue(format!("{code}: {error}"));
        }
        other => {
            report.issue(format!("unexpected response to GET_SUMMARY: {other:?}"));
        }
    }

    Ok(report)
}
