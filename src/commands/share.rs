use anyhow::Result;

use crate::commands::{AppContext, CommandReport};
use crate::summarizer::history::HistoryStore;
use crate::summarizer::share::{SharePlatform, share_url};
use crate::summarizer::video::parse_video_id;

pub fn run(video: &str, platform: SharePlatform) -> Result<CommandReport> {
    let ctx = AppContext::open()?;
    let mut report = CommandReport::new("share");

    let video_id = parse_video_id(video)?;
    let Some(record) = HistoryStore::new(&ctx.store).lookup(&video_id)? else {
        report.issue(format!("no cached summary for {video_id}"));
        return Ok(report);
    };

    let url = share_url(platform, &record.video_id, &record.title, &record.summary.overview)?;
    report.body(url.to_string());
    Ok(report)
}
