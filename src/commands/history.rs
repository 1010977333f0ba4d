use anyhow::Result;

use crate::commands::{AppContext, CommandReport};
use crate::summarizer::audit;
use crate::summarizer::export::{relative_date, to_markdown};
use crate::summarizer::history::{HistoryStore, MAX_HISTORY_SIZE};
use crate::summarizer::message::{Request, Response, dispatch};
use crate::summarizer::util::{now_epoch_millis, truncate_with_ellipsis};
use crate::summarizer::video::parse_video_id;

const MAX_LISTED_TITLE_CHARS: usize = 60;

#[derive(Debug, Clone)]
pub enum HistoryAction {
    List,
    Show { video: String },
    Delete { video: String },
    Clear,
}

fn count_label(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} video{plural} summarized")
}

pub fn run(action: &HistoryAction) -> Result<CommandReport> {
    let ctx = AppContext::open()?;
    let summarizer = ctx.summarizer()?;

    match action {
        HistoryAction::List => {
            let mut report = CommandReport::new("history-list");
            match dispatch(&ctx.store, &summarizer, Request::GetHistory) {
                Response::History(entries) => {
                    if entries.is_empty() {
                        report.detail("history is empty");
                        return Ok(report);
                    }
                    report.detail(format!(
                        "{} (cap {MAX_HISTORY_SIZE})",
                        count_label(entries.len())
                    ));
                    let now = now_epoch_millis()?;
                    for entry in entries {
                        report.detail(format!(
                            "{}  {}  ({})",
                            entry.video_id,
                            truncate_with_ellipsis(&entry.title, MAX_LISTED_TITLE_CHARS),
                            relative_date(entry.timestamp, now)
                        ));
                    }
                }
                Response::Error { error, .. } => report.issue(error),
                other => report.issue(format!("unexpected response to GET_HISTORY: {other:?}")),
            }
            Ok(report)
        }
        HistoryAction::Show { video } => {
            let mut report = CommandReport::new("history-show");
            let video_id = parse_video_id(video)?;
            match HistoryStore::new(&ctx.store).lookup(&video_id)? {
                Some(record) => {
                    report.detail(format!("video_id={}", record.video_id));
                    report.detail(format!("thumbnail={}", record.thumbnail));
                    report.detail(format!("timestamp_ms={}", record.timestamp));
                    report.body(to_markdown(&record.title, &record.summary));
                }
                None => report.issue(format!("no cached summary for {video_id}")),
            }
            Ok(report)
        }
        HistoryAction::Delete { video } => {
            let mut report = CommandReport::new("history-delete");
            let video_id = parse_video_id(video)?;
            let existed = HistoryStore::new(&ctx.store).lookup(&video_id)?.is_some();
            match dispatch(
                &ctx.store,
                &summarizer,
                Request::DeleteHistoryItem {
                    video_id: video_id.clone(),
                },
            ) {
                Response::Ack { .. } => {
                    if existed {
                        report.detail(format!("deleted {video_id}"));
                        audit::record(&ctx.paths, "history", "deleted", Some(&video_id), "");
                    } else {
                        report.detail(format!("{video_id} was not in history; nothing to do"));
                    }
                }
                Response::Error { error, .. } => report.issue(error),
                other => report.issue(format!(
                    "unexpected response to DELETE_HISTORY_ITEM: {other:?}"
                )),
            }
            Ok(report)
        }
        HistoryAction::Clear => {
            let mut report = CommandReport::new("history-clear");
            match dispatch(&ctx.store, &summarizer, Request::ClearHistory) {
                Response::Ack { .. } => {
                    report.detail("history cleared");
                    audit::record(&ctx.paths, "history", "cleared", None, "");
                }
                Response::Error { error, .. } => report.issue(error),
                other => report.issue(format!("unexpected response to CLEAR_HISTORY: {other:?}")),
            }
            Ok(report)
        }
    }
}
