use anyhow::{Context, Result};
use std::io::Read;

use crate::commands::AppContext;
use crate::summarizer::audit;
use crate::summarizer::message::{Request, Response, dispatch};

fn read_request(raw: Option<&str>) -> Result<String> {
    if let Some(raw) = raw {
        return Ok(raw.to_string());
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read request from stdin")?;
    Ok(buf)
}

/// Handle one JSON request and return the JSON response text.
pub fn run(raw: Option<&str>) -> Result<String> {
    let input = read_request(raw)?;
    let request: Request = serde_json::from_str(input.trim())
        .with_context(|| format!("invalid request message: {}", input.trim()))?;

    let ctx = AppContext::open()?;
    let summarizer = ctx.summarizer()?;
    let video_id = match &request {
        Request::GetSummary { video_id, .. } | Request::DeleteHistoryItem { video_id } => {
            Some(video_id.clone())
        }
        _ => None,
    };
    let response = dispatch(&ctx.store, &summarizer, request);

    match &response {
        Response::Summary { cached, .. } => {
            let status = if *cached { "cache_hit" } else { "fetched" };
            audit::record(&ctx.paths, "message", status, video_id.as_deref(), "GET_SUMMARY");
        }
        Response::Error { code, .. } => {
            audit::record(&ctx.paths, "message", "failed", video_id.as_deref(), code);
        }
        _ => {}
    }

    Ok(serde_json::to_string(&response)?)
}
