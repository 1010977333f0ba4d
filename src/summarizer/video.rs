use anyhow::{Result, anyhow};
use reqwest::Url;

fn is_id_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

fn validated(candidate: &str) -> Option<String> {
    let trimmed = candidate.trim();
    if trimmed.is_empty() || !trimmed.chars().all(is_id_char) {
        return None;
    }
    Some(trimmed.to_string())
}

/// Accept a bare video id or any of the common YouTube URL shapes.
pub fn parse_video_id(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if let Some(id) = validated(trimmed) {
        return Ok(id);
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    let url = Url::parse(&with_scheme)
        .map_err(|err| anyhow!("`{input}` is neither a video id nor a URL: {err}"))?;
    let host = url.host_str().unwrap_or_default().trim_start_matches("www.");
    let mut segments = url.path_segments().into_iter().flatten();

    let found = match host {
        "youtu.be" => segments.next().and_then(validated),
        "youtube.com" | "m.youtube.com" | "music.youtube.com" => {
            match segments.next() {
                Some("watch") => url
                    .query_pairs()
                    .find(|(k, _)| k == "v")
                    .and_then(|(_, v)| validated(&v)),
                Some("shorts") | Some("embed") | Some("live") => {
                    segments.next().and_then(validated)
                }
                _ => None,
            }
        }
        _ => None,
    };

    found.ok_or_else(|| anyhow!("could not find a video id in `{input}`"))
}
