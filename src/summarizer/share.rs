use crate::summarizer::summary::watch_url;
use crate::summarizer::util::take_chars;
use anyhow::Result;
use reqwest::Url;

const SHARE_EXCERPT_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePlatform {
    Twitter,
    LinkedIn,
}

pub fn share_url(
    platform: SharePlatform,
    video_id: &str,
    title: &str,
    overview: &str,
) -> Result<Url> {
    let video_url = watch_url(video_id);
    let url = match platform {
        SharePlatform::Twitter => {
            let text = format!(
                "{title}\n\n{}...",
                take_chars(overview, SHARE_EXCERPT_CHARS)
            );
            Url::parse_with_params(
                "https://twitter.com/intent/tweet",
                &[("text", text.as_str()), ("url", video_url.as_str())],
            )?
        }
        SharePlatform::LinkedIn => Url::parse_with_params(
            "https://www.linkedin.com/sharing/share-offsite/",
            &[("url", video_url.as_str())],
        )?,
    };
    Ok(url)
}
