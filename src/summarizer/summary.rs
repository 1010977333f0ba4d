use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Untitled Video";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPoint {
    pub point: String,
    pub importance: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub title: String,
    #[serde(rename = "startTime")]
    pub start_time_secs: f64,
    pub summary: String,
}

/// Structured summary as declared by the remote response schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    #[serde(rename = "summary")]
    pub overview: String,
    #[serde(rename = "keyPoints")]
    pub key_points: Vec<KeyPoint>,
    pub chapters: Vec<Chapter>,
}

impl SummaryResult {
    /// Returns a description of the first chapter with an unusable start time.
    pub fn invalid_chapter(&self) -> Option<String> {
        self.chapters.iter().enumerate().find_map(|(idx, ch)| {
            if ch.start_time_secs.is_finite() && ch.start_time_secs >= 0.0 {
                None
            } else {
                Some(format!(
                    "chapter {} `{}` has invalid startTime {}",
                    idx + 1,
                    ch.title,
                    ch.start_time_secs
                ))
            }
        })
    }
}

/// One cached summary, keyed by video id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRecord {
    pub video_id: String,
    pub title: String,
    pub thumbnail: String,
    pub summary: SummaryResult,
    /// Epoch milliseconds.
    pub timestamp: u64,
}

pub fn thumbnail_url(video_id: &str) -> String {
    format!("https://i.ytimg.com/vi/{video_id}/mqdefault.jpg")
}

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}
