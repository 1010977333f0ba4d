use crate::summarizer::summary::SummaryResult;
use chrono::{Local, TimeZone};

const MAX_SAFE_TITLE_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Text,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Text => "txt",
        }
    }
}

/// `m:ss`, or `h:mm:ss` once the offset reaches an hour.
pub fn format_timestamp(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let hrs = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;
    if hrs > 0 {
        format!("{hrs}:{mins:02}:{secs:02}")
    } else {
        format!("{mins}:{secs:02}")
    }
}

pub fn to_markdown(title: &str, summary: &SummaryResult) -> String {
    let mut md = format!("# {title}\n\n");
    md.push_str(&format!("## Summary\n\n{}\n\n", summary.overview));
    md.push_str("## Key Points\n\n");
    for (i, kp) in summary.key_points.iter().enumerate() {
        md.push_str(&format!("### {}. {}\n\n", i + 1, kp.point));
        md.push_str(&format!("{}\n\n", kp.importance));
    }
    if !summary.chapters.is_empty() {
        md.push_str("## Chapters\n\n");
        for ch in &summary.chapters {
            md.push_str(&format!(
                "- [{}] **{}**: {}\n",
                format_timestamp(ch.start_time_secs),
                ch.title,
                ch.summary
            ));
        }
        md.push('\n');
    }
    md
}

pub fn to_text(title: &str, summary: &SummaryResult) -> String {
    let mut text = format!("{title}\n{}\n\n", "=".repeat(title.chars().count()));
    text.push_str(&format!("SUMMARY\n{}\n{}\n\n", "-".repeat(7), summary.overview));
    text.push_str(&format!("KEY POINTS\n{}\n", "-".repeat(10)));
    for (i, kp) in summary.key_points.iter().enumerate() {
        text.push_str(&format!("{}. {}\n", i + 1, kp.point));
        text.push_str(&format!("   {}\n\n", kp.importance));
    }
    if !summary.chapters.is_empty() {
        text.push_str(&format!("CHAPTERS\n{}\n", "-".repeat(8)));
        for ch in &summary.chapters {
            text.push_str(&format!(
                "[{}] {}\n   {}\n\n",
                format_timestamp(ch.start_time_secs),
                ch.title,
                ch.summary
            ));
        }
    }
    text
}

pub fn render(format: ExportFormat, title: &str, summary: &SummaryResult) -> String {
    match format {
        ExportFormat::Markdown => to_markdown(title, summary),
        ExportFormat::Text => to_text(title, summary),
    }
}

pub fn export_file_name(title: &str, format: ExportFormat) -> String {
    let safe: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .take(MAX_SAFE_TITLE_CHARS)
        .collect();
    format!("{safe}_summary.{}", format.extension())
}

/// Short "how long ago" label for history listings.
pub fn relative_date(timestamp_ms: u64, now_ms: u64) -> String {
    let diff_ms = now_ms.saturating_sub(timestamp_ms);
    let mins = diff_ms / 60_000;
    let hours = diff_ms / 3_600_000;
    let days = diff_ms / 86_400_000;

    if mins < 1 {
        return "Just now".to_string();
    }
    if mins < 60 {
        return format!("{mins}m ago");
    }
    if hours < 24 {
        return format!("{hours}h ago");
    }
    if days < 7 {
        return format!("{days}d ago");
    }
    match Local.timestamp_millis_opt(timestamp_ms as i64).single() {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => format!("{days}d ago"),
    }
}
