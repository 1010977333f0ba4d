use crate::error::SummaryError;
use crate::summarizer::config::GeminiConfig;
use crate::summarizer::summary::{SummaryResult, watch_url};
use crate::summarizer::util::take_chars;
use reqwest::blocking::Client;
use serde_json::{Value, json};
use std::time::Duration;

const MAX_ERROR_EXCERPT_CHARS: usize = 100;

/// Remote summarization backend.
pub trait Summarizer {
    fn summarize(
        &self,
        video_id: &str,
        language: &str,
        api_key: &str,
    ) -> Result<SummaryResult, SummaryError>;

    /// Cheap metadata probe. A rejected key is `Ok(false)`; only transport
    /// failures are errors.
    fn validate_api_key(&self, api_key: &str) -> Result<bool, SummaryError>;
}

pub struct GeminiSummarizer {
    client: Client,
    api_base_url: String,
    model: String,
}

impl GeminiSummarizer {
    pub fn from_config(cfg: &GeminiConfig) -> Result<Self, SummaryError> {
        let mut builder = Client::builder();
        if cfg.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(cfg.request_timeout_secs));
        }
        Ok(Self {
            client: builder.build()?,
            api_base_url: cfg.api_base_url.trim_end_matches('/').to_string(),
            model: cfg.model.clone(),
        })
    }

    fn model_url(&self) -> String {
        format!("{}/models/{}", self.api_base_url, self.model)
    }
}

fn build_prompt(language: &str) -> String {
    format!(
        "Analyze this YouTube video and provide the response in {language}:

1. A concise overall summary of the main content (2-3 paragraphs)
2. The key points with an explanation of why each point is important
3. If the video has distinct chapters or sections, identify them with:
   - Chapter title
   - Start time in seconds
   - A brief summary of that chapter (1-2 sentences)

Filter out sponsorships, engagement requests (likes/subscribes), and filler content. Focus on the core arguments, facts, and conclusions."
    )
}

fn response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "summary": {
                "type": "string",
                "description": "A concise 2-3 paragraph summary of the main content"
            },
            "keyPoints": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "point": {"type": "string", "description": "The key point"},
                        "importance": {"type": "string", "description": "Why this point is important"}
                    },
                    "required": ["point", "importance"]
                },
                "description": "3-5 key points with explanations of their importance"
            },
            "chapters": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "title": {"type": "string", "description": "Chapter or section title"},
                        "startTime": {"type": "number", "description": "Start time in seconds"},
                        "summary": {"type": "string", "description": "Brief 1-2 sentence summary of this chapter"}
                    },
                    "required": ["title", "startTime", "summary"]
                },
                "description": "Video chapters/sections if identifiable (empty array if no clear chapters)"
            }
        },
        "required": ["summary", "keyPoints", "chapters"]
    })
}

pub(crate) fn build_request_body(video_id: &str, language: &str) -> Value {
    json!({
        "contents": [
            {
                "role": "user",
                "parts": [
                    {
                        "fileData": {
                            "fileUri": watch_url(video_id),
                            "mimeType": "video/mp4"
                        }
                    },
                    {"text": build_prompt(language)}
                ]
            }
        ],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema()
        }
    })
}

fn is_auth_rejection(status: u16, body: Option<&Value>) -> bool {
    if status == 401 || status == 403 {
        return true;
    }
    let Some(error) = body.and_then(|v| v.get("error")) else {
        return false;
    };
    if matches!(
        error.get("status").and_then(Value::as_str),
        Some("UNAUTHENTICATED") | Some("PERMISSION_DENIED")
    ) {
        return true;
    }
    error
        .get("details")
        .and_then(Value::as_array)
        .is_some_and(|details| {
            details.iter().any(|d| {
                d.get("reason").and_then(Value::as_str) == Some("API_KEY_INVALID")
            })
        })
}

/// Map a non-success response into the error taxonomy.
pub(crate) fn classify_failure(status: u16, body: &str) -> SummaryError {
    let generic = format!("Gemini API request failed ({status})");
    let parsed = serde_json::from_str::<Value>(body).ok();
    let message = match parsed.as_ref() {
        Some(json) => json
            .pointer("/error/message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or(generic),
        None => format!("{generic}: {}", take_chars(body, MAX_ERROR_EXCERPT_CHARS)),
    };

    if is_auth_rejection(status, parsed.as_ref()) {
        SummaryError::Auth { status, message }
    } else {
        SummaryError::Remote { status, message }
    }
}

/// Pull the schema-conformant JSON out of a `generateContent` success body.
pub(crate) fn parse_generate_content(body: &str) -> Result<SummaryResult, SummaryError> {
    let json: Value = serde_json::from_str(body).map_err(|err| {
        SummaryError::MalformedResponse(format!("Gemini response was not valid JSON: {err}"))
    })?;
    let content = json
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| SummaryError::MalformedResponse("No content in Gemini response".to_string()))?;

    let result: SummaryResult = serde_json::from_str(content).map_err(|err| {
        SummaryError::MalformedResponse(format!(
            "Gemini returned a summary in an unexpected shape: {err}"
        ))
    })?;
    if let Some(reason) = result.invalid_chapter() {
        return Err(SummaryError::MalformedResponse(format!(
            "Gemini returned an invalid chapter list: {reason}"
        )));
    }
    Ok(result)
}

impl Summarizer for GeminiSummarizer {
    fn summarize(
        &self,
        video_id: &str,
        language: &str,
        api_key: &str,
    ) -> Result<SummaryResult, SummaryError> {
        let url = format!("{}:generateContent", self.model_url());
        tracing::debug!(video_id, model = %self.model, "requesting gemini summary");

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&build_request_body(video_id, language))
            .send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(classify_failure(status.as_u16(), &body));
        }
        parse_generate_content(&body)
    }

    fn validate_api_key(&self, api_key: &str) -> Result<bool, SummaryError> {
        if api_key.trim().is_empty() {
            return Ok(false);
        }
        let response = self
            .client
            .get(self.model_url())
            .query(&[("key", api_key.trim())])
            .send()?;
        tracing::debug!(status = response.status().as_u16(), "gemini key probe");
        Ok(response.status().is_success())
    }
}
