//! Typed request/response surface consumed by front ends.
//!
//! Requests arrive as JSON objects tagged by `type`; every request yields
//! exactly one response and failures are carried in-band as `{"error": ..}`.

use crate::error::SummaryError;
use crate::summarizer::gemini::Summarizer;
use crate::summarizer::history::HistoryStore;
use crate::summarizer::orchestrator::Orchestrator;
use crate::summarizer::store::KeyValueStore;
use crate::summarizer::summary::{SummaryRecord, SummaryResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Request {
    GetSummary {
        #[serde(rename = "videoId")]
        video_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    TestApiKey {
        #[serde(rename = "apiKey")]
        api_key: String,
    },
    GetHistory,
    ClearHistory,
    DeleteHistoryItem {
        #[serde(rename = "videoId")]
        video_id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Summary {
        success: bool,
        summary: SummaryResult,
        cached: bool,
    },
    ApiKeyCheck {
        valid: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    History(Vec<SummaryRecord>),
    Ack {
        success: bool,
    },
    Error {
        error: String,
        code: String,
    },
}

impl Response {
    fn from_error(err: &SummaryError) -> Self {
        Response::Error {
            error: err.to_string(),
            code: err.code().as_str().to_string(),
        }
    }

    fn ack() -> Self {
        Response::Ack { success: true }
    }
}

pub fn dispatch(
    store: &dyn KeyValueStore,
    summarizer: &dyn Summarizer,
    request: Request,
) -> Response {
    let orchestrator = Orchestrator::new(store, summarizer);
    let history = HistoryStore::new(store);

    match request {
        Request::GetSummary { video_id, title } => {
            match orchestrator.request_summary(&video_id, title.as_deref()) {
                Ok(outcome) => Response::Summary {
                    success: true,
                    summary: outcome.result,
                    cached: outcome.served_from_cache,
                },
                Err(err) => Response::from_error(&err),
            }
        }
        Request::TestApiKey { api_key } => match orchestrator.validate_api_key(&api_key) {
            Ok(valid) => Response::ApiKeyCheck { valid, error: None },
            Err(err) => Response::ApiKeyCheck {
                valid: false,
                error: Some(err.to_string()),
            },
        },
        Request::GetHistory => match history.get_all() {
            Ok(entries) => Response::History(entries),
            Err(err) => Response::from_error(&SummaryError::Storage(err)),
        },
        Request::ClearHistory => match history.clear() {
            Ok(()) => Response::ack(),
            Err(err) => Response::from_error(&SummaryError::Storage(err)),
        },
        Request::DeleteHistoryItem { video_id } => match history.delete_by_id(&video_id) {
            Ok(_) => Response::ack(),
            Err(err) => Response::from_error(&SummaryError::Storage(err)),
        },
    }
}
