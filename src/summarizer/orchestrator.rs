use crate::error::SummaryError;
use crate::summarizer::gemini::Summarizer;
use crate::summarizer::history::HistoryStore;
use crate::summarizer::settings;
use crate::summarizer::store::KeyValueStore;
use crate::summarizer::summary::SummaryResult;

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryOutcome {
    pub result: SummaryResult,
    pub served_from_cache: bool,
}

/// Cache-or-fetch entry point.
///
/// Cached summaries never expire. Two overlapping requests for the same id
/// both reach the remote service and the later upsert wins.
pub struct Orchestrator<'a> {
    store: &'a dyn KeyValueStore,
    summarizer: &'a dyn Summarizer,
}

impl<'a> Orchestrator<'a> {
    pub fn new(store: &'a dyn KeyValueStore, summarizer: &'a dyn Summarizer) -> Self {
        Self { store, summarizer }
    }

    pub fn request_summary(
        &self,
        video_id: &str,
        title: Option<&str>,
    ) -> Result<SummaryOutcome, SummaryError> {
        let history = HistoryStore::new(self.store);
        if let Some(cached) = history.lookup(video_id)? {
            tracing::debug!(video_id, "summary cache hit");
            return Ok(SummaryOutcome {
                result: cached.summary,
                served_from_cache: true,
            });
        }

        let settings = settings::load(self.store)?;
        let Some(api_key) = settings.api_key else {
            return Err(SummaryError::missing_api_key());
        };

        let result = self
            .summarizer
            .summarize(video_id, &settings.language, &api_key)
            .inspect_err(|err| {
                tracing::debug!(
                    video_id,
                    code = err.code().as_str(),
                    status = err.http_status(),
                    "summary request failed"
                );
            })?;
        history.record_summary(video_id, title, result.clone())?;

        Ok(SummaryOutcome {
            result,
            served_from_cache: false,
        })
    }

    pub fn validate_api_key(&self, api_key: &str) -> Result<bool, SummaryError> {
        self.summarizer.validate_api_key(api_key)
    }
}
