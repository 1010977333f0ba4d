use crate::summarizer::store::{KeyValueStore, Scope};
use crate::summarizer::summary::{DEFAULT_TITLE, SummaryRecord, SummaryResult, thumbnail_url};
use crate::summarizer::util::now_epoch_millis;
use anyhow::{Context, Result};
use serde_json::Value;

pub const HISTORY_KEY: &str = "summaryHistory";
pub const MAX_HISTORY_SIZE: usize = 100;

/// Capped, most-recent-first list of summaries in the local scope.
///
/// Eviction is by insertion order only; reading a record does not refresh it.
pub struct HistoryStore<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> HistoryStore<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    pub fn get_all(&self) -> Result<Vec<SummaryRecord>> {
        let Some(raw) = self.store.get(Scope::Local, HISTORY_KEY)? else {
            return Ok(Vec::new());
        };
        if raw.is_null() {
            return Ok(Vec::new());
        }
        serde_json::from_value(raw).context("failed to decode summary history")
    }

    pub fn lookup(&self, video_id: &str) -> Result<Option<SummaryRecord>> {
        Ok(self
            .get_all()?
            .into_iter()
            .find(|entry| entry.video_id == video_id))
    }

    /// Insert or replace the entry for `record.video_id` and return what was stored.
    pub fn upsert(&self, mut record: SummaryRecord) -> Result<SummaryRecord> {
        let entries = self.get_all()?;
        if let Some(head) = entries.first() {
            record.timestamp = record.timestamp.max(head.timestamp);
        }

        let mut updated = Vec::with_capacity(entries.len() + 1);
        updated.push(record.clone());
        updated.extend(
            entries
                .into_iter()
                .filter(|entry| entry.video_id != record.video_id),
        );
        updated.truncate(MAX_HISTORY_SIZE);
        self.save(&updated)?;
        Ok(record)
    }

    /// Build a record for a fresh summary and insert it at the head.
    pub fn record_summary(
        &self,
        video_id: &str,
        title: Option<&str>,
        summary: SummaryResult,
    ) -> Result<SummaryRecord> {
        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TITLE);
        let record = SummaryRecord {
            video_id: video_id.to_string(),
            title: title.to_string(),
            thumbnail: thumbnail_url(video_id),
            summary,
            timestamp: now_epoch_millis()?,
        };
        self.upsert(record)
    }

    /// Returns whether an entry was removed. Absent ids leave the store untouched.
    pub fn delete_by_id(&self, video_id: &str) -> Result<bool> {
        let entries = self.get_all()?;
        let before = entries.len();
        let kept: Vec<SummaryRecord> = entries
            .into_iter()
            .filter(|entry| entry.video_id != video_id)
            .collect();
        if kept.len() == before {
            return Ok(false);
        }
        self.save(&kept)?;
        Ok(true)
    }

    pub fn clear(&self) -> Result<()> {
        self.store
            .set(Scope::Local, HISTORY_KEY, Value::Array(Vec::new()))
    }

    fn save(&self, entries: &[SummaryRecord]) -> Result<()> {
        let value = serde_json::to_value(entries)?;
        self.store.set(Scope::Local, HISTORY_KEY, value)
    }
}

#[cfg(test)]
mod tests {
    use super::{HistoryStore, MAX_HISTORY_SIZE};
    use crate::summarizer::store::memory::MemoryStore;
    use crate::summarizer::summary::{KeyPoint, SummaryRecord, SummaryResult, thumbnail_url};

    fn result(text: &str) -> SummaryResult {
        SummaryResult {
            overview: text.to_string(),
            key_points: vec![KeyPoint {
                point: format!("{text} point"),
                importance: "matters".to_string(),
            }],
            chapters: vec![],
        }
    }

    fn record(id: &str, timestamp: u64) -> SummaryRecord {
        SummaryRecord {
            video_id: id.to_string(),
            title: format!("title {id}"),
            thumbnail: thumbnail_url(id),
            summary: result(id),
            timestamp,
        }
    }

    #[test]
    fn empty_store_reads_as_empty_history() {
        let store = MemoryStore::default();
        let history = HistoryStore::new(&store);
        assert!(history.get_all().expect("get_all").is_empty());
        assert!(history.lookup("missing").expect("lookup").is_none());
    }

    #[test]
    fn upsert_prepends_most_recent_first() {
        let store = MemoryStore::default();
        let history = HistoryStore::new(&store);
        history.upsert(record("a", 1)).expect("upsert");
        history.upsert(record("b", 2)).expect("upsert");

        let ids: Vec<String> = history
            .get_all()
            .expect("get_all")
            .into_iter()
            .map(|r| r.video_id)
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn inserting_past_the_cap_evicts_the_first_inserted() {
        let store = MemoryStore::default();
        let history = HistoryStore::new(&store);
        for i in 0..=MAX_HISTORY_SIZE {
            history
                .upsert(record(&format!("vid-{i}"), i as u64))
                .expect("upsert");
        }

        let all = history.get_all().expect("get_all");
        assert_eq!(all.len(), MAX_HISTORY_SIZE);
        assert!(history.lookup("vid-0").expect("lookup").is_none());
        assert!(history.lookup("vid-1").expect("lookup").is_some());
        assert_eq!(all[0].video_id, format!("vid-{MAX_HISTORY_SIZE}"));
    }

    #[test]
    fn eviction_ignores_read_recency() {
        let store = MemoryStore::default();
        let history = HistoryStore::new(&store);
        for i in 0..MAX_HISTORY_SIZE {
            history
                .upsert(record(&format!("vid-{i}"), i as u64))
                .expect("upsert");
        }
        assert!(history.lookup("vid-0").expect("lookup").is_some());

        history.upsert(record("newcomer", 500)).expect("upsert");
        assert!(history.lookup("vid-0").expect("lookup").is_none());
    }

    #[test]
    fn upsert_same_id_keeps_one_entry_with_latest_result() {
        let store = MemoryStore::default();
        let history = HistoryStore::new(&store);
        history.upsert(record("a", 1)).expect("upsert");
        history.upsert(record("b", 2)).expect("upsert");

        let mut replacement = record("a", 3);
        replacement.summary = result("second take");
        history.upsert(replacement).expect("upsert");

        let all = history.get_all().expect("get_all");
        assert_eq!(all.len(), 2);
        let matches: Vec<_> = all.iter().filter(|r| r.video_id == "a").collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].summary.overview, "second take");
        assert_eq!(all[0].video_id, "a");
    }

    #[test]
    fn timestamps_never_decrease_on_insert() {
        let store = MemoryStore::default();
        let history = HistoryStore::new(&store);
        history.upsert(record("a", 1_000)).expect("upsert");
        history.upsert(record("b", 10)).expect("upsert");

        let all = history.get_all().expect("get_all");
        assert_eq!(all[0].video_id, "b");
        assert_eq!(all[0].timestamp, 1_000);
    }

    #[test]
    fn delete_absent_id_leaves_store_unchanged() {
        let store = MemoryStore::default();
        let history = HistoryStore::new(&store);
        history.upsert(record("a", 1)).expect("upsert");
        history.upsert(record("b", 2)).expect("upsert");
        let before = history.get_all().expect("get_all");
        let writes_before = store.writes();

        assert!(!history.delete_by_id("zzz").expect("delete"));

        assert_eq!(history.get_all().expect("get_all"), before);
        assert_eq!(store.writes(), writes_before);
    }

    #[test]
    fn delete_and_clear_are_idempotent() {
        let store = MemoryStore::default();
        let history = HistoryStore::new(&store);
        history.upsert(record("a", 1)).expect("upsert");
        history.upsert(record("b", 2)).expect("upsert");

        assert!(history.delete_by_id("a").expect("delete"));
        assert!(!history.delete_by_id("a").expect("delete again"));
        assert_eq!(history.get_all().expect("get_all").len(), 1);

        history.clear().expect("clear");
        history.clear().expect("clear again");
        assert!(history.get_all().expect("get_all").is_empty());
    }

    #[test]
    fn record_summary_fills_default_title_and_thumbnail() {
        let store = MemoryStore::default();
        let history = HistoryStore::new(&store);
        let saved = history
            .record_summary("xyz", Some("   "), result("x"))
            .expect("record");
        assert_eq!(saved.title, "Untitled Video");
        assert_eq!(saved.thumbnail, "https://i.ytimg.com/vi/xyz/mqdefault.jpg");
        assert!(saved.timestamp > 0);
        assert_eq!(history.lookup("xyz").expect("lookup"), Some(saved));
    }
}
