//! Bounded most-recent-first history of speak actions.
//!
//! The cache lives in memory and mirrors itself to a [`HistoryStore`] as a
//! whole snapshot after every mutation. Storage failures are logged and
//! otherwise ignored; the in-memory state stays authoritative.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{
    HISTORY_LIMIT, HistoryItem, HistorySnapshot, HistoryStatus, truncate_to_millis,
};
use crate::ports::HistoryStore;

pub struct HistoryCache {
    store: Arc<dyn HistoryStore>,
    items: Vec<HistoryItem>,
    total_requests: u64,
}

impl HistoryCache {
    /// An empty cache that has not read storage.
    pub fn new(store: Arc<dyn HistoryStore>) -> Self {
        Self {
            store,
            items: Vec::new(),
            total_requests: 0,
        }
    }

    /// Rehydrate from storage.
    ///
    /// Missing keys give an empty cache. Unreadable data is logged and also
    /// gives an empty cache.
    pub async fn restore(store: Arc<dyn HistoryStore>) -> Self {
        let mut cache = Self::new(store);
        let snapshot = match cache.store.load().await {
            Ok(stored) => HistorySnapshot::decode(&stored).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Could not read saved history");
                HistorySnapshot::default()
            }),
            Err(e) => {
                tracing::warn!(error = %e, "Could not load history from storage");
                HistorySnapshot::default()
            }
        };
        cache.items = snapshot.items;
        cache.total_requests = snapshot.total_requests;
        cache
    }

    /// Add a speak action to the front, evict past the limit, bump the
    /// request counter, then persist.
    pub async fn record(
        &mut self,
        text: impl Into<String>,
        voice: impl Into<String>,
        speed: f64,
        pitch: f64,
    ) -> HistoryItem {
        let item = self.insert_at(Utc::now(), text.into(), voice.into(), speed, pitch);
        self.persist().await;
        item
    }

    fn insert_at(
        &mut self,
        now: DateTime<Utc>,
        text: String,
        voice: String,
        speed: f64,
        pitch: f64,
    ) -> HistoryItem {
        let timestamp = truncate_to_millis(now);
        let mut id = timestamp.timestamp_millis();
        if let Some(newest) = self.items.first() {
            if newest.id >= id {
                id = newest.id + 1;
            }
        }

        let item = HistoryItem {
            id,
            text,
            voice,
            speed,
            pitch,
            timestamp,
            status: HistoryStatus::Completed,
        };
        self.items.insert(0, item.clone());
        self.items.truncate(HISTORY_LIMIT);
        self.total_requests += 1;
        item
    }

    /// Write the whole snapshot. Failures are logged, never returned.
    pub async fn persist(&self) {
        let snapshot = HistorySnapshot {
            items: self.items.clone(),
            total_requests: self.total_requests,
        };
        let stored = match snapshot.encode() {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(error = %e, "Could not serialize history");
                return;
            }
        };
        if let Err(e) = self.store.save(&stored).await {
            tracing::warn!(error = %e, "Could not save history to storage");
        }
    }

    pub fn find(&self, id: i64) -> Option<&HistoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items, most recent first.
    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    pub const fn total_requests(&self) -> u64 {
        self.total_requests
    }

    /// Drop every item. The request counter is kept.
    pub async fn clear(&mut self) {
        self.items.clear();
        self.persist().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StoredHistory;
    use crate::services::test_support::InMemoryHistoryStore;
    use std::sync::atomic::Ordering;

    fn store() -> Arc<InMemoryHistoryStore> {
        Arc::new(InMemoryHistoryStore::default())
    }

    #[tokio::test]
    async fn never_exceeds_limit_and_stays_newest_first() {
        let store = store();
        let mut cache = HistoryCache::new(store.clone());

        for i in 0..25 {
            cache.record(format!("text {i}"), "Alex", 1.0, 1.0).await;
            assert!(cache.items().len() <= HISTORY_LIMIT);
        }

        assert_eq!(cache.items().len(), HISTORY_LIMIT);
        assert_eq!(cache.items()[0].text, "text 24");
        assert_eq!(cache.items()[9].text, "text 15");
        assert!(cache.items().windows(2).all(|w| w[0].id > w[1].id));
        assert_eq!(cache.total_requests(), 25);
        assert_eq!(store.saves.load(Ordering::SeqCst), 25);
    }

    #[tokio::test]
    async fn ids_stay_unique_within_one_millisecond() {
        let mut cache = HistoryCache::new(store());
        let now = Utc::now();
        let a = cache.insert_at(now, "a".into(), "Default".into(), 1.0, 1.0);
        let b = cache.insert_at(now, "b".into(), "Default".into(), 1.0, 1.0);
        assert_eq!(b.id, a.id + 1);
    }

    #[tokio::test]
    async fn persist_then_restore_reproduces_items() {
        let store = store();
        let mut cache = HistoryCache::new(store.clone());
        cache.record("Hello", "Samantha", 1.3, 0.8).await;
        cache.record("World", "Default", 0.7, 1.2).await;

        let restored = HistoryCache::restore(store).await;

        assert_eq!(restored.items(), cache.items());
        assert_eq!(restored.total_requests(), 2);
        for (a, b) in restored.items().iter().zip(cache.items()) {
            assert_eq!(a.timestamp.timestamp_millis(), b.timestamp.timestamp_millis());
        }
    }

    #[tokio::test]
    async fn restore_from_empty_storage_is_empty() {
        let cache = HistoryCache::restore(store()).await;
        assert!(cache.items().is_empty());
        assert_eq!(cache.total_requests(), 0);
    }

    #[tokio::test]
    async fn restore_from_corrupt_storage_is_empty() {
        let store = store();
        *store.stored.lock().unwrap() = StoredHistory {
            history: Some("not json".into()),
            total_requests: Some("3".into()),
        };
        let cache = HistoryCache::restore(store).await;
        assert!(cache.items().is_empty());
    }

    #[tokio::test]
    async fn write_failures_do_not_disturb_memory() {
        let store = store();
        store.fail_writes.store(true, Ordering::SeqCst);
        let mut cache = HistoryCache::new(store.clone());

        let item = cache.record("Hello", "Alex", 1.0, 1.0).await;

        assert_eq!(cache.find(item.id).map(|i| i.text.as_str()), Some("Hello"));
        assert_eq!(*store.stored.lock().unwrap(), StoredHistory::default());
    }

    #[tokio::test]
    async fn clear_keeps_the_counter() {
        let store = store();
        let mut cache = HistoryCache::new(store.clone());
        cache.record("a", "Alex", 1.0, 1.0).await;
        cache.clear().await;

        let restored = HistoryCache::restore(store).await;
        assert!(restored.items().is_empty());
        assert_eq!(restored.total_requests(), 1);
    }
}
