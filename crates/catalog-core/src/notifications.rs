use crate::records::{self, NOTIFICATIONS_KEY, SEEN_TRENDING_KEY};
use crate::store::KeyValueStore;
use catalog_config::HomeConfig;
use catalog_models::{CatalogItem, NotificationRecord};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Maximum notifications kept in the panel
pub const NOTIFICATION_CAPACITY: usize = 50;

/// Diff a trending list against the seen ids.
///
/// Returns notifications for at most `max_new` unseen items and the updated
/// seen-id list: the old ids followed by every fresh id, trimmed to the most
/// recent `capacity`.
pub fn detect_trending(
    seen: &[u64],
    trending: &[CatalogItem],
    max_new: usize,
    capacity: usize,
    now: DateTime<Utc>,
) -> (Vec<NotificationRecord>, Vec<u64>) {
    let seen_set: HashSet<u64> = seen.iter().copied().collect();
    let mut fresh_ids = HashSet::new();
    let fresh: Vec<&CatalogItem> = trending
        .iter()
        .filter(|item| !seen_set.contains(&item.id) && fresh_ids.insert(item.id))
        .collect();

    let notifications = fresh
        .iter()
        .take(max_new)
        .map(|item| NotificationRecord::trending(item, now))
        .collect();

    let mut updated = seen.to_vec();
    let mut in_updated = seen_set;
    for item in &fresh {
        if in_updated.insert(item.id) {
            updated.push(item.id);
        }
    }
    if updated.len() > capacity {
        updated.drain(..updated.len() - capacity);
    }

    (notifications, updated)
}

/// Tracks which trending items have already produced a notification
pub struct TrendingTracker {
    store: Arc<dyn KeyValueStore>,
    max_new: usize,
    capacity: usize,
}

impl TrendingTracker {
    pub fn new(store: Arc<dyn KeyValueStore>, config: &HomeConfig) -> Self {
        Self {
            store,
            max_new: config.max_new_notifications,
            capacity: config.seen_ids_capacity,
        }
    }

    pub fn seen_ids(&self) -> Vec<u64> {
        records::load_record(self.store.as_ref(), SEEN_TRENDING_KEY).unwrap_or_default()
    }

    /// Notifications for trending items not seen before. The seen ids are
    /// only rewritten when something new shows up.
    pub fn detect(&self, trending: &[CatalogItem], now: DateTime<Utc>) -> Vec<NotificationRecord> {
        if trending.is_empty() {
            return Vec::new();
        }

        let seen = self.seen_ids();
        let (notifications, updated) = detect_trending(&seen, trending, self.max_new, self.capacity, now);
        if updated != seen {
            records::persist(self.store.as_ref(), SEEN_TRENDING_KEY, &updated);
        }

        debug!(fresh = notifications.len(), seen = updated.len(), "Trending detection finished");
        notifications
    }
}

/// Persisted notification panel, newest first
pub struct NotificationCenter {
    store: Arc<dyn KeyValueStore>,
    notifications: Vec<NotificationRecord>,
}

impl NotificationCenter {
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let notifications = records::load_record(store.as_ref(), NOTIFICATIONS_KEY).unwrap_or_default();
        Self { store, notifications }
    }

    pub fn notifications(&self) -> &[NotificationRecord] {
        &self.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    /// Prepend new notifications, skipping ids already present. Returns the
    /// number added.
    pub fn add(&mut self, incoming: Vec<NotificationRecord>) -> usize {
        let mut ids: HashSet<String> = self.notifications.iter().map(|n| n.id.clone()).collect();
        let fresh: Vec<NotificationRecord> = incoming.into_iter().filter(|n| ids.insert(n.id.clone())).collect();
        if fresh.is_empty() {
            return 0;
        }

        let added = fresh.len();
        let mut merged = fresh;
        merged.append(&mut self.notifications);
        merged.truncate(NOTIFICATION_CAPACITY);
        self.notifications = merged;

        self.save();
        info!("{} new notifications", added);
        added
    }

    /// Returns the number of notifications that were unread
    pub fn mark_all_read(&mut self) -> usize {
        let unread = self.unread_count();
        if unread > 0 {
            self.notifications.iter_mut().for_each(|n| n.read = true);
            self.save();
        }
        unread
    }

    fn save(&self) {
        records::persist(self.store.as_ref(), NOTIFICATIONS_KEY, &self.notifications);
    }
}
