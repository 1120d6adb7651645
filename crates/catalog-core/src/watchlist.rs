use crate::records::{self, WATCHLIST_KEY};
use crate::store::KeyValueStore;
use catalog_models::CatalogItem;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Saved catalog items, unique by id, in insertion order
pub struct Watchlist {
    store: Arc<dyn KeyValueStore>,
    items: Vec<CatalogItem>,
}

impl Watchlist {
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let stored: Vec<CatalogItem> = records::load_record(store.as_ref(), WATCHLIST_KEY).unwrap_or_default();

        let mut seen = HashSet::new();
        let items: Vec<CatalogItem> = stored.into_iter().filter(|item| seen.insert(item.id)).collect();
        debug!("Loaded {} watchlist items", items.len());

        Self { store, items }
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_in_watchlist(&self, id: u64) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Returns false if the item was already saved
    pub fn add(&mut self, item: &CatalogItem) -> bool {
        if self.is_in_watchlist(item.id) {
            return false;
        }
        self.items.push(item.normalized());
        self.save();
        info!("Added {} ({}) to watchlist", item.title, item.id);
        true
    }

    /// Returns false if nothing was removed
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() == before {
            return false;
        }
        self.save();
        info!("Removed {} from watchlist", id);
        true
    }

    /// Add or remove; returns whether the item is saved afterwards
    pub fn toggle(&mut self, item: &CatalogItem) -> bool {
        if self.is_in_watchlist(item.id) {
            self.remove(item.id);
            false
        } else {
            self.add(item)
        }
    }

    fn save(&self) {
        records::persist(self.store.as_ref(), WATCHLIST_KEY, &self.items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use catalog_models::MediaKind;

    fn item(id: u64, title: &str) -> CatalogItem {
        CatalogItem::new(id, title, MediaKind::Movie)
    }

    #[test]
    fn test_add_and_remove_are_idempotent() {
        let mut watchlist = Watchlist::load(Arc::new(MemoryStore::new()));
        assert!(watchlist.add(&item(1, "Alien")));
        assert!(!watchlist.add(&item(1, "Alien")));
        assert_eq!(watchlist.len(), 1);

        assert!(watchlist.remove(1));
        assert!(!watchlist.remove(1));
        assert!(watchlist.is_empty());
    }

    #[test]
    fn test_order_is_stable_across_reloads() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut watchlist = Watchlist::load(store.clone());
        watchlist.add(&item(3, "C"));
        watchlist.add(&item(1, "A"));
        watchlist.add(&item(2, "B"));
        watchlist.remove(1);

        let reloaded = Watchlist::load(store);
        let ids: Vec<u64> = reloaded.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 2]);
        assert!(reloaded.is_in_watchlist(2));
        assert!(!reloaded.is_in_watchlist(1));
    }

    #[test]
    fn test_toggle() {
        let mut watchlist = Watchlist::load(Arc::new(MemoryStore::new()));
        assert!(watchlist.toggle(&item(7, "Heat")));
        assert!(!watchlist.toggle(&item(7, "Heat")));
        assert!(watchlist.is_empty());
    }

    #[test]
    fn test_add_normalizes_blank_title() {
        let mut watchlist = Watchlist::load(Arc::new(MemoryStore::new()));
        watchlist.add(&item(4, "  "));
        assert_eq!(watchlist.items()[0].title, "Untitled");
    }

    #[test]
    fn test_corrupt_record_loads_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set(WATCHLIST_KEY, b"{\"oops\": true}").unwrap();
        let watchlist = Watchlist::load(store);
        assert!(watchlist.is_empty());
    }
}
