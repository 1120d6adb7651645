use async_trait::async_trait;
use catalog_models::{CatalogItem, CatalogPage, Genre, ItemDetails, MediaKind};
use catalog_sources::{CatalogError, CatalogQuery, CatalogResult, CatalogSource};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn movies(ids: &[u64]) -> Vec<CatalogItem> {
    ids.iter()
        .map(|id| CatalogItem::new(*id, format!("Movie {}", id), MediaKind::Movie))
        .collect()
}

pub fn server_error() -> CatalogError {
    CatalogError::RemoteFetch {
        status: 500,
        body: "boom".to_string(),
    }
}

/// Canned catalog source; unknown queries return an empty page
#[derive(Default)]
pub struct FakeSource {
    lists: HashMap<CatalogQuery, Vec<CatalogItem>>,
    failing: HashSet<CatalogQuery>,
    details: HashMap<u64, ItemDetails>,
    genres: Option<Vec<Genre>>,
    calls: AtomicUsize,
    seen: Mutex<Vec<CatalogQuery>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list(mut self, query: CatalogQuery, items: Vec<CatalogItem>) -> Self {
        self.lists.insert(query, items);
        self
    }

    pub fn failing(mut self, query: CatalogQuery) -> Self {
        self.failing.insert(query);
        self
    }

    pub fn with_details(mut self, details: ItemDetails) -> Self {
        self.details.insert(details.item.id, details);
        self
    }

    pub fn with_genres(mut self, genres: Vec<Genre>) -> Self {
        self.genres = Some(genres);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<CatalogQuery> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogSource for FakeSource {
    fn source_name(&self) -> &str {
        "fake"
    }

    async fn list(&self, query: &CatalogQuery) -> CatalogResult<CatalogPage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(query.clone());
        if self.failing.contains(query) {
            return Err(server_error());
        }
        Ok(CatalogPage::single(self.lists.get(query).cloned().unwrap_or_default()))
    }

    async fn details(&self, _kind: MediaKind, id: u64) -> CatalogResult<ItemDetails> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.details.get(&id).cloned().ok_or_else(server_error)
    }

    async fn genres(&self, _kind: MediaKind) -> CatalogResult<Vec<Genre>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.genres.clone().ok_or_else(server_error)
    }
}
