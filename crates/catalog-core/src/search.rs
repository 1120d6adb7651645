use catalog_models::{CatalogItem, MediaKind};
use catalog_sources::{CatalogQuery, CatalogResult, CatalogSource};
use futures::future::{AbortHandle, Abortable};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Blank query: results cleared without a request
    Cleared,
    /// Results replaced with this many items
    Updated(usize),
    /// A newer search started before this one finished; nothing changed
    Superseded,
}

#[derive(Default)]
struct SearchState {
    generation: u64,
    in_flight: Option<AbortHandle>,
    term: String,
    results: Vec<CatalogItem>,
}

/// Holds the current search results. Starting a search aborts the one in
/// flight, and only the latest search may write results.
pub struct SearchController {
    source: Arc<dyn CatalogSource>,
    kind: MediaKind,
    state: Mutex<SearchState>,
}

impl SearchController {
    pub fn new(source: Arc<dyn CatalogSource>, kind: MediaKind) -> Self {
        Self {
            source,
            kind,
            state: Mutex::new(SearchState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, SearchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn term(&self) -> String {
        self.state().term.clone()
    }

    pub fn results(&self) -> Vec<CatalogItem> {
        self.state().results.clone()
    }

    /// Run a search. On failure the previous results stay in place and the
    /// error is returned.
    pub async fn search(&self, query: &str) -> CatalogResult<SearchOutcome> {
        let term = query.trim().to_string();

        let (generation, registration) = {
            let mut state = self.state();
            state.generation += 1;
            if let Some(previous) = state.in_flight.take() {
                previous.abort();
            }
            if term.is_empty() {
                state.term.clear();
                state.results.clear();
                return Ok(SearchOutcome::Cleared);
            }
            let (handle, registration) = AbortHandle::new_pair();
            state.in_flight = Some(handle);
            (state.generation, registration)
        };

        let request = CatalogQuery::Search {
            kind: self.kind,
            query: term.clone(),
            page: 1,
        };
        let result = match Abortable::new(self.source.list(&request), registration).await {
            Ok(result) => result,
            Err(_) => {
                debug!(term = %term, "Search aborted");
                return Ok(SearchOutcome::Superseded);
            }
        };

        let mut state = self.state();
        if state.generation != generation {
            debug!(term = %term, "Discarding stale search result");
            return Ok(SearchOutcome::Superseded);
        }
        state.in_flight = None;

        match result {
            Ok(page) => {
                let count = page.results.len();
                state.term = term;
                state.results = page.results;
                debug!(term = %state.term, count, "Search results updated");
                Ok(SearchOutcome::Updated(count))
            }
            Err(e) => {
                warn!("Failed to search for {}: {}", term, e);
                Err(e)
            }
        }
    }

    /// Abort any in-flight search without touching the results
    pub fn cancel(&self) {
        let mut state = self.state();
        state.generation += 1;
        if let Some(handle) = state.in_flight.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{movies, server_error, FakeSource};
    use async_trait::async_trait;
    use catalog_models::{CatalogPage, Genre, ItemDetails};
    use futures::channel::oneshot;

    fn search(term: &str) -> CatalogQuery {
        CatalogQuery::Search { kind: MediaKind::Movie, query: term.to_string(), page: 1 }
    }

    fn ids(items: &[CatalogItem]) -> Vec<u64> {
        items.iter().map(|i| i.id).collect()
    }

    /// "slow" blocks until the gate opens, "fast" answers at once
    struct GatedSource {
        gate: Mutex<Option<oneshot::Receiver<()>>>,
    }

    #[async_trait]
    impl CatalogSource for GatedSource {
        fn source_name(&self) -> &str {
            "gated"
        }

        async fn list(&self, query: &CatalogQuery) -> CatalogResult<CatalogPage> {
            if *query == search("slow") {
                let gate = self.gate.lock().unwrap().take();
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                return Ok(CatalogPage::single(movies(&[1])));
            }
            Ok(CatalogPage::single(movies(&[2])))
        }

        async fn details(&self, _kind: MediaKind, _id: u64) -> CatalogResult<ItemDetails> {
            Err(server_error())
        }

        async fn genres(&self, _kind: MediaKind) -> CatalogResult<Vec<Genre>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_blank_query_clears_without_request() {
        let source = Arc::new(FakeSource::new().with_list(search("alien"), movies(&[1, 2])));
        let controller = SearchController::new(source.clone(), MediaKind::Movie);

        assert_eq!(controller.search(" alien ").await.unwrap(), SearchOutcome::Updated(2));
        assert_eq!(controller.term(), "alien");
        assert_eq!(source.calls(), 1);

        assert_eq!(controller.search("   ").await.unwrap(), SearchOutcome::Cleared);
        assert!(controller.results().is_empty());
        assert_eq!(controller.term(), "");
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_results() {
        let source = FakeSource::new()
            .with_list(search("alien"), movies(&[1, 2]))
            .failing(search("broken"));
        let controller = SearchController::new(Arc::new(source), MediaKind::Movie);

        controller.search("alien").await.unwrap();
        assert!(controller.search("broken").await.is_err());
        assert_eq!(ids(&controller.results()), vec![1, 2]);
        assert_eq!(controller.term(), "alien");
    }

    #[tokio::test]
    async fn test_stale_search_does_not_overwrite_newer_results() {
        let (open, gate) = oneshot::channel();
        let source = GatedSource { gate: Mutex::new(Some(gate)) };
        let controller = SearchController::new(Arc::new(source), MediaKind::Movie);

        let mut slow = Box::pin(controller.search("slow"));
        assert!(futures::poll!(&mut slow).is_pending());

        assert_eq!(controller.search("fast").await.unwrap(), SearchOutcome::Updated(1));
        let _ = open.send(());

        assert_eq!(slow.await.unwrap(), SearchOutcome::Superseded);
        assert_eq!(ids(&controller.results()), vec![2]);
        assert_eq!(controller.term(), "fast");
    }

    #[tokio::test]
    async fn test_cancel_keeps_results() {
        let (_open, gate) = oneshot::channel::<()>();
        let source = GatedSource { gate: Mutex::new(Some(gate)) };
        let controller = SearchController::new(Arc::new(source), MediaKind::Movie);
        controller.search("fast").await.unwrap();

        let mut slow = Box::pin(controller.search("slow"));
        assert!(futures::poll!(&mut slow).is_pending());
        controller.cancel();

        assert_eq!(slow.await.unwrap(), SearchOutcome::Superseded);
        assert_eq!(ids(&controller.results()), vec![2]);
    }
}
