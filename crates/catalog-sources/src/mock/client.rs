use crate::error::{CatalogError, CatalogResult};
use crate::mock::{LocalMovie, MovieFilter, MoviePage};
use crate::traits::{CatalogQuery, CatalogSource};
use async_trait::async_trait;
use catalog_config::MockServerConfig;
use catalog_models::{CatalogPage, Genre, ItemDetails, MediaKind};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Page size used when serving catalog queries from the mock backend
const LIST_PAGE_SIZE: u32 = 20;

#[derive(Clone)]
pub struct MockCatalogClient {
    client: Arc<Client>,
    base_url: String,
}

impl MockCatalogClient {
    pub fn new(config: &MockServerConfig) -> Self {
        Self {
            client: Arc::new(Client::new()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn movies_url(&self) -> String {
        format!("{}/movies", self.base_url)
    }

    fn movie_url(&self, id: u64) -> String {
        format!("{}/movies/{}", self.base_url, id)
    }

    async fn send(&self, request: RequestBuilder, what: &str) -> CatalogResult<Response> {
        let response = request.send().await.map_err(|e| {
            error!("Error {}: {}", what, e);
            CatalogError::Http(e)
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(what.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Error {}: {} {}", what, status, body);
            return Err(CatalogError::RemoteFetch {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> CatalogResult<T> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn list(&self, filter: &MovieFilter) -> CatalogResult<MoviePage> {
        let params = filter.to_params();
        debug!(params = ?params, "Listing mock movies");
        let response = self
            .send(self.client.get(self.movies_url()).query(&params), "fetching movies")
            .await?;

        let total_count = response
            .headers()
            .get("x-total-count")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok());
        let movies: Vec<LocalMovie> = Self::decode(response).await?;

        Ok(MoviePage { movies, total_count })
    }

    pub async fn get(&self, id: u64) -> CatalogResult<LocalMovie> {
        let what = format!("fetching movie {}", id);
        let response = self.send(self.client.get(self.movie_url(id)), &what).await?;
        Self::decode(response).await
    }

    pub async fn create(&self, movie: &LocalMovie) -> CatalogResult<LocalMovie> {
        let response = self
            .send(self.client.post(self.movies_url()).json(movie), "adding movie")
            .await?;
        let created: LocalMovie = Self::decode(response).await?;
        info!("Added mock movie {:?}: {}", created.id, created.title);
        Ok(created)
    }

    pub async fn replace(&self, id: u64, movie: &LocalMovie) -> CatalogResult<LocalMovie> {
        let mut body = movie.clone();
        body.id = Some(id);
        let what = format!("updating movie {}", id);
        let response = self.send(self.client.put(self.movie_url(id)).json(&body), &what).await?;
        Self::decode(response).await
    }

    pub async fn patch(&self, id: u64, updates: &serde_json::Value) -> CatalogResult<LocalMovie> {
        let what = format!("partially updating movie {}", id);
        let response = self.send(self.client.patch(self.movie_url(id)).json(updates), &what).await?;
        Self::decode(response).await
    }

    pub async fn delete(&self, id: u64) -> CatalogResult<()> {
        let what = format!("deleting movie {}", id);
        self.send(self.client.delete(self.movie_url(id)), &what).await?;
        info!("Movie {} deleted", id);
        Ok(())
    }

    /// Translate a catalog query into a list filter. Language discovery has
    /// no counterpart in the mock data.
    pub fn filter_for(query: &CatalogQuery) -> Option<MovieFilter> {
        let page = Some(query.page());
        let limit = Some(LIST_PAGE_SIZE);
        match query {
            CatalogQuery::ByOriginalLanguage { .. } => None,
            CatalogQuery::Search { query, .. } => Some(MovieFilter {
                page,
                limit,
                ..MovieFilter::search(query)
            }),
            CatalogQuery::ByGenre { genre_id, .. } => Some(MovieFilter {
                page,
                limit,
                ..MovieFilter::genre(&genre_id.to_string())
            }),
            CatalogQuery::TopRated { .. } => Some(MovieFilter {
                page,
                limit,
                ..MovieFilter::top_rated()
            }),
            _ => Some(MovieFilter::paginated(query.page(), LIST_PAGE_SIZE)),
        }
    }
}

#[async_trait]
impl CatalogSource for MockCatalogClient {
    fn source_name(&self) -> &str {
        "mock"
    }

    async fn list(&self, query: &CatalogQuery) -> CatalogResult<CatalogPage> {
        // The mock backend only holds movies
        if query.kind() == MediaKind::Series {
            return Ok(CatalogPage::default());
        }
        let filter = match Self::filter_for(query) {
            Some(f) => f,
            None => return Ok(CatalogPage::default()),
        };

        let page = MockCatalogClient::list(self, &filter).await?;
        let mut results = page.movies.iter().map(LocalMovie::to_catalog_item).collect::<Vec<_>>();
        // genre_like is a substring match: 18 also matches "118"
        if let CatalogQuery::ByGenre { genre_id, .. } = query {
            results.retain(|item| item.genre_ids.contains(genre_id));
        }
        let total_results = page.total_count.unwrap_or(results.len() as u64) as u32;
        let total_pages = total_results.div_ceil(LIST_PAGE_SIZE).max(1);

        Ok(CatalogPage {
            page: query.page(),
            results,
            total_pages,
            total_results,
        })
    }

    async fn details(&self, kind: MediaKind, id: u64) -> CatalogResult<ItemDetails> {
        if kind == MediaKind::Series {
            return Err(CatalogError::NotFound(format!("series {}", id)));
        }
        let movie = self.get(id).await?;
        Ok(ItemDetails::from_item(movie.to_catalog_item()))
    }

    async fn genres(&self, _kind: MediaKind) -> CatalogResult<Vec<Genre>> {
        Ok(Vec::new())
    }
}
