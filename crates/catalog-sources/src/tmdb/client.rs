use crate::error::{CatalogError, CatalogResult};
use crate::tmdb::api::{TmdbDetails, TmdbGenreList, TmdbPage};
use crate::traits::{CatalogQuery, CatalogSource, DETAILS_APPEND};
use async_trait::async_trait;
use catalog_config::{is_usable_api_key, TmdbConfig, TMDB_API_KEY_ENV};
use catalog_models::{CatalogPage, Genre, ItemDetails, MediaKind};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_key: Option<String>,
    language: String,
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig) -> CatalogResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.effective_api_key(),
            language: config.language.clone(),
        })
    }

    fn api_key(&self) -> CatalogResult<&str> {
        match self.api_key.as_deref() {
            Some(key) if is_usable_api_key(Some(key)) => Ok(key),
            _ => {
                error!("TMDB API key is missing");
                Err(CatalogError::Configuration(format!(
                    "Missing TMDB API key. Set tmdb.api_key in config.toml or the {} environment variable.",
                    TMDB_API_KEY_ENV
                )))
            }
        }
    }

    /// Build the request URL: `api_key`, then the default locale (unless
    /// overridden), then the endpoint params. Absent and empty values are
    /// left out.
    pub fn build_url(&self, endpoint: &str, params: &[(&str, Option<String>)]) -> CatalogResult<Url> {
        let api_key = self.api_key()?;
        let raw = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        let mut url = Url::parse(&raw)
            .map_err(|e| CatalogError::Configuration(format!("Invalid TMDB URL {}: {}", raw, e)))?;

        let mut merged: Vec<(&str, Option<String>)> = vec![("language", Some(self.language.clone()))];
        for (key, value) in params {
            match merged.iter_mut().find(|(k, _)| k == key) {
                Some(existing) => existing.1 = value.clone(),
                None => merged.push((*key, value.clone())),
            }
        }

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("api_key", api_key);
            for (key, value) in &merged {
                if let Some(v) = value {
                    if !v.is_empty() {
                        pairs.append_pair(key, v);
                    }
                }
            }
        }

        Ok(url)
    }

    /// Perform one GET against the API and return the decoded JSON body
    pub async fn fetch(&self, endpoint: &str, params: &[(&str, Option<String>)]) -> CatalogResult<serde_json::Value> {
        self.fetch_json(endpoint, params).await
    }

    async fn fetch_json<T: DeserializeOwned>(&self, endpoint: &str, params: &[(&str, Option<String>)]) -> CatalogResult<T> {
        let url = self.build_url(endpoint, params)?;
        debug!(endpoint = endpoint, url = %redact_api_key(&url), "TMDB request");

        let response = self.client.get(url).send().await.map_err(|e| {
            error!("TMDB API error for {}: {}", endpoint, e);
            CatalogError::Http(e)
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("TMDB request failed: {} {}", status, body);
            return Err(CatalogError::RemoteFetch {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Copy of the URL with the API key masked, for logging
pub fn redact_api_key(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let value = if k == "api_key" { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), value)
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

#[async_trait]
impl CatalogSource for TmdbClient {
    fn source_name(&self) -> &str {
        "tmdb"
    }

    async fn list(&self, query: &CatalogQuery) -> CatalogResult<CatalogPage> {
        let page: TmdbPage = self.fetch_json(&query.endpoint(), &query.params()).await?;
        Ok(page.into_page(query.kind()))
    }

    async fn details(&self, kind: MediaKind, id: u64) -> CatalogResult<ItemDetails> {
        let endpoint = format!("{}/{}", kind.api_segment(), id);
        let params = [("append_to_response", Some(DETAILS_APPEND.to_string()))];
        let details: TmdbDetails = self.fetch_json(&endpoint, &params).await?;
        Ok(details.into_details(kind))
    }

    async fn genres(&self, kind: MediaKind) -> CatalogResult<Vec<Genre>> {
        let endpoint = format!("genre/{}/list", kind.api_segment());
        let list: TmdbGenreList = self.fetch_json(&endpoint, &[]).await?;
        Ok(list.genres)
    }
}
