//! Client for a local json-server style `/movies` resource.
//!
//! The server itself is third-party; this module only speaks its contract:
//! `_like` substring filters, `_sort`/`_order`, `_page`/`_limit` with the
//! total in `X-Total-Count`.

pub mod client;
pub mod seed;

use catalog_models::{CatalogItem, MediaKind};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

pub use client::MockCatalogClient;
pub use seed::seed_database;

/// Record stored in the mock backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocalMovie {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub genre: String, // comma-separated
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub poster_url: Option<String>,
}

/// Seeded databases store "Unknown" for missing years
fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

impl LocalMovie {
    /// View as a catalog item. Records without an id map to id 0.
    pub fn to_catalog_item(&self) -> CatalogItem {
        let mut item = CatalogItem::new(self.id.unwrap_or_default(), self.title.clone(), MediaKind::Movie);
        item.release_date = self.year.and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1));
        item.rating = Some(self.rating);
        item.overview = Some(self.description.clone()).filter(|d| !d.is_empty());
        // Poster URLs here are absolute, so they are kept out of poster_path
        item.genre_ids = self
            .genre
            .split(',')
            .filter_map(|g| g.trim().parse().ok())
            .collect();
        item
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Query for the list endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieFilter {
    pub title_like: Option<String>,
    pub genre_like: Option<String>,
    pub sort: Option<String>,
    pub order: Option<SortOrder>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl MovieFilter {
    pub fn search(query: &str) -> Self {
        Self {
            title_like: Some(query.to_string()),
            ..Self::default()
        }
    }

    pub fn genre(genre: &str) -> Self {
        Self {
            genre_like: Some(genre.to_string()),
            ..Self::default()
        }
    }

    pub fn top_rated() -> Self {
        Self {
            sort: Some("rating".to_string()),
            order: Some(SortOrder::Desc),
            ..Self::default()
        }
    }

    pub fn paginated(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(t) = self.title_like.as_ref().filter(|t| !t.is_empty()) {
            params.push(("title_like", t.clone()));
        }
        if let Some(g) = self.genre_like.as_ref().filter(|g| !g.is_empty()) {
            params.push(("genre_like", g.clone()));
        }
        if let Some(s) = &self.sort {
            params.push(("_sort", s.clone()));
        }
        if let Some(o) = self.order {
            params.push(("_order", o.as_str().to_string()));
        }
        if let Some(p) = self.page {
            params.push(("_page", p.to_string()));
        }
        if let Some(l) = self.limit {
            params.push(("_limit", l.to_string()));
        }
        params
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoviePage {
    pub movies: Vec<LocalMovie>,
    pub total_count: Option<u64>, // from X-Total-Count, only sent for paginated requests
}
