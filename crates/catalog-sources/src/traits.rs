use async_trait::async_trait;
use catalog_models::{CatalogPage, Genre, ItemDetails, MediaKind};
use crate::error::CatalogResult;

/// Sub-resources requested alongside item details
pub const DETAILS_APPEND: &str = "videos,credits,recommendations,similar";

/// A list request against a catalog source.
///
/// Each variant maps to one endpoint of the metadata API; other sources
/// interpret the variants as best they can.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CatalogQuery {
    Trending { kind: MediaKind },
    Popular { kind: MediaKind, page: u32 },
    TopRated { kind: MediaKind, page: u32 },
    Upcoming { page: u32 },
    NowPlaying { page: u32 },
    OnTheAir { page: u32 },
    Search { kind: MediaKind, query: String, page: u32 },
    ByGenre { kind: MediaKind, genre_id: u32, page: u32 },
    ByOriginalLanguage { language: String, page: u32, min_votes: u32 },
}

impl CatalogQuery {
    /// Media kind of the items this query returns
    pub fn kind(&self) -> MediaKind {
        match self {
            CatalogQuery::Trending { kind }
            | CatalogQuery::Popular { kind, .. }
            | CatalogQuery::TopRated { kind, .. }
            | CatalogQuery::Search { kind, .. }
            | CatalogQuery::ByGenre { kind, .. } => *kind,
            CatalogQuery::OnTheAir { .. } => MediaKind::Series,
            CatalogQuery::Upcoming { .. }
            | CatalogQuery::NowPlaying { .. }
            | CatalogQuery::ByOriginalLanguage { .. } => MediaKind::Movie,
        }
    }

    pub fn page(&self) -> u32 {
        match self {
            CatalogQuery::Trending { .. } => 1,
            CatalogQuery::Popular { page, .. }
            | CatalogQuery::TopRated { page, .. }
            | CatalogQuery::Upcoming { page }
            | CatalogQuery::NowPlaying { page }
            | CatalogQuery::OnTheAir { page }
            | CatalogQuery::Search { page, .. }
            | CatalogQuery::ByGenre { page, .. }
            | CatalogQuery::ByOriginalLanguage { page, .. } => *page,
        }
    }

    pub fn endpoint(&self) -> String {
        match self {
            CatalogQuery::Trending { kind } => format!("trending/{}/week", kind.api_segment()),
            CatalogQuery::Popular { kind, .. } => format!("{}/popular", kind.api_segment()),
            CatalogQuery::TopRated { kind, .. } => format!("{}/top_rated", kind.api_segment()),
            CatalogQuery::Upcoming { .. } => "movie/upcoming".to_string(),
            CatalogQuery::NowPlaying { .. } => "movie/now_playing".to_string(),
            CatalogQuery::OnTheAir { .. } => "tv/on_the_air".to_string(),
            CatalogQuery::Search { kind, .. } => format!("search/{}", kind.api_segment()),
            CatalogQuery::ByGenre { kind, .. } => format!("discover/{}", kind.api_segment()),
            CatalogQuery::ByOriginalLanguage { .. } => "discover/movie".to_string(),
        }
    }

    /// Endpoint-specific query parameters; `None` values are dropped by the client
    pub fn params(&self) -> Vec<(&'static str, Option<String>)> {
        match self {
            CatalogQuery::Trending { .. } => Vec::new(),
            CatalogQuery::Popular { page, .. }
            | CatalogQuery::TopRated { page, .. }
            | CatalogQuery::Upcoming { page }
            | CatalogQuery::NowPlaying { page }
            | CatalogQuery::OnTheAir { page } => vec![("page", Some(page.to_string()))],
            CatalogQuery::Search { query, page, .. } => vec![
                ("query", Some(query.clone())),
                ("page", Some(page.to_string())),
                ("include_adult", Some("false".to_string())),
            ],
            CatalogQuery::ByGenre { genre_id, page, .. } => vec![
                ("with_genres", Some(genre_id.to_string())),
                ("sort_by", Some("popularity.desc".to_string())),
                ("page", Some(page.to_string())),
            ],
            CatalogQuery::ByOriginalLanguage { language, page, min_votes } => vec![
                ("with_original_language", Some(language.clone())),
                ("sort_by", Some("popularity.desc".to_string())),
                ("page", Some(page.to_string())),
                ("vote_count.gte", Some(min_votes.to_string())),
            ],
        }
    }
}

#[async_trait]
pub trait CatalogSource: Send + Sync {
    fn source_name(&self) -> &str;

    async fn list(&self, query: &CatalogQuery) -> CatalogResult<CatalogPage>;
    async fn details(&self, kind: MediaKind, id: u64) -> CatalogResult<ItemDetails>;
    async fn genres(&self, kind: MediaKind) -> CatalogResult<Vec<Genre>>;
}
