use catalog_models::{CastMember, CatalogItem, CatalogPage, Genre, ItemDetails, MediaKind, Video, UNTITLED};
use chrono::NaiveDate;
use serde::Deserialize;

/// Number of cast members kept from the credits block
const TOP_BILLED: usize = 10;

/// List entry as returned by list, search and discover endpoints.
/// Movies carry `title`/`release_date`, series carry `name`/`first_air_date`.
#[derive(Debug, Deserialize)]
pub(crate) struct TmdbListItem {
    id: u64,
    title: Option<String>,
    name: Option<String>,
    release_date: Option<String>,
    first_air_date: Option<String>,
    vote_average: Option<f32>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    overview: Option<String>,
    media_type: Option<String>,
    #[serde(default)]
    genre_ids: Vec<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TmdbPage {
    #[serde(default)]
    page: u32,
    #[serde(default)]
    results: Vec<TmdbListItem>,
    #[serde(default)]
    total_pages: u32,
    #[serde(default)]
    total_results: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TmdbGenreList {
    #[serde(default)]
    pub(crate) genres: Vec<Genre>,
}

#[derive(Debug, Deserialize)]
struct TmdbResults<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct TmdbVideo {
    key: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    site: String,
    #[serde(rename = "type", default)]
    video_type: String,
}

#[derive(Debug, Deserialize)]
struct TmdbCastMember {
    name: String,
    character: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbCredits {
    #[serde(default)]
    cast: Vec<TmdbCastMember>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TmdbDetails {
    #[serde(flatten)]
    base: TmdbListItem,
    runtime: Option<u32>,
    #[serde(default)]
    episode_run_time: Vec<u32>,
    tagline: Option<String>,
    #[serde(default)]
    genres: Vec<Genre>,
    videos: Option<TmdbResults<TmdbVideo>>,
    credits: Option<TmdbCredits>,
    recommendations: Option<TmdbResults<TmdbListItem>>,
    similar: Option<TmdbResults<TmdbListItem>>,
}

/// Parse an API date; empty strings mean "no date"
fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    value
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl TmdbListItem {
    /// Convert to a catalog item. Entries of other kinds (people in mixed
    /// trending lists) are dropped.
    pub(crate) fn into_item(self, fallback_kind: MediaKind) -> Option<CatalogItem> {
        let media_kind = match self.media_type.as_deref() {
            Some(media_type) => MediaKind::from_api(media_type)?,
            None => fallback_kind,
        };

        let release_date = match media_kind {
            MediaKind::Movie => parse_date(self.release_date.as_deref())
                .or_else(|| parse_date(self.first_air_date.as_deref())),
            MediaKind::Series => parse_date(self.first_air_date.as_deref())
                .or_else(|| parse_date(self.release_date.as_deref())),
        };

        let title = non_empty(self.title)
            .or_else(|| non_empty(self.name))
            .unwrap_or_else(|| UNTITLED.to_string());

        Some(CatalogItem {
            id: self.id,
            title,
            release_date,
            rating: self.vote_average,
            poster_path: non_empty(self.poster_path),
            backdrop_path: non_empty(self.backdrop_path),
            overview: non_empty(self.overview),
            genre_ids: self.genre_ids,
            media_kind,
        })
    }
}

fn convert_items(items: Vec<TmdbListItem>, kind: MediaKind) -> Vec<CatalogItem> {
    items.into_iter().filter_map(|i| i.into_item(kind)).collect()
}

impl TmdbPage {
    pub(crate) fn into_page(self, kind: MediaKind) -> CatalogPage {
        CatalogPage {
            page: self.page.max(1),
            results: convert_items(self.results, kind),
            total_pages: self.total_pages,
            total_results: self.total_results,
        }
    }
}

impl TmdbDetails {
    pub(crate) fn into_details(self, kind: MediaKind) -> ItemDetails {
        let runtime = self.runtime.or_else(|| self.episode_run_time.first().copied());
        // Detail payloads omit media_type, so the requested kind always applies
        let item = self
            .base
            .into_item(kind)
            .unwrap_or_else(|| CatalogItem::new(0, UNTITLED, kind));

        ItemDetails {
            item,
            runtime: runtime.filter(|r| *r > 0),
            tagline: non_empty(self.tagline),
            genres: self.genres,
            videos: self
                .videos
                .map(|v| v.results)
                .unwrap_or_default()
                .into_iter()
                .map(|v| Video {
                    key: v.key,
                    name: v.name,
                    site: v.site,
                    kind: v.video_type,
                })
                .collect(),
            cast: self
                .credits
                .map(|c| c.cast)
                .unwrap_or_default()
                .into_iter()
                .take(TOP_BILLED)
                .map(|c| CastMember {
                    name: c.name,
                    character: non_empty(c.character),
                })
                .collect(),
            recommendations: convert_items(self.recommendations.map(|r| r.results).unwrap_or_default(), kind),
            similar: convert_items(self.similar.map(|r| r.results).unwrap_or_default(), kind),
        }
    }
}
