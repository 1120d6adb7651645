use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Title used when a source entry carries neither a movie title nor a series name
pub const UNTITLED: &str = "Untitled";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Movie,
    #[serde(alias = "tv")]
    Series,
}

impl MediaKind {
    /// Path segment the metadata API uses for this kind ("movie" or "tv")
    pub fn api_segment(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "tv",
        }
    }

    /// Parse the API's `media_type` value. Unknown values (e.g. "person") yield None.
    pub fn from_api(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "movie" => Some(MediaKind::Movie),
            "tv" | "series" => Some(MediaKind::Series),
            _ => None,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "movie"),
            MediaKind::Series => write!(f, "series"),
        }
    }
}

/// A movie or series with display metadata.
///
/// Items are never owned locally except as watchlist snapshots, which are
/// persisted independently of the source they came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    pub id: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>, // 0-10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub media_kind: MediaKind,
}

impl CatalogItem {
    pub fn new(id: u64, title: impl Into<String>, media_kind: MediaKind) -> Self {
        Self {
            id,
            title: title.into(),
            release_date: None,
            rating: None,
            poster_path: None,
            backdrop_path: None,
            overview: None,
            genre_ids: Vec::new(),
            media_kind,
        }
    }

    pub fn year(&self) -> Option<i32> {
        self.release_date.map(|d| d.year())
    }

    pub fn display_year(&self) -> String {
        self.year()
            .map(|y| y.to_string())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    /// Rating with one decimal, or "N/A" when missing or zero (unrated titles report 0)
    pub fn display_rating(&self) -> String {
        match self.rating {
            Some(r) if r > 0.0 => format!("{:.1}", r),
            _ => "N/A".to_string(),
        }
    }

    /// Snapshot suitable for the watchlist: blank titles are replaced
    pub fn normalized(&self) -> Self {
        let mut item = self.clone();
        if item.title.trim().is_empty() {
            item.title = UNTITLED.to_string();
        }
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_serde_accepts_tv_alias() {
        let kind: MediaKind = serde_json::from_str("\"tv\"").unwrap();
        assert_eq!(kind, MediaKind::Series);
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"series\"");
        assert_eq!(MediaKind::Series.api_segment(), "tv");
        assert_eq!(MediaKind::from_api("person"), None);
    }

    #[test]
    fn test_display_rating_and_year() {
        let mut item = CatalogItem::new(1, "Dune", MediaKind::Movie);
        assert_eq!(item.display_rating(), "N/A");
        assert_eq!(item.display_year(), "Unknown");

        item.rating = Some(7.34);
        item.release_date = NaiveDate::from_ymd_opt(2021, 9, 15);
        assert_eq!(item.display_rating(), "7.3");
        assert_eq!(item.year(), Some(2021));

        item.rating = Some(0.0);
        assert_eq!(item.display_rating(), "N/A");
    }

    #[test]
    fn test_snapshot_without_media_kind_defaults_to_movie() {
        let item: CatalogItem = serde_json::from_str(r#"{"id": 7, "title": "Heat"}"#).unwrap();
        assert_eq!(item.media_kind, MediaKind::Movie);
        assert_eq!(item.release_date, None);
    }

    #[test]
    fn test_normalized_fills_blank_title() {
        let item = CatalogItem::new(3, "  ", MediaKind::Series);
        assert_eq!(item.normalized().title, UNTITLED);
    }
}
