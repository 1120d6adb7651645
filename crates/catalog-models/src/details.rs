use serde::{Deserialize, Serialize};
use crate::catalog_item::CatalogItem;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

/// One page of list results from a catalog source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CatalogPage {
    pub page: u32,
    pub results: Vec<CatalogItem>,
    pub total_pages: u32,
    pub total_results: u32,
}

impl CatalogPage {
    pub fn single(results: Vec<CatalogItem>) -> Self {
        let total_results = results.len() as u32;
        Self {
            page: 1,
            results,
            total_pages: 1,
            total_results,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Video {
    pub key: String,
    pub name: String,
    pub site: String,
    pub kind: String, // "Trailer", "Teaser", "Featurette", ...
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CastMember {
    pub name: String,
    pub character: Option<String>,
}

/// Enriched form of a catalog item, used for the hero slot and the details view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemDetails {
    pub item: CatalogItem,
    pub runtime: Option<u32>, // minutes
    pub tagline: Option<String>,
    pub genres: Vec<Genre>,
    pub videos: Vec<Video>,
    pub cast: Vec<CastMember>,
    pub recommendations: Vec<CatalogItem>,
    pub similar: Vec<CatalogItem>,
}

impl ItemDetails {
    /// Plain details with nothing beyond the item itself
    pub fn from_item(item: CatalogItem) -> Self {
        Self {
            item,
            runtime: None,
            tagline: None,
            genres: Vec::new(),
            videos: Vec::new(),
            cast: Vec::new(),
            recommendations: Vec::new(),
            similar: Vec::new(),
        }
    }

    /// First YouTube trailer, if any
    pub fn trailer(&self) -> Option<&Video> {
        self.videos
            .iter()
            .find(|v| v.site.eq_ignore_ascii_case("youtube") && v.kind == "Trailer")
    }
}
