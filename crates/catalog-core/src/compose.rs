//! Home page composition: sections, hero, spotlight and genre browsing.

use catalog_config::HomeConfig;
use catalog_models::{CatalogItem, Genre, ItemDetails, MediaKind};
use catalog_sources::{CatalogQuery, CatalogResult, CatalogSource};
use futures::future::join_all;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKey {
    Trending,
    Spotlight,
    TopRated,
    Upcoming,
    NowPlaying,
    Popular,
}

/// How cards in a section are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardArt {
    Poster,
    Backdrop,
}

impl SectionKey {
    pub const DISPLAY_ORDER: [SectionKey; 6] = [
        SectionKey::Trending,
        SectionKey::Spotlight,
        SectionKey::TopRated,
        SectionKey::Upcoming,
        SectionKey::NowPlaying,
        SectionKey::Popular,
    ];

    pub const HERO_PRIORITY: [SectionKey; 6] = [
        SectionKey::Trending,
        SectionKey::Spotlight,
        SectionKey::Popular,
        SectionKey::TopRated,
        SectionKey::NowPlaying,
        SectionKey::Upcoming,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            SectionKey::Trending => "Trending Now",
            SectionKey::Spotlight => "South Indian Spotlight",
            SectionKey::TopRated => "Top Rated",
            SectionKey::Upcoming => "Upcoming Premieres",
            SectionKey::NowPlaying => "Now Playing In Theaters",
            SectionKey::Popular => "Popular On StreamSavvy",
        }
    }

    pub fn art(&self) -> CardArt {
        match self {
            SectionKey::NowPlaying => CardArt::Backdrop,
            _ => CardArt::Poster,
        }
    }

    /// The single list query behind the section; the spotlight is a composite
    fn query(&self) -> Option<CatalogQuery> {
        match self {
            SectionKey::Trending => Some(CatalogQuery::Trending { kind: MediaKind::Movie }),
            SectionKey::Spotlight => None,
            SectionKey::TopRated => Some(CatalogQuery::TopRated { kind: MediaKind::Movie, page: 1 }),
            SectionKey::Upcoming => Some(CatalogQuery::Upcoming { page: 1 }),
            SectionKey::NowPlaying => Some(CatalogQuery::NowPlaying { page: 1 }),
            SectionKey::Popular => Some(CatalogQuery::Popular { kind: MediaKind::Movie, page: 1 }),
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub key: SectionKey,
    pub title: String,
    pub art: CardArt,
    pub items: Vec<CatalogItem>,
}

impl Section {
    pub fn new(key: SectionKey, items: Vec<CatalogItem>) -> Self {
        Self {
            key,
            title: key.title().to_string(),
            art: key.art(),
            items,
        }
    }
}

/// The featured item: enriched when details could be fetched
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Hero {
    Detailed(ItemDetails),
    Basic(CatalogItem),
}

impl Hero {
    pub fn item(&self) -> &CatalogItem {
        match self {
            Hero::Detailed(details) => &details.item,
            Hero::Basic(item) => item,
        }
    }

    pub fn details(&self) -> Option<&ItemDetails> {
        match self {
            Hero::Detailed(details) => Some(details),
            Hero::Basic(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomePage {
    pub hero: Option<Hero>,
    pub sections: Vec<Section>,
    pub genres: Vec<Genre>,
}

impl HomePage {
    pub fn section(&self, key: SectionKey) -> Option<&Section> {
        self.sections.iter().find(|s| s.key == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenreFilter {
    #[default]
    All,
    Genre(u32),
}

impl FromStr for GenreFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(GenreFilter::All);
        }
        s.parse()
            .map(GenreFilter::Genre)
            .map_err(|_| format!("Invalid genre: {} (expected 'all' or a genre id)", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeOptions {
    pub spotlight_languages: Vec<String>,
    pub spotlight_min_votes: u32,
}

impl Default for HomeOptions {
    fn default() -> Self {
        Self::from(&HomeConfig::default())
    }
}

impl From<&HomeConfig> for HomeOptions {
    fn from(config: &HomeConfig) -> Self {
        Self {
            spotlight_languages: config.spotlight_languages.clone(),
            spotlight_min_votes: config.spotlight_min_votes,
        }
    }
}

/// Concatenate the lists keeping the first occurrence of each id
pub fn dedup_by_id(lists: Vec<Vec<CatalogItem>>) -> Vec<CatalogItem> {
    let mut seen = HashSet::new();
    lists
        .into_iter()
        .flatten()
        .filter(|item| seen.insert(item.id))
        .collect()
}

/// First item of the first non-empty section in hero priority order
pub fn hero_candidate(sections: &[Section]) -> Option<&CatalogItem> {
    SectionKey::HERO_PRIORITY.iter().find_map(|key| {
        sections
            .iter()
            .find(|s| s.key == *key)
            .and_then(|s| s.items.first())
    })
}

pub struct HomeComposer {
    source: Arc<dyn CatalogSource>,
    options: HomeOptions,
}

impl HomeComposer {
    pub fn new(source: Arc<dyn CatalogSource>, options: HomeOptions) -> Self {
        Self { source, options }
    }

    async fn fetch_list(&self, query: &CatalogQuery) -> CatalogResult<Vec<CatalogItem>> {
        Ok(self.source.list(query).await?.results)
    }

    async fn fetch_section(&self, key: SectionKey) -> CatalogResult<Vec<CatalogItem>> {
        match key.query() {
            Some(query) => self.fetch_list(&query).await,
            None => Ok(self.spotlight().await),
        }
    }

    /// Fetch all sections concurrently. A failed fetch yields an empty section.
    pub async fn sections(&self) -> Vec<Section> {
        let fetches = SectionKey::DISPLAY_ORDER.iter().map(|key| async move {
            match self.fetch_section(*key).await {
                Ok(items) => {
                    debug!(section = ?key, count = items.len(), "Section loaded");
                    Section::new(*key, items)
                }
                Err(e) => {
                    warn!("Failed to load section {}: {}", key.title(), e);
                    Section::new(*key, Vec::new())
                }
            }
        });
        join_all(fetches).await
    }

    /// Regional discovery across the configured languages. A failed
    /// language contributes nothing.
    pub async fn spotlight(&self) -> Vec<CatalogItem> {
        let fetches = self.options.spotlight_languages.iter().map(|language| async move {
            let query = CatalogQuery::ByOriginalLanguage {
                language: language.clone(),
                page: 1,
                min_votes: self.options.spotlight_min_votes,
            };
            match self.fetch_list(&query).await {
                Ok(items) => items,
                Err(e) => {
                    warn!("Spotlight query for {} failed: {}", language, e);
                    Vec::new()
                }
            }
        });
        dedup_by_id(join_all(fetches).await)
    }

    /// Pick and enrich the hero; falls back to the plain candidate when the
    /// details request fails
    pub async fn hero(&self, sections: &[Section]) -> Option<Hero> {
        let candidate = hero_candidate(sections)?;
        match self.source.details(candidate.media_kind, candidate.id).await {
            Ok(details) => Some(Hero::Detailed(details)),
            Err(e) => {
                warn!("Failed to fetch hero details for {}: {}", candidate.id, e);
                Some(Hero::Basic(candidate.clone()))
            }
        }
    }

    /// Genre list for the filter bar; empty on failure
    pub async fn genres(&self, kind: MediaKind) -> Vec<Genre> {
        match self.source.genres(kind).await {
            Ok(genres) => genres,
            Err(e) => {
                warn!("Failed to fetch genres: {}", e);
                Vec::new()
            }
        }
    }

    /// Items for the selected genre; `All` means no genre results and no request
    pub async fn genre_results(&self, filter: GenreFilter, kind: MediaKind) -> CatalogResult<Vec<CatalogItem>> {
        match filter {
            GenreFilter::All => Ok(Vec::new()),
            GenreFilter::Genre(genre_id) => {
                self.fetch_list(&CatalogQuery::ByGenre { kind, genre_id, page: 1 }).await
            }
        }
    }

    pub async fn home(&self) -> HomePage {
        let (sections, genres) = futures::join!(self.sections(), self.genres(MediaKind::Movie));
        let hero = self.hero(&sections).await;

        info!(
            source = self.source.source_name(),
            sections = sections.iter().filter(|s| !s.items.is_empty()).count(),
            hero = hero.as_ref().map(|h| h.item().id),
            "Home page composed"
        );

        HomePage { hero, sections, genres }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{movies, FakeSource};

    fn composer(source: FakeSource) -> (Arc<FakeSource>, HomeComposer) {
        let source = Arc::new(source);
        let composer = HomeComposer::new(source.clone(), HomeOptions::default());
        (source, composer)
    }

    fn language(lang: &str) -> CatalogQuery {
        CatalogQuery::ByOriginalLanguage { language: lang.to_string(), page: 1, min_votes: 50 }
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let deduped = dedup_by_id(vec![movies(&[1, 2]), movies(&[1, 3])]);
        let ids: Vec<u64> = deduped.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_hero_priority() {
        let sections = vec![
            Section::new(SectionKey::Trending, Vec::new()),
            Section::new(SectionKey::Spotlight, movies(&[10])),
            Section::new(SectionKey::Popular, movies(&[20])),
        ];
        assert_eq!(hero_candidate(&sections).unwrap().id, 10);

        let sections = vec![
            Section::new(SectionKey::Upcoming, movies(&[30])),
            Section::new(SectionKey::NowPlaying, movies(&[40])),
        ];
        assert_eq!(hero_candidate(&sections).unwrap().id, 40);

        assert!(hero_candidate(&[Section::new(SectionKey::Trending, Vec::new())]).is_none());
    }

    #[test]
    fn test_genre_filter_parse() {
        assert_eq!("All".parse::<GenreFilter>().unwrap(), GenreFilter::All);
        assert_eq!("28".parse::<GenreFilter>().unwrap(), GenreFilter::Genre(28));
        assert!("action".parse::<GenreFilter>().is_err());
    }

    #[tokio::test]
    async fn test_failing_section_renders_empty() {
        let source = FakeSource::new()
            .with_list(CatalogQuery::Trending { kind: MediaKind::Movie }, movies(&[1]))
            .failing(CatalogQuery::TopRated { kind: MediaKind::Movie, page: 1 })
            .with_list(CatalogQuery::Upcoming { page: 1 }, movies(&[3]))
            .with_list(CatalogQuery::NowPlaying { page: 1 }, movies(&[4]))
            .with_list(CatalogQuery::Popular { kind: MediaKind::Movie, page: 1 }, movies(&[5]))
            .with_list(language("ta"), movies(&[6]));
        let (_, composer) = composer(source);

        let sections = composer.sections().await;
        let keys: Vec<SectionKey> = sections.iter().map(|s| s.key).collect();
        assert_eq!(keys, SectionKey::DISPLAY_ORDER.to_vec());

        let counts: Vec<usize> = sections.iter().map(|s| s.items.len()).collect();
        assert_eq!(counts, vec![1, 1, 0, 1, 1, 1]);
        assert_eq!(sections[4].art, CardArt::Backdrop);
        assert_eq!(sections[4].title, "Now Playing In Theaters");
    }

    #[tokio::test]
    async fn test_spotlight_merges_languages_in_order() {
        let source = FakeSource::new()
            .with_list(language("te"), movies(&[1, 2]))
            .failing(language("ta"))
            .with_list(language("ml"), movies(&[2, 3]))
            .with_list(language("hi"), movies(&[4, 1]));
        let (source, composer) = composer(source);

        let ids: Vec<u64> = composer.spotlight().await.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(source.queries().len(), 4);
    }

    #[tokio::test]
    async fn test_hero_falls_back_without_details() {
        let source = FakeSource::new().with_list(CatalogQuery::Trending { kind: MediaKind::Movie }, movies(&[7]));
        let (_, composer) = composer(source);

        let home = composer.home().await;
        let hero = home.hero.unwrap();
        assert_eq!(hero, Hero::Basic(movies(&[7]).remove(0)));
        assert!(home.genres.is_empty());
    }

    #[tokio::test]
    async fn test_hero_is_enriched() {
        let mut details = ItemDetails::from_item(movies(&[8]).remove(0));
        details.runtime = Some(120);
        let source = FakeSource::new()
            .with_list(CatalogQuery::Popular { kind: MediaKind::Movie, page: 1 }, movies(&[8]))
            .with_details(details.clone())
            .with_genres(vec![Genre { id: 28, name: "Action".into() }]);
        let (_, composer) = composer(source);

        let home = composer.home().await;
        assert_eq!(home.hero.as_ref().and_then(|h| h.details()), Some(&details));
        assert_eq!(home.genres.len(), 1);
        assert_eq!(home.section(SectionKey::Popular).unwrap().items.len(), 1);
    }

    #[tokio::test]
    async fn test_no_hero_when_everything_is_empty() {
        let (_, composer) = composer(FakeSource::new());
        assert!(composer.home().await.hero.is_none());
    }

    #[tokio::test]
    async fn test_all_genres_makes_no_request() {
        let (source, composer) = composer(FakeSource::new());
        let results = composer.genre_results(GenreFilter::All, MediaKind::Movie).await.unwrap();
        assert!(results.is_empty());
        assert_eq!(source.calls(), 0);

        composer.genre_results(GenreFilter::Genre(28), MediaKind::Movie).await.unwrap();
        assert_eq!(
            source.queries(),
            vec![CatalogQuery::ByGenre { kind: MediaKind::Movie, genre_id: 28, page: 1 }]
        );
    }
}
