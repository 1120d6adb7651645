use catalog_models::CatalogItem;

pub const POSTER_SIZE: &str = "w500";
pub const BACKDROP_SIZE: &str = "w1280";
pub const BACKDROP_CARD_SIZE: &str = "w780";

/// Build an image URL from a relative path, `None` when there is no path
pub fn image_url(base_url: &str, path: Option<&str>, size: &str) -> Option<String> {
    match path {
        Some(p) if !p.is_empty() => Some(format!("{}/{}{}", base_url.trim_end_matches('/'), size, p)),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct ImageUrls {
    base_url: String,
}

impl ImageUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    pub fn poster(&self, item: &CatalogItem) -> Option<String> {
        image_url(&self.base_url, item.poster_path.as_deref(), POSTER_SIZE)
    }

    /// Card art for backdrop-style sliders
    pub fn backdrop_card(&self, item: &CatalogItem) -> Option<String> {
        image_url(&self.base_url, item.backdrop_path.as_deref(), BACKDROP_CARD_SIZE)
    }

    /// Hero art: backdrop, falling back to the poster
    pub fn hero(&self, item: &CatalogItem) -> Option<String> {
        let path = item.backdrop_path.as_deref().or(item.poster_path.as_deref());
        image_url(&self.base_url, path, BACKDROP_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_models::MediaKind;

    #[test]
    fn test_image_url() {
        assert_eq!(
            image_url("https://image.tmdb.org/t/p/", Some("/abc.jpg"), POSTER_SIZE).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg")
        );
        assert_eq!(image_url("https://image.tmdb.org/t/p", None, POSTER_SIZE), None);
        assert_eq!(image_url("https://image.tmdb.org/t/p", Some(""), POSTER_SIZE), None);
    }

    #[test]
    fn test_hero_falls_back_to_poster() {
        let urls = ImageUrls::new("https://img");
        let mut item = CatalogItem::new(1, "X", MediaKind::Movie);
        item.poster_path = Some("/p.jpg".into());
        assert_eq!(urls.hero(&item).as_deref(), Some("https://img/w1280/p.jpg"));
        assert_eq!(urls.backdrop_card(&item), None);

        item.backdrop_path = Some("/b.jpg".into());
        assert_eq!(urls.hero(&item).as_deref(), Some("https://img/w1280/b.jpg"));
        assert_eq!(urls.backdrop_card(&item).as_deref(), Some("https://img/w780/b.jpg"));
    }
}
