use crate::images::{image_url, POSTER_SIZE};
use catalog_models::CatalogItem;
use serde_json::json;

const NO_DESCRIPTION: &str = "No description available";

/// Year written for items without a release date
const UNKNOWN_YEAR: &str = "Unknown";

fn to_seed_record(item: &CatalogItem, image_base_url: &str) -> serde_json::Value {
    let description = item
        .overview
        .clone()
        .filter(|o| !o.is_empty())
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());
    let genre = item
        .genre_ids
        .iter()
        .map(|g| g.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    // Through the decimal form so 8.4 is written as 8.4, not its widened f64
    let rating: f64 = item.rating.map_or(0.0, |r| r.to_string().parse().unwrap_or(0.0));
    let year = match item.year() {
        Some(y) => json!(y),
        None => json!(UNKNOWN_YEAR),
    };

    json!({
        "id": item.id,
        "title": item.title,
        "description": description,
        "genre": genre,
        "year": year,
        "rating": rating,
        "posterUrl": image_url(image_base_url, item.poster_path.as_deref(), POSTER_SIZE),
    })
}

/// Build a json-server database document (`{"movies": [...]}`) from catalog items
pub fn seed_database(items: &[CatalogItem], image_base_url: &str) -> serde_json::Value {
    let movies: Vec<serde_json::Value> = items.iter().map(|i| to_seed_record(i, image_base_url)).collect();
    json!({ "movies": movies })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::LocalMovie;
    use catalog_models::MediaKind;
    use chrono::NaiveDate;

    #[test]
    fn test_seed_database_shape() {
        let mut item = CatalogItem::new(550, "Fight Club", MediaKind::Movie);
        item.genre_ids = vec![18, 53];
        item.poster_path = Some("/fc.jpg".into());
        item.rating = Some(8.4);
        item.release_date = NaiveDate::from_ymd_opt(1999, 10, 15);

        let bare = CatalogItem::new(1, "Bare", MediaKind::Movie);

        let db = seed_database(&[item, bare], "https://image.tmdb.org/t/p");
        let movies = db["movies"].as_array().unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0]["id"], 550);
        assert_eq!(movies[0]["genre"], "18, 53");
        assert_eq!(movies[0]["year"], 1999);
        assert_eq!(movies[0]["rating"], 8.4);
        assert_eq!(movies[0]["posterUrl"], "https://image.tmdb.org/t/p/w500/fc.jpg");
        assert_eq!(movies[1]["description"], NO_DESCRIPTION);
        assert_eq!(movies[1]["rating"], 0.0);
        assert!(movies[1]["posterUrl"].is_null());
        assert_eq!(movies[1]["year"], "Unknown");
    }

    #[test]
    fn test_seeded_records_read_back_as_movies() {
        let bare = CatalogItem::new(7, "No Date", MediaKind::Movie);
        let db = seed_database(&[bare], "https://image.tmdb.org/t/p");
        let movie: LocalMovie = serde_json::from_value(db["movies"][0].clone()).unwrap();
        assert_eq!(movie.id, Some(7));
        assert_eq!(movie.year, None);
        assert_eq!(movie.description, NO_DESCRIPTION);
    }
}
