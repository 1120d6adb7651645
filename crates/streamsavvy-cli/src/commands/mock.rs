use crate::context::AppContext;
use crate::output::Output;
use crate::render;
use crate::ui::Spinner;
use crate::{MockCommands, MovieArgs};
use catalog_models::MediaKind;
use catalog_sources::mock::seed_database;
use catalog_sources::{CatalogQuery, CatalogSource, LocalMovie, MovieFilter, SortOrder};
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use serde_json::{json, Map, Value};

pub async fn run_mock(ctx: &AppContext, cmd: MockCommands, output: &Output) -> Result<()> {
    let client = ctx.mock();

    match cmd {
        MockCommands::List { search, genre, top_rated, page, limit } => {
            let filter = MovieFilter {
                title_like: search,
                genre_like: genre,
                sort: top_rated.then(|| "rating".to_string()),
                order: top_rated.then_some(SortOrder::Desc),
                page,
                limit: page.map(|_| limit),
            };
            let page = client.list(&filter).await.map_err(|e| eyre!("Failed to list movies: {}", e))?;

            if !output.is_human() {
                output.json(&json!({ "movies": page.movies, "total": page.total_count }));
            } else if !output.is_quiet() {
                render::print_local_movies(&page.movies);
                if let Some(total) = page.total_count {
                    output.info(format!("{} movies in total", total));
                }
            }
        }
        MockCommands::Get { id } => {
            let movie = client.get(id).await.map_err(|e| eyre!("Failed to fetch movie {}: {}", id, e))?;
            print_movie(&movie, output);
        }
        MockCommands::Add { movie } => {
            let record = movie.into_movie(None)?;
            let created = client.create(&record).await.map_err(|e| eyre!("Failed to add movie: {}", e))?;
            output.success(format!("Added {} ({})", created.title, created.id.unwrap_or_default()));
            print_movie(&created, output);
        }
        MockCommands::Update { id, movie } => {
            let current = client.get(id).await.map_err(|e| eyre!("Failed to fetch movie {}: {}", id, e))?;
            let record = movie.into_movie(Some(current))?;
            let updated = client
                .replace(id, &record)
                .await
                .map_err(|e| eyre!("Failed to update movie {}: {}", id, e))?;
            output.success(format!("Updated {}", updated.title));
            print_movie(&updated, output);
        }
        MockCommands::Patch { id, movie } => {
            let updates = movie.into_patch();
            if updates.as_object().map(Map::is_empty).unwrap_or(true) {
                return Err(eyre!("Nothing to change: pass at least one field"));
            }
            let patched = client
                .patch(id, &updates)
                .await
                .map_err(|e| eyre!("Failed to update movie {}: {}", id, e))?;
            output.success(format!("Updated {}", patched.title));
            print_movie(&patched, output);
        }
        MockCommands::Delete { id } => {
            client.delete(id).await.map_err(|e| eyre!("Failed to delete movie {}: {}", id, e))?;
            output.success(format!("Movie {} deleted", id));
        }
        MockCommands::Seed { out, pages } => {
            let tmdb = ctx.tmdb()?;
            let spinner = Spinner::start("Fetching popular movies from TMDB...", output.shows_human());
            let mut items = Vec::new();
            for page in 1..=pages.max(1) {
                let query = CatalogQuery::Popular { kind: MediaKind::Movie, page };
                match tmdb.list(&query).await {
                    Ok(result) => items.extend(result.results),
                    Err(e) => {
                        spinner.finish();
                        return Err(eyre!("Error fetching movies: {}", e));
                    }
                }
            }
            spinner.finish();

            let db = seed_database(&items, &ctx.config.tmdb.image_base_url);
            let content = serde_json::to_string_pretty(&db)?;
            std::fs::write(&out, content).wrap_err_with(|| format!("Failed to write {}", out.display()))?;
            output.success(format!("Saved {} movies to {}", items.len(), out.display()));
        }
    }
    Ok(())
}

fn print_movie(movie: &LocalMovie, output: &Output) {
    if !output.is_human() {
        output.json(&json!({ "movie": movie }));
    } else if !output.is_quiet() {
        render::print_local_movies(std::slice::from_ref(movie));
        if !movie.description.is_empty() {
            println!("{}", movie.description);
        }
    }
}

impl MovieArgs {
    /// Full record: given fields over `base`; a title is required
    fn into_movie(self, base: Option<LocalMovie>) -> Result<LocalMovie> {
        let base = base.unwrap_or(LocalMovie {
            id: None,
            title: String::new(),
            description: String::new(),
            genre: String::new(),
            year: None,
            rating: 0.0,
            poster_url: None,
        });
        let title = self.title.unwrap_or(base.title);
        if title.trim().is_empty() {
            return Err(eyre!("A title is required (--title)"));
        }
        Ok(LocalMovie {
            id: base.id,
            title,
            description: self.description.unwrap_or(base.description),
            genre: self.genre.unwrap_or(base.genre),
            year: self.year.or(base.year),
            rating: self.rating.unwrap_or(base.rating),
            poster_url: self.poster_url.or(base.poster_url),
        })
    }

    /// Only the fields that were given, keyed as stored
    fn into_patch(self) -> Value {
        let mut fields = Map::new();
        if let Some(v) = self.title {
            fields.insert("title".into(), json!(v));
        }
        if let Some(v) = self.description {
            fields.insert("description".into(), json!(v));
        }
        if let Some(v) = self.genre {
            fields.insert("genre".into(), json!(v));
        }
        if let Some(v) = self.year {
            fields.insert("year".into(), json!(v));
        }
        if let Some(v) = self.rating {
            fields.insert("rating".into(), json!(v));
        }
        if let Some(v) = self.poster_url {
            fields.insert("posterUrl".into(), json!(v));
        }
        Value::Object(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> MovieArgs {
        MovieArgs {
            title: None,
            description: None,
            genre: None,
            year: None,
            rating: None,
            poster_url: None,
        }
    }

    #[test]
    fn test_patch_contains_only_given_fields() {
        let patch = MovieArgs { rating: Some(9.0), poster_url: Some("https://x/p.jpg".into()), ..args() }.into_patch();
        let fields = patch.as_object().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(patch["posterUrl"], "https://x/p.jpg");
    }

    #[test]
    fn test_update_overlays_existing_record() {
        let current = LocalMovie {
            id: Some(4),
            title: "Old".into(),
            description: "Kept".into(),
            genre: "Drama".into(),
            year: Some(1990),
            rating: 5.0,
            poster_url: None,
        };
        let movie = MovieArgs { title: Some("New".into()), ..args() }.into_movie(Some(current)).unwrap();
        assert_eq!(movie.title, "New");
        assert_eq!(movie.description, "Kept");
        assert_eq!(movie.year, Some(1990));
        assert_eq!(movie.id, Some(4));
    }

    #[test]
    fn test_add_requires_title() {
        assert!(args().into_movie(None).is_err());
    }
}
