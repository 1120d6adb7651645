use crate::context::AppContext;
use crate::output::Output;
use crate::render;
use crate::ui::Spinner;
use catalog_core::{
    CardArt, GenreFilter, HomeComposer, HomeOptions, NotificationCenter, SearchController, SearchOutcome, SectionKey,
    TrendingTracker, Watchlist,
};
use catalog_models::MediaKind;
use chrono::Utc;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;

fn media_kind(tv: bool) -> MediaKind {
    if tv {
        MediaKind::Series
    } else {
        MediaKind::Movie
    }
}

fn composer(ctx: &AppContext) -> Result<HomeComposer> {
    Ok(HomeComposer::new(ctx.source()?, HomeOptions::from(&ctx.config.home)))
}

pub async fn run_home(ctx: &AppContext, output: &Output) -> Result<()> {
    let session = ctx.require_home()?;
    let composer = composer(ctx)?;

    let spinner = Spinner::start("Loading your home page...", output.shows_human());
    let home = composer.home().await;
    spinner.finish();

    let trending = home
        .section(SectionKey::Trending)
        .map(|s| s.items.as_slice())
        .unwrap_or_default();
    let fresh = TrendingTracker::new(ctx.store.clone(), &ctx.config.home).detect(trending, Utc::now());
    let mut center = NotificationCenter::load(ctx.store.clone());
    let added = center.add(fresh);

    if !output.is_human() {
        output.json(&json!({
            "user": session.display_name(),
            "hero": home.hero,
            "sections": home.sections,
            "genres": home.genres,
            "new_notifications": added,
            "unread_notifications": center.unread_count(),
        }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    let images = ctx.images();
    println!("{} {}\n", "Welcome back,".dimmed(), session.display_name().bold());
    match &home.hero {
        Some(hero) => render::print_hero(hero, &images),
        None => println!("{}", "Nothing featured right now.".dimmed()),
    }
    for section in &home.sections {
        render::print_section(section, &images);
    }
    if !home.genres.is_empty() {
        let names: Vec<&str> = home.genres.iter().map(|g| g.name.as_str()).collect();
        println!("\n{} {}", "Genres:".bold(), names.join(" · "));
    }
    let unread = center.unread_count();
    if unread > 0 {
        println!("\n🔔 {} unread notification(s). Run 'streamsavvy notifications' to read them.", unread);
    }
    Ok(())
}

pub async fn run_search(ctx: &AppContext, query: &str, tv: bool, output: &Output) -> Result<()> {
    ctx.require_home()?;
    let controller = SearchController::new(ctx.source()?, media_kind(tv));

    let spinner = Spinner::start(format!("Searching for \"{}\"...", query.trim()), output.shows_human());
    let outcome = controller.search(query).await;
    spinner.finish();

    match outcome.map_err(|e| eyre!("Search failed: {}", e))? {
        SearchOutcome::Cleared => {
            output.info("Search cleared");
            return Ok(());
        }
        SearchOutcome::Superseded => return Ok(()),
        SearchOutcome::Updated(_) => {}
    }

    let results = controller.results();
    if !output.is_human() {
        output.json(&json!({ "query": controller.term(), "results": results }));
    } else if !output.is_quiet() {
        let title = format!("Results for \"{}\"", controller.term());
        render::print_items(&title, &results, &ctx.images(), CardArt::Poster);
    }
    Ok(())
}

pub async fn run_genres(ctx: &AppContext, tv: bool, output: &Output) -> Result<()> {
    ctx.require_home()?;
    let genres = composer(ctx)?.genres(media_kind(tv)).await;

    if !output.is_human() {
        output.json(&json!({ "genres": genres }));
    } else if genres.is_empty() {
        output.warn("No genres available");
    } else if !output.is_quiet() {
        render::print_genres(&genres);
    }
    Ok(())
}

pub async fn run_genre(ctx: &AppContext, genre: &str, tv: bool, output: &Output) -> Result<()> {
    ctx.require_home()?;
    let filter: GenreFilter = genre.parse().map_err(|e: String| eyre!(e))?;
    let composer = composer(ctx)?;

    let genre_id = match filter {
        GenreFilter::All => {
            output.info("Genre filter cleared");
            return Ok(());
        }
        GenreFilter::Genre(id) => id,
    };

    let spinner = Spinner::start("Loading genre titles...", output.shows_human());
    let kind = media_kind(tv);
    let (items, genres) = tokio::join!(composer.genre_results(filter, kind), composer.genres(kind));
    spinner.finish();
    let items = items.map_err(|e| eyre!("Failed to load genre titles: {}", e))?;

    let name = genres
        .iter()
        .find(|g| g.id == genre_id)
        .map(|g| g.name.clone())
        .unwrap_or_else(|| format!("Genre {}", genre_id));

    if !output.is_human() {
        output.json(&json!({ "genre": name, "results": items }));
    } else if !output.is_quiet() {
        render::print_items(&format!("Top picks in {}", name), &items, &ctx.images(), CardArt::Poster);
    }
    Ok(())
}

pub async fn run_details(ctx: &AppContext, id: u64, tv: bool, output: &Output) -> Result<()> {
    ctx.require_home()?;
    let source = ctx.source()?;

    let spinner = Spinner::start("Loading details...", output.shows_human());
    let details = source.details(media_kind(tv), id).await;
    spinner.finish();
    let details = details.map_err(|e| eyre!("Failed to load details for {}: {}", id, e))?;

    let saved = Watchlist::load(ctx.store.clone()).is_in_watchlist(id);
    if !output.is_human() {
        output.json(&json!({ "details": details, "in_watchlist": saved }));
    } else if !output.is_quiet() {
        render::print_details(&details, &ctx.images());
        if saved {
            println!("\n{}", "✓ In your watchlist".green());
        }
    }
    Ok(())
}
