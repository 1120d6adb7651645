use catalog_core::{CardArt, Hero, Section};
use catalog_models::{CatalogItem, Genre, ItemDetails, NotificationRecord};
use catalog_sources::{ImageUrls, LocalMovie};
use comfy_table::{presets, modifiers, Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;

fn styled_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table
}

pub fn heading(title: &str) {
    println!("\n{}", title.bright_cyan().bold());
}

pub fn items_table(items: &[CatalogItem], images: &ImageUrls, art: CardArt) -> Table {
    let mut table = styled_table(&["ID", "Title", "Year", "Rating", "Kind", "Art"]);
    for item in items {
        let art_url = match art {
            CardArt::Poster => images.poster(item),
            CardArt::Backdrop => images.backdrop_card(item),
        };
        table.add_row(vec![
            Cell::new(item.id),
            Cell::new(&item.title),
            Cell::new(item.display_year()),
            Cell::new(item.display_rating()).fg(Color::Yellow),
            Cell::new(item.media_kind),
            Cell::new(art_url.unwrap_or_default()),
        ]);
    }
    table
}

pub fn print_items(title: &str, items: &[CatalogItem], images: &ImageUrls, art: CardArt) {
    heading(title);
    if items.is_empty() {
        println!("  {}", "Nothing to show here yet.".dimmed());
        return;
    }
    println!("{}", items_table(items, images, art));
}

pub fn print_section(section: &Section, images: &ImageUrls) {
    print_items(&section.title, &section.items, images, section.art);
}

fn meta_line(item: &CatalogItem, runtime: Option<u32>) -> String {
    let mut parts = Vec::new();
    if item.rating.map(|r| r > 0.0).unwrap_or(false) {
        parts.push(format!("⭐ {}", item.display_rating()));
    }
    if let Some(year) = item.year() {
        parts.push(year.to_string());
    }
    if let Some(minutes) = runtime {
        parts.push(format!("{} min", minutes));
    }
    parts.join(" • ")
}

pub fn print_hero(hero: &Hero, images: &ImageUrls) {
    let item = hero.item();
    let runtime = hero.details().and_then(|d| d.runtime);

    println!("{}", "Stream the latest cinematic adventures".dimmed());
    println!("{}", item.title.bright_white().bold());
    let meta = meta_line(item, runtime);
    if !meta.is_empty() {
        println!("{}", meta);
    }
    if let Some(overview) = &item.overview {
        println!("{}", overview);
    }
    if let Some(url) = images.hero(item) {
        println!("{}", url.dimmed());
    }
}

pub fn print_details(details: &ItemDetails, images: &ImageUrls) {
    let item = &details.item;
    heading(&item.title);
    if let Some(tagline) = details.tagline.as_ref().filter(|t| !t.is_empty()) {
        println!("{}", tagline.italic());
    }
    let meta = meta_line(item, details.runtime);
    if !meta.is_empty() {
        println!("{}", meta);
    }
    if !details.genres.is_empty() {
        let names: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
        println!("{}", names.join(", "));
    }
    if let Some(overview) = &item.overview {
        println!("\n{}", overview);
    }
    if let Some(trailer) = details.trailer() {
        println!("\nTrailer: https://www.youtube.com/watch?v={}", trailer.key);
    }
    if !details.cast.is_empty() {
        let cast: Vec<String> = details
            .cast
            .iter()
            .map(|c| match &c.character {
                Some(character) if !character.is_empty() => format!("{} ({})", c.name, character),
                _ => c.name.clone(),
            })
            .collect();
        println!("\nCast: {}", cast.join(", "));
    }
    if let Some(url) = images.poster(item) {
        println!("Poster: {}", url.dimmed());
    }
    if !details.recommendations.is_empty() {
        print_items("Recommended", &details.recommendations, images, CardArt::Poster);
    }
    if !details.similar.is_empty() {
        print_items("Similar Titles", &details.similar, images, CardArt::Poster);
    }
}

pub fn print_genres(genres: &[Genre]) {
    let mut table = styled_table(&["ID", "Genre"]);
    for genre in genres {
        table.add_row(vec![Cell::new(genre.id), Cell::new(&genre.name)]);
    }
    println!("{}", table);
}

pub fn print_notifications(notifications: &[NotificationRecord]) {
    if notifications.is_empty() {
        println!("{}", "You're all caught up.".dimmed());
        return;
    }
    for n in notifications {
        let marker = if n.read { " ".to_string() } else { "●".bright_red().to_string() };
        println!(
            "{} {}  {}\n  {}",
            marker,
            n.title.bold(),
            n.timestamp.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            n.message
        );
    }
}

pub fn print_local_movies(movies: &[LocalMovie]) {
    let mut table = styled_table(&["ID", "Title", "Year", "Rating", "Genre"]);
    for movie in movies {
        table.add_row(vec![
            Cell::new(movie.id.map(|id| id.to_string()).unwrap_or_default()),
            Cell::new(&movie.title),
            Cell::new(movie.year.map(|y| y.to_string()).unwrap_or_else(|| "Unknown".to_string())),
            Cell::new(format!("{:.1}", movie.rating)).fg(Color::Yellow),
            Cell::new(&movie.genre),
        ]);
    }
    println!("{}", table);
}
