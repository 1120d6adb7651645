use crate::context::AppContext;
use crate::output::Output;
use crate::render;
use crate::ui::Spinner;
use crate::WatchlistCommands;
use catalog_core::{CardArt, Watchlist};
use catalog_models::MediaKind;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;

pub async fn run_watchlist(ctx: &AppContext, cmd: WatchlistCommands, output: &Output) -> Result<()> {
    ctx.require_home()?;
    let mut watchlist = Watchlist::load(ctx.store.clone());

    match cmd {
        WatchlistCommands::List => {
            if !output.is_human() {
                output.json(&json!({ "items": watchlist.items() }));
            } else if watchlist.is_empty() {
                output.info("Your watchlist is empty. Add titles with 'streamsavvy watchlist add <id>'.");
            } else if !output.is_quiet() {
                render::print_items("My Watchlist", watchlist.items(), &ctx.images(), CardArt::Poster);
            }
        }
        WatchlistCommands::Add { id, tv } => {
            if watchlist.is_in_watchlist(id) {
                output.info(format!("{} is already in your watchlist", id));
                return Ok(());
            }

            let kind = if tv { MediaKind::Series } else { MediaKind::Movie };
            let source = ctx.source()?;
            let spinner = Spinner::start("Looking up title...", output.shows_human());
            let details = source.details(kind, id).await;
            spinner.finish();
            let details = details.map_err(|e| eyre!("Failed to look up {} {}: {}", kind, id, e))?;

            watchlist.add(&details.item);
            output.success(format!("Added {} to your watchlist", details.item.title));
        }
        WatchlistCommands::Remove { id } => {
            if watchlist.remove(id) {
                output.success(format!("Removed {} from your watchlist", id));
            } else {
                output.warn(format!("{} is not in your watchlist", id));
            }
        }
    }
    Ok(())
}
